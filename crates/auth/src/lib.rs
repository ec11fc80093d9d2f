//! `ticketdesk-auth` — session and permission model consumed by the route guard.
//!
//! This crate is intentionally decoupled from routing, HTTP and storage: it
//! only describes *who* is signed in and *what* they may do.

pub mod authorize;
pub mod permissions;
pub mod roles;
pub mod session;
pub mod user;

pub use authorize::{authorize, AuthzError};
pub use permissions::{Permission, UnknownPermission};
pub use roles::{default_role_permissions, Role};
pub use session::{Session, SessionError, SessionProvider};
pub use user::User;
