//! `ticketdesk-core` — shared building blocks for the console crates.
//!
//! Pure types only: identifiers and configuration errors.

pub mod error;
pub mod id;

pub use error::{ConfigError, ConfigResult};
pub use id::UserId;
