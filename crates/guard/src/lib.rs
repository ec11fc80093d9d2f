//! `ticketdesk-guard` — client-side route authorization for the ticket console.
//!
//! Two pieces:
//! - the route classifier (public prefixes + ordered permission rules), and
//! - the guard decision matrix over `(session, classification)`,
//!
//! plus [`GuardController`], which turns decision changes into replace
//! navigations and drops redirects that a newer evaluation superseded.
//!
//! Nothing here performs IO or awaits; session and path are owned by their
//! providers and only observed.

pub mod classifier;
pub mod config;
pub mod controller;
pub mod decision;
pub mod explain;
pub mod guard;
pub mod navigator;
pub mod rules;

pub use classifier::{classify, Classification, RouteClassifier};
pub use config::{GuardConfig, RedirectTargets, CONFIG_ENV_VAR};
pub use controller::{GuardController, Observation, RedirectTicket};
pub use decision::{decide, GuardDecision, Render};
pub use explain::GuardExplanation;
pub use guard::RouteGuard;
pub use navigator::{MemoryRouter, Navigator};
pub use rules::{PublicPathSet, RoutePermissionTable, RouteRule};
