//! `ticketdesk-console`
//!
//! **Responsibility:** wires the route guard into a running console.
//!
//! This crate provides:
//! - [`GuardHost`]: an event-driven driver that re-evaluates the guard on
//!   session and navigation events (usable without a browser)
//! - `frontend` (wasm32 only): the Leptos `RouteGuard` component and the
//!   `mountConsole` entry point exported to the host page

pub mod host;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

pub use host::{session_from_json, GuardHost, HostEvent};
