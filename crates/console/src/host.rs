//! Event-driven guard host.
//!
//! Session changes and navigations arrive independently. Each event updates
//! the host's snapshot and re-runs the guard; redirects go through the
//! navigator as replace navigations.

use anyhow::Context;
use serde::{Deserialize, Serialize};

use ticketdesk_auth::Session;
use ticketdesk_guard::{GuardConfig, GuardController, MemoryRouter, Navigator, Observation, RouteGuard};

/// Something the guard has to react to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostEvent {
    /// The session provider published a new snapshot.
    SessionChanged { session: Session },
    /// The router moved; the new path is read back from the navigator.
    Navigated,
}

/// Decode a JSON session snapshot as published by the session provider.
pub fn session_from_json(json: &str) -> anyhow::Result<Session> {
    serde_json::from_str(json).context("invalid session snapshot")
}

pub struct GuardHost<N: Navigator> {
    session: Session,
    navigator: N,
    controller: GuardController,
}

impl<N: Navigator> GuardHost<N> {
    /// Host starting with an unresolved session.
    pub fn new(guard: RouteGuard, navigator: N) -> Self {
        Self {
            session: Session::loading(),
            navigator,
            controller: GuardController::new(guard),
        }
    }

    /// Host using the guard configuration named by the environment, if any.
    pub fn from_env(navigator: N) -> anyhow::Result<Self> {
        let guard = GuardConfig::from_env()?.into_guard()?;
        Ok(Self::new(guard, navigator))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }

    /// Evaluate the current snapshot (initial render).
    pub fn start(&mut self) -> Observation {
        self.controller.sync(&self.session, &mut self.navigator)
    }

    pub fn handle(&mut self, event: HostEvent) -> Observation {
        match event {
            HostEvent::SessionChanged { session } => {
                tracing::debug!(
                    loading = session.loading,
                    signed_in = session.user.is_some(),
                    "session changed"
                );
                self.session = session;
            }
            HostEvent::Navigated => {
                tracing::debug!(path = %self.navigator.current_path(), "navigated");
            }
        }
        self.controller.sync(&self.session, &mut self.navigator)
    }
}

impl GuardHost<MemoryRouter> {
    /// Client-side navigation: push `path`, then let the guard react.
    pub fn visit(&mut self, path: &str) -> Observation {
        self.navigator.push(path);
        self.handle(HostEvent::Navigated)
    }

    pub fn back(&mut self) -> Observation {
        self.navigator.back();
        self.handle(HostEvent::Navigated)
    }
}
