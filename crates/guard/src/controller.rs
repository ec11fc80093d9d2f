//! Redirect scheduling keyed on the computed decision.
//!
//! The host calls [`GuardController::observe`] whenever the session or the
//! path changes. A redirect is scheduled only when the `(decision, path)`
//! pair changes (or a previously scheduled redirect never ran), and every
//! observation supersedes whatever was scheduled before it.

use ticketdesk_auth::SessionProvider;

use crate::decision::{GuardDecision, Render};
use crate::guard::RouteGuard;
use crate::navigator::Navigator;

/// A scheduled replace-navigation. Only the most recent ticket may run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTicket {
    generation: u64,
    decision: GuardDecision,
    target: String,
}

impl RedirectTicket {
    pub fn decision(&self) -> GuardDecision {
        self.decision
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

/// Result of one observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub decision: GuardDecision,
    pub render: Render,
    pub redirect: Option<RedirectTicket>,
}

#[derive(Debug, Default)]
pub struct GuardController {
    guard: RouteGuard,
    /// Decision and path of the latest observation.
    last: Option<(GuardDecision, String)>,
    generation: u64,
    /// A ticket for `last` was handed out and has not run yet.
    outstanding: bool,
}

impl GuardController {
    pub fn new(guard: RouteGuard) -> Self {
        Self {
            guard,
            last: None,
            generation: 0,
            outstanding: false,
        }
    }

    pub fn guard(&self) -> &RouteGuard {
        &self.guard
    }

    pub fn last_decision(&self) -> Option<GuardDecision> {
        self.last.as_ref().map(|(decision, _)| *decision)
    }

    /// Recompute the decision for a `(session, path)` snapshot.
    pub fn observe<P>(&mut self, provider: &P, path: &str) -> Observation
    where
        P: SessionProvider + ?Sized,
    {
        let decision = self.guard.evaluate(provider, path);
        self.generation += 1;

        let changed = self
            .last
            .as_ref()
            .is_none_or(|(last_decision, last_path)| *last_decision != decision || last_path != path);
        if changed {
            self.outstanding = false;
            self.last = Some((decision, path.to_string()));
        }

        let redirect = match self.guard.redirect_target(decision) {
            Some(target) if changed || self.outstanding => {
                self.outstanding = true;
                Some(RedirectTicket {
                    generation: self.generation,
                    decision,
                    target: target.to_string(),
                })
            }
            _ => None,
        };

        Observation {
            decision,
            render: decision.render(),
            redirect,
        }
    }

    /// Run a scheduled redirect. Returns `false` if a newer observation
    /// superseded the ticket.
    pub fn execute<N>(&mut self, ticket: RedirectTicket, navigator: &mut N) -> bool
    where
        N: Navigator + ?Sized,
    {
        if ticket.generation != self.generation {
            tracing::debug!(
                target_path = %ticket.target,
                decision = %ticket.decision,
                "dropping superseded redirect"
            );
            return false;
        }

        tracing::info!(
            from = %navigator.current_path(),
            to = %ticket.target,
            decision = %ticket.decision,
            "route guard redirect"
        );
        navigator.replace(&ticket.target);
        self.outstanding = false;
        true
    }

    /// Observe the navigator's current path and run any redirect immediately.
    pub fn sync<P, N>(&mut self, provider: &P, navigator: &mut N) -> Observation
    where
        P: SessionProvider + ?Sized,
        N: Navigator + ?Sized,
    {
        let path = navigator.current_path();
        let observation = self.observe(provider, &path);
        if let Some(ticket) = observation.redirect.clone() {
            self.execute(ticket, navigator);
        }
        observation
    }
}
