//! `RouteGuard`: classifier + decision matrix + redirect targets.

use ticketdesk_auth::SessionProvider;

use crate::classifier::{Classification, RouteClassifier};
use crate::config::RedirectTargets;
use crate::decision::{decide, GuardDecision};
use crate::explain::GuardExplanation;

/// Stateless guard. Every call is a pure function of its inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteGuard {
    classifier: RouteClassifier,
    redirects: RedirectTargets,
}

impl RouteGuard {
    pub fn new(classifier: RouteClassifier, redirects: RedirectTargets) -> Self {
        Self { classifier, redirects }
    }

    pub fn classifier(&self) -> &RouteClassifier {
        &self.classifier
    }

    pub fn redirects(&self) -> &RedirectTargets {
        &self.redirects
    }

    pub fn classify(&self, path: &str) -> Classification {
        self.classifier.classify(path)
    }

    pub fn evaluate<P>(&self, provider: &P, path: &str) -> GuardDecision
    where
        P: SessionProvider + ?Sized,
    {
        let classification = self.classify(path);
        let session = provider.session();
        let decision = decide(&session, &classification, |p| provider.has_permission(p));

        if !session.loading
            && session.user.is_some()
            && !classification.is_public
            && classification.required_permission.is_none()
        {
            // Unknown routes fail open: authentication is the only requirement.
            tracing::debug!(path, "no route rule matched; allowing any signed-in user");
        }
        tracing::debug!(path, decision = %decision, "route guard evaluated");
        decision
    }

    /// Where `decision` navigates to, if anywhere.
    pub fn redirect_target(&self, decision: GuardDecision) -> Option<&str> {
        self.redirects.target_for(decision)
    }

    pub fn explain<P>(&self, provider: &P, path: &str) -> GuardExplanation
    where
        P: SessionProvider + ?Sized,
    {
        GuardExplanation::build(self, provider, path)
    }
}
