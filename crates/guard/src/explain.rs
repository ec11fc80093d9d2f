//! Decision explanation ("why was I redirected?").
//!
//! Produces a serializable record of everything the guard looked at for one
//! path, for debug panels and support tooling.

use serde::Serialize;

use ticketdesk_auth::{Permission, SessionProvider};

use crate::decision::GuardDecision;
use crate::guard::RouteGuard;

/// Detailed explanation of a guard decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuardExplanation {
    pub path: String,
    pub decision: GuardDecision,

    /// Public prefix that matched, if any.
    pub public_prefix: Option<String>,

    /// Permission rule that matched, rendered for display.
    pub matched_rule: Option<String>,
    pub required_permission: Option<Permission>,

    /// `None` when the permission was never consulted.
    pub permission_granted: Option<bool>,

    pub loading: bool,
    pub user_present: bool,

    /// Where the guard navigates, if it redirects.
    pub redirect_to: Option<String>,

    /// Human-readable reason for the decision.
    pub reason: String,
}

impl GuardExplanation {
    pub(crate) fn build<P>(guard: &RouteGuard, provider: &P, path: &str) -> Self
    where
        P: SessionProvider + ?Sized,
    {
        let classifier = guard.classifier();
        let session = provider.session();
        let classification = classifier.classify(path);
        let decision = guard.evaluate(provider, path);

        let permission_granted = match (decision, classification.required_permission) {
            (GuardDecision::Allow | GuardDecision::RedirectForbidden, Some(required))
                if session.user.is_some() && !classification.is_public =>
            {
                Some(provider.has_permission(required))
            }
            _ => None,
        };

        let reason = match decision {
            GuardDecision::Pending => "Session is still loading; waiting before deciding".to_string(),
            GuardDecision::RedirectLogin => format!("'{path}' requires a signed-in user and nobody is signed in"),
            GuardDecision::RedirectHome => {
                format!("'{path}' is a public-only page and a user is already signed in")
            }
            GuardDecision::RedirectForbidden => format!(
                "'{path}' requires permission '{}' which the user does not have",
                classification
                    .required_permission
                    .map(|p| p.as_str())
                    .unwrap_or_default()
            ),
            GuardDecision::Allow if classification.is_public => {
                format!("'{path}' is public and nobody is signed in")
            }
            GuardDecision::Allow => match classification.required_permission {
                Some(required) => format!("User has permission '{required}'"),
                None => format!("No route rule matches '{path}'; any signed-in user may view it"),
            },
        };

        Self {
            path: path.to_string(),
            decision,
            public_prefix: classifier.public_paths().matching(path).map(str::to_string),
            matched_rule: classifier.matched_rule(path).map(ToString::to_string),
            required_permission: classification.required_permission,
            permission_granted,
            loading: session.loading,
            user_present: session.user.is_some(),
            redirect_to: guard.redirect_target(decision).map(str::to_string),
            reason,
        }
    }
}
