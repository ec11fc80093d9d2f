//! The guard decision matrix.

use serde::{Deserialize, Serialize};

use ticketdesk_auth::{Permission, Session};

use crate::classifier::Classification;

/// What the guard does for one `(session, path)` snapshot.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardDecision {
    /// Session still resolving: show a placeholder, navigate nowhere.
    Pending,
    RedirectLogin,
    /// Signed-in user on a public-only page.
    RedirectHome,
    RedirectForbidden,
    Allow,
}

/// What the guard renders in place of its children.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Render {
    Placeholder,
    Children,
    Nothing,
}

impl GuardDecision {
    pub fn is_redirect(&self) -> bool {
        matches!(
            self,
            Self::RedirectLogin | Self::RedirectHome | Self::RedirectForbidden
        )
    }

    /// Render output is gated on the decision alone, never on raw session fields.
    pub fn render(&self) -> Render {
        match self {
            Self::Pending => Render::Placeholder,
            Self::Allow => Render::Children,
            Self::RedirectLogin | Self::RedirectHome | Self::RedirectForbidden => Render::Nothing,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::RedirectLogin => "redirect_login",
            Self::RedirectHome => "redirect_home",
            Self::RedirectForbidden => "redirect_forbidden",
            Self::Allow => "allow",
        }
    }
}

impl core::fmt::Display for GuardDecision {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evaluate the decision matrix.
///
/// `has_permission` is only called once the session has loaded and a user is
/// present.
pub fn decide<F>(session: &Session, classification: &Classification, has_permission: F) -> GuardDecision
where
    F: Fn(Permission) -> bool,
{
    if session.loading {
        return GuardDecision::Pending;
    }

    match (session.user.is_some(), classification.is_public) {
        (false, false) => GuardDecision::RedirectLogin,
        (false, true) => GuardDecision::Allow,
        (true, true) => GuardDecision::RedirectHome,
        (true, false) => match classification.required_permission {
            Some(required) if !has_permission(required) => GuardDecision::RedirectForbidden,
            _ => GuardDecision::Allow,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::Cell;
    use ticketdesk_auth::User;
    use ticketdesk_core::UserId;

    fn user() -> User {
        User::new(UserId::new(), "u@example.com", "U")
    }

    fn protected(required: Option<Permission>) -> Classification {
        Classification {
            is_public: false,
            required_permission: required,
        }
    }

    fn public() -> Classification {
        Classification {
            is_public: true,
            required_permission: None,
        }
    }

    #[test]
    fn matrix_rows() {
        let signed_in = Session::signed_in(user());
        let signed_out = Session::signed_out();
        let gated = protected(Some(Permission::ViewAdmin));

        assert_eq!(decide(&signed_out, &gated, |_| true), GuardDecision::RedirectLogin);
        assert_eq!(decide(&signed_out, &public(), |_| true), GuardDecision::Allow);
        assert_eq!(decide(&signed_in, &public(), |_| true), GuardDecision::RedirectHome);
        assert_eq!(decide(&signed_in, &gated, |_| false), GuardDecision::RedirectForbidden);
        assert_eq!(decide(&signed_in, &gated, |_| true), GuardDecision::Allow);
        assert_eq!(decide(&signed_in, &protected(None), |_| false), GuardDecision::Allow);
    }

    #[test]
    fn permission_check_is_skipped_without_a_user() {
        let calls = Cell::new(0);
        let check = |_| {
            calls.set(calls.get() + 1);
            true
        };
        decide(&Session::loading(), &protected(Some(Permission::UseChat)), check);
        decide(&Session::signed_out(), &protected(Some(Permission::UseChat)), check);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn render_gating() {
        assert_eq!(GuardDecision::Pending.render(), Render::Placeholder);
        assert_eq!(GuardDecision::Allow.render(), Render::Children);
        for d in [
            GuardDecision::RedirectLogin,
            GuardDecision::RedirectHome,
            GuardDecision::RedirectForbidden,
        ] {
            assert!(d.is_redirect());
            assert_eq!(d.render(), Render::Nothing);
        }
        assert!(!GuardDecision::Pending.is_redirect());
        assert!(!GuardDecision::Allow.is_redirect());
    }

    proptest! {
        /// Property: while loading, the decision is Pending whatever else is true.
        #[test]
        fn loading_always_pends(
            with_user in any::<bool>(),
            is_public in any::<bool>(),
            perm in proptest::option::of(0usize..6),
            granted in any::<bool>(),
        ) {
            let session = Session { user: with_user.then(user), loading: true };
            let classification = Classification {
                is_public,
                required_permission: perm.map(|i| Permission::ALL[i]),
            };
            prop_assert_eq!(decide(&session, &classification, |_| granted), GuardDecision::Pending);
        }
    }
}
