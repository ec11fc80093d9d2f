//! Session snapshot and the session-provider contract.
//!
//! The provider owns the session and mutates it as resolution progresses; the
//! route guard only ever reads [`Session`] snapshots. Resolution failures are
//! folded into the plain "signed out" state here, so downstream code has no
//! error branch to handle.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{authorize, Permission, User};

/// Why a session could not be resolved.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("session expired")]
    Expired,

    #[error("invalid session token")]
    InvalidToken,

    #[error("session backend unreachable: {0}")]
    Unreachable(String),
}

/// Point-in-time view of the session.
///
/// While `loading` is true the value of `user` is not meaningful. Once
/// `loading` is false, `user` is authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Session {
    pub user: Option<User>,
    pub loading: bool,
}

impl Session {
    /// Session still being resolved (first load, token refresh).
    pub fn loading() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            user: None,
            loading: false,
        }
    }

    pub fn signed_in(user: User) -> Self {
        Self {
            user: Some(user),
            loading: false,
        }
    }

    /// Normalize the outcome of a session lookup.
    ///
    /// Any failure, and any user whose credential has already expired at
    /// `now`, becomes [`Session::signed_out`].
    pub fn from_resolution(result: Result<User, SessionError>, now: DateTime<Utc>) -> Self {
        match result {
            Ok(user) if user.is_expired(now) => {
                tracing::warn!(user_id = %user.id, "session credential expired; treating as signed out");
                Self::signed_out()
            }
            Ok(user) => Self::signed_in(user),
            Err(err) => {
                tracing::warn!(error = %err, "session resolution failed; treating as signed out");
                Self::signed_out()
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !self.loading && self.user.is_some()
    }
}

/// Session provider contract.
///
/// `has_permission` is a pure, synchronous query. It is only meaningful when
/// the session has finished loading and a user is present; otherwise the
/// default implementation answers `false`.
///
/// `session` hands out a borrowed snapshot when the provider holds one, so a
/// guard evaluation does not copy the user on every navigation.
pub trait SessionProvider {
    fn session(&self) -> Cow<'_, Session>;

    fn has_permission(&self, permission: Permission) -> bool {
        let session = self.session();
        !session.loading && authorize(session.user.as_ref(), permission).is_ok()
    }
}

impl SessionProvider for Session {
    fn session(&self) -> Cow<'_, Session> {
        Cow::Borrowed(self)
    }

    fn has_permission(&self, permission: Permission) -> bool {
        !self.loading && authorize(self.user.as_ref(), permission).is_ok()
    }
}
