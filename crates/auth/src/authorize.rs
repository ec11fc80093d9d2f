use thiserror::Error;

use crate::{Permission, User};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("not signed in")]
    Unauthenticated,

    #[error("forbidden: missing permission '{0}'")]
    Forbidden(Permission),
}

/// Authorize an (optional) user for a single permission.
///
/// - No IO
/// - No panics
/// - Pure policy check
pub fn authorize(user: Option<&User>, required: Permission) -> Result<(), AuthzError> {
    let user = user.ok_or(AuthzError::Unauthenticated)?;

    if user.has_permission(required) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(required))
    }
}
