//! Signed-in console user, as resolved by the session provider.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ticketdesk_core::UserId;

use crate::{default_role_permissions, Permission, Role};

/// An authenticated user.
///
/// Effective permissions are the union of the explicit grants and whatever
/// the assigned roles grant through [`default_role_permissions`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub display_name: String,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub permissions: Vec<Permission>,
    /// When the backing credential stops being valid, if known.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(id: UserId, email: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            display_name: display_name.into(),
            roles: Vec::new(),
            permissions: Vec::new(),
            expires_at: None,
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.push(role);
        self
    }

    pub fn with_permission(mut self, permission: Permission) -> Self {
        self.permissions.push(permission);
        self
    }

    pub fn expiring_at(mut self, at: DateTime<Utc>) -> Self {
        self.expires_at = Some(at);
        self
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    pub fn effective_permissions(&self) -> BTreeSet<Permission> {
        self.roles
            .iter()
            .flat_map(|role| default_role_permissions(role.as_str()).iter().copied())
            .chain(self.permissions.iter().copied())
            .collect()
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
            || self
                .roles
                .iter()
                .any(|role| default_role_permissions(role.as_str()).contains(&permission))
    }
}
