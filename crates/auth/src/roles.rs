use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::Permission;

/// Role identifier used for RBAC.
///
/// Roles are opaque strings; [`default_role_permissions`] maps the roles the
/// console knows about to the permissions they grant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Default role-to-permission mapping.
///
/// Unknown roles grant nothing.
pub fn default_role_permissions(role: &str) -> &'static [Permission] {
    match role {
        "admin" => &Permission::ALL,
        "agent" => &[
            Permission::ViewDashboard,
            Permission::ViewTickets,
            Permission::CreateTicket,
            Permission::UseChat,
            Permission::ViewRecommendations,
        ],
        "customer" => &[
            Permission::ViewDashboard,
            Permission::ViewTickets,
            Permission::CreateTicket,
            Permission::UseChat,
        ],
        _ => &[],
    }
}
