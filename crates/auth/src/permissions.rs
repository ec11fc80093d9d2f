use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Permission identifier.
///
/// The set of permissions is closed: every route rule and every consumer
/// names one of these variants, so a new capability cannot appear without
/// being added here first. On the wire each variant is its snake_case token
/// (e.g. `"view_tickets"`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewDashboard,
    ViewTickets,
    CreateTicket,
    UseChat,
    ViewRecommendations,
    ViewAdmin,
}

impl Permission {
    /// Every member of the enumeration, in declaration order.
    pub const ALL: [Permission; 6] = [
        Permission::ViewDashboard,
        Permission::ViewTickets,
        Permission::CreateTicket,
        Permission::UseChat,
        Permission::ViewRecommendations,
        Permission::ViewAdmin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ViewDashboard => "view_dashboard",
            Permission::ViewTickets => "view_tickets",
            Permission::CreateTicket => "create_ticket",
            Permission::UseChat => "use_chat",
            Permission::ViewRecommendations => "view_recommendations",
            Permission::ViewAdmin => "view_admin",
        }
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A permission token outside the closed enumeration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown permission '{0}'")]
pub struct UnknownPermission(pub String);

impl FromStr for Permission {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPermission(s.to_string()))
    }
}
