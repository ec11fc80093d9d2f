//! Route classification: path -> (public?, required permission).

use std::sync::LazyLock;

use serde::Serialize;

use ticketdesk_auth::Permission;
use ticketdesk_core::ConfigResult;

use crate::rules::{PublicPathSet, RoutePermissionTable, RouteRule};

/// What the route tables say about one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub is_public: bool,
    /// `None` means only authentication is required.
    pub required_permission: Option<Permission>,
}

/// Holds the two static tables and answers classification queries.
///
/// Pure: the result depends only on the path and the tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteClassifier {
    public_paths: PublicPathSet,
    table: RoutePermissionTable,
}

impl RouteClassifier {
    pub fn new(public_paths: PublicPathSet, table: RoutePermissionTable) -> Self {
        Self { public_paths, table }
    }

    pub fn public_paths(&self) -> &PublicPathSet {
        &self.public_paths
    }

    pub fn table(&self) -> &RoutePermissionTable {
        &self.table
    }

    pub fn classify(&self, path: &str) -> Classification {
        Classification {
            is_public: self.public_paths.is_public(path),
            required_permission: self.table.required_permission(path),
        }
    }

    /// The permission rule that decides `path`, if any.
    pub fn matched_rule(&self, path: &str) -> Option<&RouteRule> {
        self.table.first_match(path).map(|(_, rule)| rule)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.public_paths.validate()?;
        self.table.validate()
    }
}

static BUILT_IN: LazyLock<RouteClassifier> = LazyLock::new(RouteClassifier::default);

/// Classify `path` against the built-in tables.
pub fn classify(path: &str) -> Classification {
    BUILT_IN.classify(path)
}
