//! Static route tables: public path prefixes and ordered permission rules.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use ticketdesk_auth::Permission;
use ticketdesk_core::{ConfigError, ConfigResult};

/// A single entry of the route permission table.
///
/// `ExactRoot` matches only the literal path `/`. A `Prefix` rule for `/`
/// would match every path, which is never what the root route means.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "match", rename_all = "snake_case")]
pub enum RouteRule {
    Prefix {
        prefix: Cow<'static, str>,
        permission: Permission,
    },
    ExactRoot {
        permission: Permission,
    },
}

impl RouteRule {
    pub const fn prefix(prefix: &'static str, permission: Permission) -> Self {
        Self::Prefix {
            prefix: Cow::Borrowed(prefix),
            permission,
        }
    }

    pub const fn exact_root(permission: Permission) -> Self {
        Self::ExactRoot { permission }
    }

    pub fn permission(&self) -> Permission {
        match self {
            Self::Prefix { permission, .. } | Self::ExactRoot { permission } => *permission,
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Prefix { prefix, .. } => path.starts_with(&**prefix),
            Self::ExactRoot { .. } => path == "/",
        }
    }

    /// Whether every path this rule can match is already matched by `earlier`.
    fn is_covered_by(&self, earlier: &RouteRule) -> bool {
        match (earlier, self) {
            (Self::Prefix { prefix: a, .. }, Self::Prefix { prefix: b, .. }) => b.starts_with(&**a),
            (Self::Prefix { prefix: a, .. }, Self::ExactRoot { .. }) => "/".starts_with(&**a),
            (Self::ExactRoot { .. }, Self::ExactRoot { .. }) => true,
            (Self::ExactRoot { .. }, Self::Prefix { .. }) => false,
        }
    }
}

impl core::fmt::Display for RouteRule {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Prefix { prefix, permission } => write!(f, "{prefix}* -> {permission}"),
            Self::ExactRoot { permission } => write!(f, "/ (exact) -> {permission}"),
        }
    }
}

/// Ordered route permission table. The first matching rule wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoutePermissionTable {
    rules: Vec<RouteRule>,
}

impl RoutePermissionTable {
    pub fn new(rules: Vec<RouteRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    /// First rule matching `path`, with its position in the table.
    pub fn first_match(&self, path: &str) -> Option<(usize, &RouteRule)> {
        self.rules.iter().enumerate().find(|(_, rule)| rule.matches(path))
    }

    pub fn required_permission(&self, path: &str) -> Option<Permission> {
        self.first_match(path).map(|(_, rule)| rule.permission())
    }

    /// Rules that can never match because an earlier rule covers them.
    ///
    /// Returns `(shadowed_index, shadowing_index)` pairs.
    pub fn shadowed_rules(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for (j, later) in self.rules.iter().enumerate() {
            if let Some(i) = self.rules[..j].iter().position(|earlier| later.is_covered_by(earlier)) {
                out.push((j, i));
            }
        }
        out
    }

    /// Reject malformed prefixes and shadowed rules.
    pub fn validate(&self) -> ConfigResult<()> {
        for rule in &self.rules {
            if let RouteRule::Prefix { prefix, .. } = rule {
                if !prefix.starts_with('/') {
                    return Err(ConfigError::validation(format!(
                        "route prefix '{prefix}' must start with '/'"
                    )));
                }
            }
        }

        if let Some(&(shadowed, by)) = self.shadowed_rules().first() {
            return Err(ConfigError::ShadowedRule {
                shadowed: self.rules[shadowed].to_string(),
                by: self.rules[by].to_string(),
            });
        }
        Ok(())
    }
}

impl Default for RoutePermissionTable {
    /// The console's route table. More specific prefixes come first and the
    /// root rule comes last.
    fn default() -> Self {
        Self::new(vec![
            RouteRule::prefix("/dashboard", Permission::ViewDashboard),
            RouteRule::prefix("/tickets/new", Permission::CreateTicket),
            RouteRule::prefix("/tickets", Permission::ViewTickets),
            RouteRule::prefix("/chat", Permission::UseChat),
            RouteRule::prefix("/recommendations", Permission::ViewRecommendations),
            RouteRule::prefix("/admin", Permission::ViewAdmin),
            RouteRule::exact_root(Permission::ViewDashboard),
        ])
    }
}

/// Path prefixes reachable without a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicPathSet {
    prefixes: Vec<Cow<'static, str>>,
}

impl PublicPathSet {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.prefixes.iter().map(|p| &**p)
    }

    /// The first public prefix `path` starts with (case-sensitive, no normalization).
    pub fn matching(&self, path: &str) -> Option<&str> {
        self.prefixes().find(|prefix| path.starts_with(*prefix))
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.matching(path).is_some()
    }

    pub fn validate(&self) -> ConfigResult<()> {
        match self.prefixes().find(|p| !p.starts_with('/')) {
            Some(bad) => Err(ConfigError::validation(format!(
                "public path '{bad}' must start with '/'"
            ))),
            None => Ok(()),
        }
    }
}

impl Default for PublicPathSet {
    fn default() -> Self {
        Self::new([
            "/auth/login",
            "/auth/signup",
            "/auth/forgot-password",
            "/auth/reset-password",
        ])
    }
}
