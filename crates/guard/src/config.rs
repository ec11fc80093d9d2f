//! Guard configuration: route tables and redirect targets.
//!
//! Defaults are the console's built-in tables. A JSON document can override
//! any part of it; missing fields keep their defaults.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use ticketdesk_core::{ConfigError, ConfigResult};

use crate::classifier::RouteClassifier;
use crate::decision::GuardDecision;
use crate::guard::RouteGuard;
use crate::rules::{PublicPathSet, RoutePermissionTable};

/// Environment variable naming a JSON guard configuration file.
pub const CONFIG_ENV_VAR: &str = "TICKETDESK_GUARD_CONFIG";

/// Where each redirect decision sends the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedirectTargets {
    pub login: String,
    pub home: String,
    pub forbidden: String,
}

impl Default for RedirectTargets {
    fn default() -> Self {
        Self {
            login: "/auth/login".to_string(),
            home: "/".to_string(),
            forbidden: "/403".to_string(),
        }
    }
}

impl RedirectTargets {
    /// Target for a redirect decision; `None` for Pending and Allow.
    pub fn target_for(&self, decision: GuardDecision) -> Option<&str> {
        match decision {
            GuardDecision::RedirectLogin => Some(&self.login),
            GuardDecision::RedirectHome => Some(&self.home),
            GuardDecision::RedirectForbidden => Some(&self.forbidden),
            GuardDecision::Pending | GuardDecision::Allow => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    pub public_paths: PublicPathSet,
    pub rules: RoutePermissionTable,
    pub redirects: RedirectTargets,
}

impl GuardConfig {
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::malformed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading guard config {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("loading guard config {}", path.display()))
    }

    /// Load from the file named by [`CONFIG_ENV_VAR`], or use the defaults when unset.
    pub fn from_env() -> anyhow::Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_path(path),
            None => Ok(Self::default()),
        }
    }

    /// Checks that the tables are well-formed and that no redirect can loop.
    pub fn validate(&self) -> ConfigResult<()> {
        self.public_paths.validate()?;
        self.rules.validate()?;

        let RedirectTargets { login, home, forbidden } = &self.redirects;
        for (name, target) in [("login", login), ("home", home), ("forbidden", forbidden)] {
            if !target.starts_with('/') {
                return Err(ConfigError::validation(format!(
                    "{name} redirect '{target}' must start with '/'"
                )));
            }
        }

        // A signed-out user sent to a non-public login page would be sent there again.
        if !self.public_paths.is_public(login) {
            return Err(ConfigError::validation(format!(
                "login redirect '{login}' is not a public path"
            )));
        }
        // A signed-in user sent to a public home page would be sent home again.
        if self.public_paths.is_public(home) {
            return Err(ConfigError::validation(format!(
                "home redirect '{home}' must not be a public path"
            )));
        }
        // The forbidden page must be reachable by anyone signed in.
        if self.public_paths.is_public(forbidden) {
            return Err(ConfigError::validation(format!(
                "forbidden redirect '{forbidden}' must not be a public path"
            )));
        }
        if let Some(permission) = self.rules.required_permission(forbidden) {
            return Err(ConfigError::validation(format!(
                "forbidden redirect '{forbidden}' itself requires '{permission}'"
            )));
        }
        Ok(())
    }

    pub fn into_guard(self) -> ConfigResult<RouteGuard> {
        self.validate()?;
        Ok(RouteGuard::new(
            RouteClassifier::new(self.public_paths, self.rules),
            self.redirects,
        ))
    }
}
