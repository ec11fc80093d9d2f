//! Configuration error model.

use thiserror::Error;

/// Result type used when building or loading configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration-level error.
///
/// Raised while assembling static tables at startup. Evaluation-time code
/// (classification, guard decisions) never produces errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A value failed validation (e.g. a path that does not start with `/`).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A rule can never match because an earlier rule already covers it.
    #[error("rule '{shadowed}' is shadowed by earlier rule '{by}'")]
    ShadowedRule { shadowed: String, by: String },

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The configuration source could not be parsed.
    #[error("malformed configuration: {0}")]
    Malformed(String),
}

impl ConfigError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}
