//! Engine configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::defaults::{
    default_log_filter, default_log_format, default_max_list_restarts,
    default_max_matches,
};
use crate::logging::LogFormat;

/// Errors raised while loading an [`EngineConfig`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The configuration document is not valid JSON for this schema.
    #[error("invalid configuration document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Limits and defaults applied by the matching engine.
///
/// Every field has a default, so partial documents are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    #[serde(default = "default_max_matches")]
    max_matches: usize,
    #[serde(default = "default_max_list_restarts")]
    max_list_restarts: usize,
    #[serde(default)]
    aggressive: bool,
    #[serde(default = "default_log_filter")]
    log_filter: String,
    #[serde(default = "default_log_format")]
    log_format: LogFormat,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_matches: default_max_matches(),
            max_list_restarts: default_max_list_restarts(),
            aggressive: false,
            log_filter: default_log_filter(),
            log_format: default_log_format(),
        }
    }
}

impl EngineConfig {
    /// Parses a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] when the document is malformed or
    /// contains unknown fields.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Maximum number of matches yielded per query.
    #[must_use]
    pub const fn max_matches(&self) -> usize {
        self.max_matches
    }

    /// Maximum number of restart frames popped while matching one list.
    #[must_use]
    pub const fn max_list_restarts(&self) -> usize {
        self.max_list_restarts
    }

    /// Whether every pattern is compiled in aggressive mode.
    #[must_use]
    pub const fn aggressive(&self) -> bool {
        self.aggressive
    }

    /// The `tracing` filter directive.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// The log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Sets the match limit.
    #[must_use]
    pub const fn with_max_matches(mut self, max_matches: usize) -> Self {
        self.max_matches = max_matches;
        self
    }

    /// Sets the per-list restart budget.
    #[must_use]
    pub const fn with_max_list_restarts(mut self, max_list_restarts: usize) -> Self {
        self.max_list_restarts = max_list_restarts;
        self
    }

    /// Forces aggressive mode for every pattern.
    #[must_use]
    pub const fn with_aggressive(mut self, aggressive: bool) -> Self {
        self.aggressive = aggressive;
        self
    }

    /// Sets the `tracing` filter directive.
    #[must_use]
    pub fn with_log_filter(mut self, log_filter: impl Into<String>) -> Self {
        self.log_filter = log_filter.into();
        self
    }

    /// Sets the log output format.
    #[must_use]
    pub const fn with_log_format(mut self, log_format: LogFormat) -> Self {
        self.log_format = log_format;
        self
    }
}
