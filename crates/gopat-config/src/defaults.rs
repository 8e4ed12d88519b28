//! Default values for [`EngineConfig`](crate::EngineConfig) fields.

use crate::logging::LogFormat;

/// Default number of matches yielded per query before truncation.
pub const DEFAULT_MAX_MATCHES: usize = 10_000;

/// Default number of restart frames popped per list match.
pub const DEFAULT_MAX_LIST_RESTARTS: usize = 100_000;

/// Default log filter expression.
pub const DEFAULT_LOG_FILTER: &str = "info";

pub(crate) const fn default_max_matches() -> usize {
    DEFAULT_MAX_MATCHES
}

pub(crate) const fn default_max_list_restarts() -> usize {
    DEFAULT_MAX_LIST_RESTARTS
}

pub(crate) fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

pub(crate) const fn default_log_format() -> LogFormat {
    LogFormat::Json
}
