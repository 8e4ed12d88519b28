//! Structured logging setup.
//!
//! Engine crates only emit `tracing` events. Embedders call [`initialise`]
//! once to route them to stderr in the configured [`LogFormat`].

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use tracing::{Subscriber, subscriber::SetGlobalDefaultError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

use crate::engine::EngineConfig;
use crate::logging::LogFormat;

static INSTALLED: OnceCell<LogFormat> = OnceCell::new();

/// Proof that the global subscriber is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryHandle {
    format: LogFormat,
}

impl TelemetryHandle {
    /// Returns the format of the installed subscriber.
    #[must_use]
    pub const fn format(self) -> LogFormat {
        self.format
    }
}

/// Errors encountered while configuring telemetry.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The configured log filter expression does not parse.
    #[error("invalid log filter {filter:?}: {message}")]
    Filter {
        /// Filter text as configured.
        filter: String,
        /// Parser diagnostic.
        message: String,
    },
    /// Another global subscriber is already installed.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(#[from] SetGlobalDefaultError),
}

/// Installs the global subscriber described by `config`.
///
/// Only the first call installs anything. Later calls return a handle for
/// the subscriber already in place, whatever their configuration says.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] for an invalid filter directive and
/// [`TelemetryError::Subscriber`] when a subscriber was installed by other
/// means.
pub fn initialise(config: &EngineConfig) -> Result<TelemetryHandle, TelemetryError> {
    INSTALLED
        .get_or_try_init(|| {
            tracing::subscriber::set_global_default(build_subscriber(config)?)?;
            Ok::<_, TelemetryError>(config.log_format())
        })
        .map(|format| TelemetryHandle { format: *format })
}

/// Builds, without installing, the subscriber described by `config`.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] for an invalid filter directive.
pub fn build_subscriber(
    config: &EngineConfig,
) -> Result<Box<dyn Subscriber + Send + Sync>, TelemetryError> {
    let filter = EnvFilter::try_new(config.log_filter()).map_err(|error| {
        TelemetryError::Filter {
            filter: config.log_filter().to_owned(),
            message: error.to_string(),
        }
    })?;
    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_timer(fmt::time::UtcTime::rfc_3339());
    Ok(match config.log_format() {
        LogFormat::Json => Box::new(builder.json().flatten_event(true).finish()),
        LogFormat::Compact => Box::new(builder.compact().finish()),
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(LogFormat::Json)]
    #[case(LogFormat::Compact)]
    fn subscribers_build_for_every_format(#[case] format: LogFormat) {
        let config = EngineConfig::default()
            .with_log_filter("gopat=debug")
            .with_log_format(format);
        let subscriber = build_subscriber(&config).expect("subscriber");
        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!(matches = 1, "emitted through the scoped subscriber");
        });
    }

    #[test]
    fn invalid_filter_is_reported() {
        let config = EngineConfig::default().with_log_filter("gopat=verbose");
        let Err(TelemetryError::Filter { filter, .. }) = build_subscriber(&config) else {
            panic!("expected a filter error");
        };
        assert_eq!(filter, "gopat=verbose");
    }

    #[test]
    fn repeated_initialisation_keeps_the_first_format() {
        let first = initialise(&EngineConfig::default().with_log_format(LogFormat::Compact))
            .expect("first initialisation");
        let second = initialise(&EngineConfig::default().with_log_format(LogFormat::Json))
            .expect("second initialisation");
        assert_eq!(first, second);
        assert_eq!(second.format(), LogFormat::Compact);
    }
}
