//! Configuration and telemetry for the gopat engine.
//!
//! [`EngineConfig`] carries the matching limits and logging settings; it
//! deserialises from JSON with a default for every field.
//! [`telemetry::initialise`] installs the global `tracing` subscriber
//! described by a configuration.

mod defaults;
mod engine;
mod logging;
pub mod telemetry;

pub use defaults::{DEFAULT_LOG_FILTER, DEFAULT_MAX_LIST_RESTARTS, DEFAULT_MAX_MATCHES};
pub use engine::{ConfigError, EngineConfig};
pub use logging::{LogFormat, LogFormatParseError};
