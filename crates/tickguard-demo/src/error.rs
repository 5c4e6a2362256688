//! Demo-level error types.

use thiserror::Error;

/// Errors raised while loading or validating a demo configuration.
#[derive(Debug, Error)]
pub enum DemoError {
    /// The configuration file could not be read.
    #[error("failed to read config file '{path}': {source}")]
    ConfigRead {
        /// Path that was attempted.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for
    /// [`DemoConfig`](crate::scenario::DemoConfig).
    #[error("failed to parse config file '{path}': {source}")]
    ConfigParse {
        /// Path that was attempted.
        path: String,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
