//! Error types for configuration loading and validation

use std::path::PathBuf;

use crate::dom::DomError;

/// Errors raised while loading or validating a `ScrapeConfig`
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// One of the configured region selectors is not valid CSS
    #[error("Invalid selector for {field}")]
    InvalidSelector {
        field: &'static str,
        #[source]
        source: DomError,
    },

    /// A timeout was configured as zero
    #[error("{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },

    /// The canonical metadata delimiter is empty
    #[error("metadata_delimiter must not be empty")]
    EmptyDelimiter,

    /// The config file could not be read
    #[error("Failed to read config file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for `ScrapeConfig`
    #[error("Failed to parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
