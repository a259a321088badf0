//! Error types for the search controller.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by an injected [`Lookup`](crate::Lookup).
///
/// The controller never surfaces these to the rendering layer; a failed
/// lookup degrades to an empty, closed result list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The lookup backend reported a failure.
    #[error("Lookup failed: {0}")]
    Failed(String),

    /// The lookup did not settle in time.
    #[error("Lookup timed out after {0}ms")]
    Timeout(u64),

    /// The lookup backend is not reachable.
    #[error("Lookup backend unavailable: {0}")]
    Unavailable(String),
}

impl LookupError {
    /// Shorthand for [`LookupError::Failed`].
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }
}

/// Errors raised while configuring the controller.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Configuration value out of range.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for the expected schema.
    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, SearchError>;
