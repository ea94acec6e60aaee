//! Error types.
//!
//! The countdown itself has no failure modes; errors only arise when loading
//! configuration from disk.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a [`crate::config::CountdownConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read countdown config at {path:?}: {source}")]
    Read {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The configuration is not valid TOML or has mistyped fields.
    #[error("failed to parse countdown config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result alias for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;
