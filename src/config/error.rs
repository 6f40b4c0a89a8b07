//! Configuration-specific error types.

use std::path::PathBuf;

/// Errors raised while locating, reading or writing `config.yml`.
///
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `save` was called before `load` picked a file
    #[error("No configuration file has been loaded")]
    NotLoaded,

    #[error("Could not determine the home directory")]
    NoHomeDirectory,

    #[error("Could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not create directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The YAML did not match the expected keys or types
    #[error("Malformed configuration in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Could not encode configuration: {0}")]
    Encode(String),

    /// `log_level` is not one of off, error, warn, info, debug, trace
    #[error("Unknown log level '{0}'")]
    InvalidLogLevel(String),
}
