//! Persistence-specific error types.

use std::path::PathBuf;

/// Errors that can occur while reading or writing the board file.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// Failed to read the board file
    #[error("Failed to read board from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write the board file
    #[error("Failed to write board to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to create the board file's directory
    #[error("Failed to create directory {path}: {source}")]
    CreateDirectoryFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Board file contents were not a valid board document
    #[error("Failed to deserialize board: {0}")]
    DeserializationFailed(String),

    /// Board could not be serialized
    #[error("Failed to serialize board: {0}")]
    SerializationFailed(String),
}
