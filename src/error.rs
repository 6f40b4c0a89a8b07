//! Application-wide error types.
//!
//! Each module owns its error enum; `AppError` gathers the ones that can
//! abort startup or shutdown.

pub use crate::board::BoardError;
pub use crate::config::ConfigError;
pub use crate::persistence::PersistenceError;

/// Main application error type.
///
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Board storage error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Intent the board engine refused
    #[error("Board error: {0}")]
    Board(#[from] BoardError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The global logger could not be installed
    #[error("Logger error: {0}")]
    Logger(String),
}

/// Convenience type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
