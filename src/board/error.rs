//! Board engine error types.
//!
//! None of these are fatal. Every variant describes why an intent was
//! treated as a no-op; the board is left exactly as it was.

use super::model::{ColumnId, TaskId};

/// Reasons an intent did not change the board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// The referenced column does not exist
    #[error("Column not found: {0}")]
    ColumnNotFound(ColumnId),

    /// The referenced task does not exist
    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    /// The task exists but is not a member of the given column
    #[error("Task {task} is not in column {column}")]
    TaskNotInColumn { task: TaskId, column: ColumnId },

    /// A task with the same id already exists
    #[error("Task already exists: {0}")]
    DuplicateTask(TaskId),

    /// A drop payload could not be parsed or lacked required fields
    #[error("Malformed drag payload: {0}")]
    MalformedDragPayload(String),

    /// Task text was empty after trimming
    #[error("Task content must not be empty")]
    EmptyContent,
}
