use crate::board::{ColumnId, TaskId};
use log::*;

/// A drag in flight: which task, and where it was picked up.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub task_id: TaskId,
    pub source_column_id: ColumnId,
    pub source_index: usize,
}

/// Holds at most one drag session.
///
#[derive(Debug, Default)]
pub struct DragCoordinator {
    session: Option<DragSession>,
}

impl DragCoordinator {
    pub fn new() -> Self {
        DragCoordinator::default()
    }

    /// Start a drag. Any session already in progress is discarded.
    ///
    pub fn begin(&mut self, task_id: TaskId, source_column_id: ColumnId, source_index: usize) -> &DragSession {
        if let Some(stale) = &self.session {
            debug!("Discarding stale drag of task {}", stale.task_id);
        }
        debug!(
            "Drag started for task {} from column {} at index {}",
            task_id, source_column_id, source_index
        );
        self.session.insert(DragSession {
            task_id,
            source_column_id,
            source_index,
        })
    }

    /// Clear the session, returning it if one was active.
    ///
    pub fn end(&mut self) -> Option<DragSession> {
        self.session.take()
    }

    /// Return the active session, if any.
    ///
    pub fn current(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }
}
