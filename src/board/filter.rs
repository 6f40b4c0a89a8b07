//! Search filtering as a read-only view over the board.
//!
//! Nothing here mutates the board. Rendered positions under a filter are
//! mapped back to `task_ids` positions before any move is dispatched.

use super::model::{Board, ColumnId, Task, TaskId};

/// Return true if the task matches the search term (case-insensitive
/// substring). An empty term matches everything.
///
pub fn matches(task: &Task, term: &str) -> bool {
    let term = term.trim();
    term.is_empty() || task.content.to_lowercase().contains(&term.to_lowercase())
}

/// Return the tasks of a column that match the search term, in column
/// order.
///
pub fn visible_tasks<'a>(board: &'a Board, column_id: &ColumnId, term: &str) -> Vec<&'a Task> {
    board
        .column_tasks(column_id)
        .into_iter()
        .filter(|task| matches(task, term))
        .collect()
}

/// Translate a drop slot among the rendered (possibly filtered) cards into
/// an index in the full `task_ids` sequence.
///
/// A slot before a rendered card maps to that card's position. The slot
/// after the last rendered card maps to just past that card, or to the end
/// of the column when nothing is rendered.
///
pub fn slot_to_sequence_index(task_ids: &[TaskId], rendered: &[TaskId], slot: usize) -> usize {
    let position = |id: &TaskId| task_ids.iter().position(|t| t == id);
    if let Some(idx) = rendered.get(slot).and_then(position) {
        return idx;
    }
    match rendered.last().and_then(position) {
        Some(idx) => idx + 1,
        None => task_ids.len(),
    }
}
