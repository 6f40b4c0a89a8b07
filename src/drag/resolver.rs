//! Turn a pointer position at drop time into a destination index.

use super::session::DragSession;
use crate::board::{ColumnId, TaskId};

/// Vertical extent of one rendered card.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardBounds {
    pub top: f64,
    pub height: f64,
}

impl CardBounds {
    pub fn new(top: f64, height: f64) -> Self {
        CardBounds { top, height }
    }

    pub fn midpoint(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Result of resolving a drop.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropResolution {
    /// Dispatch a move to this index of the destination column
    Move { dest_index: usize },
    /// The card would land where it already is; dispatch nothing
    NoOp,
}

/// Return the index of the first card whose midpoint lies strictly below the
/// pointer, or the number of cards when there is none. A pointer exactly on
/// a midpoint does not qualify that card.
///
pub fn raw_drop_index(pointer_y: f64, cards: &[CardBounds]) -> usize {
    cards
        .iter()
        .position(|card| pointer_y < card.midpoint())
        .unwrap_or(cards.len())
}

/// Apply the same-column offset correction to a raw index and decide
/// whether the drop changes anything.
///
pub fn correct_for_source(session: &DragSession, dest_column_id: &ColumnId, raw_index: usize) -> DropResolution {
    if &session.source_column_id != dest_column_id {
        return DropResolution::Move {
            dest_index: raw_index,
        };
    }
    let dest_index = if raw_index > session.source_index {
        raw_index - 1
    } else {
        raw_index
    };
    if dest_index == session.source_index {
        DropResolution::NoOp
    } else {
        DropResolution::Move { dest_index }
    }
}

/// Return true if a drop at `slot` among the rendered cards of
/// `dest_column_id` puts the dragged card right before or right after its
/// own rendered position. Hidden cards do not count, so a filtered in-place
/// drop is caught before the slot becomes a `task_ids` index.
///
pub fn lands_in_place(session: &DragSession, dest_column_id: &ColumnId, rendered: &[TaskId], slot: usize) -> bool {
    if &session.source_column_id != dest_column_id {
        return false;
    }
    rendered
        .iter()
        .position(|id| id == &session.task_id)
        .map_or(false, |own| slot == own || slot == own + 1)
}

/// Resolve a drop onto `dest_column_id` at `pointer_y` given the rendered
/// card geometry of that column.
///
pub fn resolve_drop(
    session: &DragSession,
    dest_column_id: &ColumnId,
    pointer_y: f64,
    cards: &[CardBounds],
) -> DropResolution {
    correct_for_source(session, dest_column_id, raw_drop_index(pointer_y, cards))
}
