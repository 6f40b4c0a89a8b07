//! Rendered geometry of the board, recorded by the renderer each frame so
//! pointer events can be mapped back onto columns and cards.

use crate::board::{ColumnId, TaskId};
use crate::drag::CardBounds;
use ratatui::layout::Rect;

/// One rendered card.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardLayout {
    pub task_id: TaskId,
    pub area: Rect,
}

/// One rendered column: its whole area and its cards in rendered order.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub column_id: ColumnId,
    pub area: Rect,
    pub cards: Vec<CardLayout>,
}

impl ColumnLayout {
    /// Vertical bounds of the rendered cards, for the drop resolver.
    ///
    pub fn card_bounds(&self) -> Vec<CardBounds> {
        self.cards
            .iter()
            .map(|card| CardBounds::new(f64::from(card.area.y), f64::from(card.area.height)))
            .collect()
    }

    /// Ids of the rendered cards in order.
    ///
    pub fn rendered_ids(&self) -> Vec<TaskId> {
        self.cards.iter().map(|card| card.task_id.clone()).collect()
    }
}

/// Geometry of every rendered column.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardLayout {
    pub columns: Vec<ColumnLayout>,
}

fn contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x.saturating_add(area.width) && y >= area.y && y < area.y.saturating_add(area.height)
}

impl BoardLayout {
    pub fn column(&self, column_id: &ColumnId) -> Option<&ColumnLayout> {
        self.columns.iter().find(|c| &c.column_id == column_id)
    }

    /// Return the column whose area contains the point.
    ///
    pub fn column_at(&self, x: u16, y: u16) -> Option<&ColumnLayout> {
        self.columns.iter().find(|c| contains(c.area, x, y))
    }

    /// Return the card under the point with its rendered position.
    ///
    pub fn card_at(&self, x: u16, y: u16) -> Option<(&ColumnLayout, usize)> {
        let column = self.column_at(x, y)?;
        column
            .cards
            .iter()
            .position(|card| contains(card.area, x, y))
            .map(|idx| (column, idx))
    }
}
