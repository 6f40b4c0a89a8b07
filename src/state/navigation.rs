//! Navigation-related state types.

/// Specifying the interaction modes of the board screen.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Mode {
    /// Browsing and moving cards
    Board,
    /// Typing into the search bar
    Search,
    /// Composer modal is open
    Compose,
    /// Delete confirmation modal is open
    ConfirmDelete,
}

/// Horizontal or vertical step for keyboard navigation and moves.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}
