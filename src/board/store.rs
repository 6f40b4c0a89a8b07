use super::error::BoardError;
use super::model::Board;
use super::reducer::{apply, Intent};
use log::*;

/// Owns the current board. The only write path is [`Store::dispatch`],
/// which swaps in a fully computed board or leaves the old one in place.
///
#[derive(Debug, Clone)]
pub struct Store {
    board: Board,
    revision: u64,
}

impl Default for Store {
    fn default() -> Self {
        Store::new(Board::seed())
    }
}

impl Store {
    /// Return a new store holding the given board.
    ///
    pub fn new(board: Board) -> Self {
        Store { board, revision: 0 }
    }

    /// Return a store for the board loaded at startup, or the seed board
    /// when nothing was loaded.
    ///
    pub fn from_initial(initial: Option<Board>) -> Self {
        match initial {
            Some(board) => Store::new(board),
            None => {
                info!("No stored board found, starting from the seed board.");
                Store::default()
            }
        }
    }

    /// Return the current board.
    ///
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of accepted replacements since the store was created.
    ///
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Swap in a new board wholesale.
    ///
    pub fn replace(&mut self, board: Board) -> &mut Self {
        self.board = board;
        self.revision += 1;
        self
    }

    /// Apply an intent. On error the board is untouched and the reason is
    /// returned for the caller to surface.
    ///
    pub fn dispatch(&mut self, intent: Intent) -> Result<&Board, BoardError> {
        debug!("Dispatching board intent '{:?}'...", intent);
        match apply(&self.board, &intent) {
            Ok(next) => {
                self.replace(next);
                Ok(&self.board)
            }
            Err(e) => {
                debug!("Board intent ignored: {}", e);
                Err(e)
            }
        }
    }
}
