//! Board state engine.
//!
//! This module contains the board data model and its mutations:
//! - `model`: tasks, columns, the board and its invariants
//! - `sequence`: the remove-then-insert primitives behind every move
//! - `reducer`: the four board intents as pure transitions
//! - `store`: the owner of the current board
//! - `filter`: search filtering as a read-only view

mod error;
pub mod filter;
mod model;
pub mod reducer;
pub mod sequence;
mod store;

pub use error::BoardError;
pub use model::{Board, Column, ColumnId, Task, TaskId};
pub use reducer::Intent;
pub use store::Store;
