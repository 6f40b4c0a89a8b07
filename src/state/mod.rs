//! Application state management module.
//!
//! This module contains the interactive state wrapped around the board store:
//! - Main `State` struct: selection, search, composer, drag and hover tracking
//! - Interaction modes and navigation directions
//! - The task composer
//! - Rendered board geometry used for pointer hit-testing

mod form;
mod layout;
mod navigation;

pub use form::{Composer, ComposerTarget};
pub use layout::{BoardLayout, CardLayout, ColumnLayout};
pub use navigation::{Direction, Mode};

#[path = "state_impl.rs"]
mod state_impl;

pub use state_impl::State;
