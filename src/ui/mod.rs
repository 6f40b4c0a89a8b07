//! User interface module.
//!
//! This module handles all UI rendering using the `ratatui` library, including:
//! - Board columns and cards, with drop-target highlighting during drags
//! - Search bar, footer hints and the log panel
//! - Composer and delete confirmation modals
//! - Theme management

type Frame<'a> = ratatui::Frame<'a>;

mod render;
mod theme;
mod widgets;

pub use render::render;
pub use theme::{ColorSpec, Theme};
