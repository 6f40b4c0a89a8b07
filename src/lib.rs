//! A terminal kanban board with drag-and-drop task ordering.
//!
//! The board engine (`board`) and drag pipeline (`drag`) are pure; the
//! interactive layers (`state`, `events`, `ui`, `app`) drive them from the
//! terminal, and `persistence` keeps the board on disk.

pub mod app;
pub mod board;
pub mod config;
pub mod drag;
pub mod error;
pub mod events;
pub mod logger;
pub mod persistence;
pub mod state;
pub mod ui;
