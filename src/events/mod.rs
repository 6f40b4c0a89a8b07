//! Event handling module.
//!
//! Terminal events (keys, mouse, resize) are polled on a separate thread and
//! routed into the interactive state.

pub mod terminal;
