//! Drag-and-drop interaction bookkeeping.
//!
//! This module contains:
//! - `session`: the single in-flight drag
//! - `payload`: the text form of a drag at the drop boundary
//! - `resolver`: pointer position to destination index
//! - `hover`: saturating enter/leave counter for drop targets

mod hover;
pub mod payload;
pub mod resolver;
mod session;

pub use hover::HoverCounter;
pub use resolver::{CardBounds, DropResolution};
pub use session::{DragCoordinator, DragSession};
