//! Visual effects module
//!
//! Last move highlighting and the hover highlight shown while dragging.

pub mod hover;
pub mod last_move;

// Re-export all public items
pub use hover::*;
pub use last_move::*;
