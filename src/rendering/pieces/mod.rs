//! Chess pieces rendering module
//!
//! Draws resting pieces, the setup-mode piece box and the dragged piece.

pub mod pieces;

// Re-export all public items
pub use pieces::*;
