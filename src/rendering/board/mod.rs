//! Board rendering module
//!
//! Draws the 64 squares and the rank/file labels onto a surface.

pub mod coordinates;
pub mod squares;

// Re-export all public items
pub use coordinates::*;
pub use squares::*;
