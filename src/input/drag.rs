//! Drag session state
//!
//! A [`DragSession`] exists from a qualifying pointer-down until the
//! pointer is released or the gesture is cancelled. It is never persisted.

use crate::rendering::layout::{Cell, DisplayCell};
use board_rules::Piece;

/// An active drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    /// Board square or piece box cell the piece came from
    pub source: Cell,
    pub piece: Piece,
    /// Latest pointer position in surface pixels
    pub pointer: (i32, i32),
    /// The piece has left its source square on the live surface
    pub lifted: bool,
    /// Board cell around which the drag image was last drawn
    pub painted: Option<DisplayCell>,
}

impl DragSession {
    pub fn new(source: Cell, piece: Piece, pointer: (i32, i32), at: Option<DisplayCell>) -> Self {
        Self {
            source,
            piece,
            pointer,
            lifted: false,
            painted: at.filter(|d| d.is_board()),
        }
    }
}
