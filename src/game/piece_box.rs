//! Setup-mode piece reserve
//!
//! A 2×8 grid drawn under the board while in setup mode. Row 0 holds one of
//! each white piece, row 1 one of each black piece; the last two cells of
//! each row are empty. Dragging out of the box places a copy, so the box is
//! never depleted.

use board_rules::{Color, Piece, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceBox {
    cells: [[Option<Piece>; 8]; 2],
}

impl Default for PieceBox {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceBox {
    pub fn new() -> Self {
        let mut cells = [[None; 8]; 2];
        for (row, color) in [Color::White, Color::Black].into_iter().enumerate() {
            for (col, role) in Role::BOX_ORDER.into_iter().enumerate() {
                cells[row][col] = Some(Piece::new(color, role));
            }
        }
        Self { cells }
    }

    /// Piece at a box cell; `None` for empty or out-of-range cells
    pub fn get(&self, row: u8, col: u8) -> Option<Piece> {
        self.cells
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .copied()
            .flatten()
    }

    /// Occupied cells as `(row, col, piece)`
    pub fn iter(&self) -> impl Iterator<Item = (u8, u8, Piece)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(col, cell)| cell.map(|p| (row as u8, col as u8, p)))
        })
    }
}
