//! Board geometry and orientation
//!
//! Device pixels map to *display cells* by integer division by the square
//! size. Display rows 0..8 are the board band; in setup mode rows 8 and 9
//! hold the piece box. Display cells map to grid [`Cell`]s through the
//! orientation: with black at the bottom both board indices become
//! `7 - index`. The piece box is always drawn unflipped.

use crate::core::state::BoardMode;
use crate::rendering::surface::Rect;
use board_rules::Square;

/// A cell in screen terms: row 0 is the top of the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayCell {
    pub row: u8,
    pub col: u8,
}

impl DisplayCell {
    pub fn is_board(self) -> bool {
        self.row < 8
    }
}

/// A cell in model terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Board(Square),
    PieceBox { row: u8, col: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    square_size: u32,
    rows: u32,
    white_down: bool,
}

impl Layout {
    pub fn new(square_size: u32, mode: BoardMode) -> Self {
        Self {
            square_size,
            rows: mode.rows(),
            white_down: true,
        }
    }

    pub fn square_size(&self) -> u32 {
        self.square_size
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn white_down(&self) -> bool {
        self.white_down
    }

    pub fn set_square_size(&mut self, square_size: u32) {
        self.square_size = square_size;
    }

    pub fn set_mode(&mut self, mode: BoardMode) {
        self.rows = mode.rows();
    }

    pub fn flip(&mut self) {
        self.white_down = !self.white_down;
    }

    /// Surface dimensions as (width, height)
    pub fn surface_size(&self) -> (u32, u32) {
        (self.square_size * 8, self.square_size * self.rows)
    }

    /// The 8×8 band
    pub fn board_rect(&self) -> Rect {
        Rect::new(0, 0, self.square_size * 8, self.square_size * 8)
    }

    fn orient(&self, index: u8) -> u8 {
        if self.white_down {
            index
        } else {
            7 - index
        }
    }

    /// Display cell under a device coordinate; `None` off the surface
    pub fn display_cell_at(&self, x: i32, y: i32) -> Option<DisplayCell> {
        if self.square_size == 0 || x < 0 || y < 0 {
            return None;
        }
        let s = self.square_size as i32;
        let (row, col) = (y / s, x / s);
        if col >= 8 || row >= self.rows as i32 {
            return None;
        }
        Some(DisplayCell {
            row: row as u8,
            col: col as u8,
        })
    }

    pub fn cell_for(&self, display: DisplayCell) -> Option<Cell> {
        if display.is_board() {
            Square::new(self.orient(display.row), self.orient(display.col)).map(Cell::Board)
        } else {
            Some(Cell::PieceBox {
                row: display.row - 8,
                col: display.col,
            })
        }
    }

    /// Grid cell under a device coordinate
    pub fn cell_at(&self, x: i32, y: i32) -> Option<Cell> {
        self.display_cell_at(x, y).and_then(|d| self.cell_for(d))
    }

    pub fn display_for_square(&self, square: Square) -> DisplayCell {
        DisplayCell {
            row: self.orient(square.row()),
            col: self.orient(square.col()),
        }
    }

    pub fn display_for(&self, cell: Cell) -> DisplayCell {
        match cell {
            Cell::Board(square) => self.display_for_square(square),
            Cell::PieceBox { row, col } => DisplayCell { row: row + 8, col },
        }
    }

    pub fn cell_rect(&self, display: DisplayCell) -> Rect {
        let s = self.square_size;
        Rect::new(
            (u32::from(display.col) * s) as i32,
            (u32::from(display.row) * s) as i32,
            s,
            s,
        )
    }

    pub fn square_rect(&self, square: Square) -> Rect {
        self.cell_rect(self.display_for_square(square))
    }

    /// Center of a square in device pixels
    pub fn square_center(&self, square: Square) -> (i32, i32) {
        let rect = self.square_rect(square);
        let half = (self.square_size / 2) as i32;
        (rect.x + half, rect.y + half)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn test_white_down_mapping() {
        let layout = Layout::new(40, BoardMode::Play);
        assert_eq!(layout.cell_at(180, 260), Some(Cell::Board(sq("e2"))));
        assert_eq!(layout.cell_at(0, 0), Some(Cell::Board(sq("a8"))));
        assert_eq!(layout.square_center(sq("e2")), (180, 260));
    }

    #[test]
    fn test_flipped_mapping() {
        let mut layout = Layout::new(40, BoardMode::Play);
        layout.flip();
        assert_eq!(layout.cell_at(0, 0), Some(Cell::Board(sq("h1"))));
        assert_eq!(layout.cell_at(180, 260), Some(Cell::Board(sq("d7"))));
    }

    #[test]
    fn test_flip_is_involution() {
        let mut layout = Layout::new(40, BoardMode::Play);
        let before: Vec<_> = (0..8).map(|i| layout.cell_at(i * 40 + 5, i * 37)).collect();
        layout.flip();
        layout.flip();
        let after: Vec<_> = (0..8).map(|i| layout.cell_at(i * 40 + 5, i * 37)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_out_of_range_coordinates() {
        let layout = Layout::new(40, BoardMode::Play);
        assert_eq!(layout.cell_at(-1, 10), None);
        assert_eq!(layout.cell_at(10, -1), None);
        assert_eq!(layout.cell_at(320, 10), None);
        assert_eq!(layout.cell_at(10, 320), None, "no piece box rows in play mode");
        assert_eq!(Layout::new(0, BoardMode::Play).cell_at(0, 0), None);
    }

    #[test]
    fn test_piece_box_is_never_flipped() {
        let mut layout = Layout::new(40, BoardMode::Setup);
        layout.flip();
        assert_eq!(layout.cell_at(5, 325), Some(Cell::PieceBox { row: 0, col: 0 }));
        assert_eq!(layout.cell_at(315, 395), Some(Cell::PieceBox { row: 1, col: 7 }));
        assert_eq!(layout.surface_size(), (320, 400));
    }
}
