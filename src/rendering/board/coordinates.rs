//! Rank and file labels
//!
//! Rank numbers sit in the top-left corner of the display column 0 squares,
//! file letters in the bottom-right corner of the display row 7 squares.
//! Labels follow the orientation and are drawn in the opposite square color
//! so they stay readable. Sizes scale from a 55px reference square.

use crate::rendering::layout::{Cell, DisplayCell, Layout};
use crate::rendering::palette::Palette;
use crate::rendering::surface::Surface;
use board_rules::Square;

use super::squares::is_light_cell;

/// Reference square size the label metrics are designed for
const REFERENCE_SQUARE: u32 = 55;

pub fn label_font_px(square_size: u32) -> u32 {
    square_size * 12 / REFERENCE_SQUARE
}

pub fn draw_labels<S: Surface>(surface: &mut S, layout: &Layout, palette: &Palette) {
    let s = layout.square_size();
    let font_px = label_font_px(s);
    let margin_top = (s * 11 / REFERENCE_SQUARE) as i32;
    let margin_left = (s * 8 / REFERENCE_SQUARE) as i32;
    let s = s as i32;

    for row in 0..8u8 {
        let display = DisplayCell { row, col: 0 };
        let Some(square) = layout.cell_for(display).and_then(board_square) else {
            continue;
        };
        surface.fill_text(
            &square.rank_number().to_string(),
            2,
            i32::from(row) * s + margin_top,
            font_px,
            palette.square(!is_light_cell(display)),
        );
    }

    for col in 0..8u8 {
        let display = DisplayCell { row: 7, col };
        let Some(square) = layout.cell_for(display).and_then(board_square) else {
            continue;
        };
        surface.fill_text(
            &square.file_char().to_string(),
            i32::from(col) * s + s - margin_left,
            8 * s - 2,
            font_px,
            palette.square(!is_light_cell(display)),
        );
    }
}

fn board_square(cell: Cell) -> Option<Square> {
    match cell {
        Cell::Board(square) => Some(square),
        Cell::PieceBox { .. } => None,
    }
}
