//! Last move highlighting
//!
//! Covers the from/to squares of the last move with the translucent
//! highlight color when `highlight_last_move` is enabled.

use crate::game::model::LastMove;
use crate::rendering::layout::Layout;
use crate::rendering::palette::Palette;
use crate::rendering::surface::Surface;

pub fn draw_last_move_highlight<S: Surface>(
    surface: &mut S,
    layout: &Layout,
    palette: &Palette,
    last_move: LastMove,
) {
    surface.fill_rect(layout.square_rect(last_move.from), palette.highlight);
    // Blending twice would darken a from == to record
    if last_move.to != last_move.from {
        surface.fill_rect(layout.square_rect(last_move.to), palette.highlight);
    }
}
