//! Hover highlight for the square under a dragged piece
//!
//! Only ever drawn on the live surface; the next partial restore or full
//! snapshot removes it.

use crate::rendering::board::is_light_cell;
use crate::rendering::layout::{DisplayCell, Layout};
use crate::rendering::palette::Palette;
use crate::rendering::surface::Surface;

pub fn draw_hover<S: Surface>(
    surface: &mut S,
    layout: &Layout,
    palette: &Palette,
    display: DisplayCell,
) {
    surface.fill_rect(
        layout.cell_rect(display),
        palette.hover(is_light_cell(display)),
    );
}
