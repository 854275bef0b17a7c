//! Piece drawing
//!
//! Pieces are drawn from their loaded image, scaled to the square. Until an
//! image arrives (or when it failed to load) a piece is drawn as an inset
//! tile in its side's color with the role letter on top.

use crate::assets::AssetStore;
use crate::game::piece_box::PieceBox;
use crate::rendering::layout::{Cell, DisplayCell, Layout};
use crate::rendering::palette::Palette;
use crate::rendering::surface::{Rect, Surface};
use board_rules::{Piece, Position, Square};

/// Draw `piece` scaled into `dst`, never touching pixels outside `clip`
pub fn draw_piece<S: Surface>(
    surface: &mut S,
    assets: &AssetStore<S::Image>,
    palette: &Palette,
    piece: Piece,
    dst: Rect,
    clip: Option<Rect>,
) {
    if let Some(image) = assets.piece(piece) {
        surface.draw_image(image, dst, clip);
        return;
    }

    let inset = dst.width.min(dst.height) / 8;
    let tile = Rect::new(
        dst.x + inset as i32,
        dst.y + inset as i32,
        dst.width.saturating_sub(2 * inset),
        dst.height.saturating_sub(2 * inset),
    );
    let visible = match clip {
        Some(clip) => tile.intersect(&clip),
        None => Some(tile),
    };
    let Some(visible) = visible else {
        return;
    };
    surface.fill_rect(visible, palette.piece(piece.color));

    let font_px = dst.height / 2;
    let x = dst.x + (dst.width / 2) as i32 - (font_px / 4) as i32;
    let y = dst.y + (dst.height / 2) as i32 + (font_px / 3) as i32;
    if clip.map_or(true, |c| c.contains(x, y)) {
        surface.fill_text(
            &piece.role.letter().to_ascii_uppercase().to_string(),
            x,
            y,
            font_px,
            palette.piece(piece.color.opposite()),
        );
    }
}

/// Draw every piece on the board except the one on `skip`
pub fn draw_board_pieces<S: Surface>(
    surface: &mut S,
    layout: &Layout,
    palette: &Palette,
    assets: &AssetStore<S::Image>,
    position: &Position,
    skip: Option<Square>,
) {
    for (row, cells) in position.grid.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            let (Some(piece), Some(square)) = (cell, Square::new(row as u8, col as u8)) else {
                continue;
            };
            if skip == Some(square) {
                continue;
            }
            draw_piece(
                surface,
                assets,
                palette,
                *piece,
                layout.square_rect(square),
                None,
            );
        }
    }
}

/// Draw the piece box contents under the board
pub fn draw_piece_box<S: Surface>(
    surface: &mut S,
    layout: &Layout,
    palette: &Palette,
    assets: &AssetStore<S::Image>,
    piece_box: &PieceBox,
) {
    for (row, col, piece) in piece_box.iter() {
        let rect = layout.cell_rect(layout.display_for(Cell::PieceBox { row, col }));
        draw_piece(surface, assets, palette, piece, rect, None);
    }
}

/// Draw `piece` filling a display cell
pub fn draw_piece_at<S: Surface>(
    surface: &mut S,
    layout: &Layout,
    palette: &Palette,
    assets: &AssetStore<S::Image>,
    piece: Piece,
    display: DisplayCell,
) {
    draw_piece(surface, assets, palette, piece, layout.cell_rect(display), None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetKey;
    use crate::core::state::BoardMode;
    use crate::rendering::palette::Rgba;
    use crate::rendering::raster::{Raster, RasterImage};
    use board_rules::{Color, Role};

    #[test]
    fn test_flat_piece_is_inset_tile() {
        let palette = Palette::default();
        let mut raster = Raster::new(40, 40);
        let piece = Piece::new(Color::Black, Role::Rook);
        draw_piece(&mut raster, &AssetStore::new(), &palette, piece, Rect::new(0, 0, 40, 40), None);

        assert_eq!(raster.pixel(2, 2), Some(Rgba::TRANSPARENT));
        assert_eq!(raster.pixel(20, 20), Some(palette.black_piece));
        assert_eq!(raster.text_runs()[0].text, "R");
    }

    #[test]
    fn test_piece_image_is_clipped() {
        let mut assets = AssetStore::new();
        let piece = Piece::new(Color::White, Role::Queen);
        let gold = Rgba::rgb(200, 170, 0);
        assets.insert(AssetKey::Piece(piece), RasterImage::solid(45, 45, gold));

        let mut raster = Raster::new(40, 40);
        draw_piece(
            &mut raster,
            &assets,
            &Palette::default(),
            piece,
            Rect::new(0, 10, 40, 40),
            Some(Rect::new(0, 0, 40, 30)),
        );
        assert_eq!(raster.pixel(5, 29), Some(gold));
        assert_eq!(raster.pixel(5, 30), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_skip_leaves_square_empty() {
        let layout = Layout::new(10, BoardMode::Play);
        let palette = Palette::default();
        let mut raster = Raster::new(80, 80);
        let e2: Square = "e2".parse().unwrap();
        draw_board_pieces(&mut raster, &layout, &palette, &AssetStore::new(), &Position::start(), Some(e2));

        assert_eq!(raster.pixel(45, 65), Some(Rgba::TRANSPARENT), "e2 skipped");
        assert_eq!(raster.pixel(35, 65), Some(palette.white_piece), "d2 drawn");
    }

    #[test]
    fn test_piece_box_drawn_below_board() {
        let layout = Layout::new(10, BoardMode::Setup);
        let palette = Palette::default();
        let mut raster = Raster::new(80, 100);
        draw_piece_box(&mut raster, &layout, &palette, &AssetStore::new(), &PieceBox::new());

        assert_eq!(raster.pixel(5, 85), Some(palette.white_piece));
        assert_eq!(raster.pixel(5, 95), Some(palette.black_piece));
        assert_eq!(raster.pixel(75, 95), Some(Rgba::TRANSPARENT));
    }
}
