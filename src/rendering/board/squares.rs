//! Square drawing
//!
//! Each square uses the configured square image when one is loaded and the
//! flat palette color otherwise. Color is decided on display coordinates;
//! flipping the board preserves square parity, so a1 stays dark either way.

use crate::assets::AssetStore;
use crate::rendering::layout::{DisplayCell, Layout};
use crate::rendering::palette::Palette;
use crate::rendering::surface::Surface;

pub fn is_light_cell(display: DisplayCell) -> bool {
    (display.row + display.col) % 2 == 0
}

/// Draw one board square
pub fn draw_square<S: Surface>(
    surface: &mut S,
    layout: &Layout,
    palette: &Palette,
    assets: &AssetStore<S::Image>,
    display: DisplayCell,
) {
    let rect = layout.cell_rect(display);
    let light = is_light_cell(display);
    match assets.square(light) {
        Some(image) => surface.draw_image(image, rect, None),
        None => surface.fill_rect(rect, palette.square(light)),
    }
}

/// Draw all 64 squares of the board band
pub fn draw_squares<S: Surface>(
    surface: &mut S,
    layout: &Layout,
    palette: &Palette,
    assets: &AssetStore<S::Image>,
) {
    for row in 0..8 {
        for col in 0..8 {
            draw_square(surface, layout, palette, assets, DisplayCell { row, col });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::BoardMode;
    use crate::rendering::raster::{Raster, RasterImage};
    use crate::rendering::palette::Rgba;
    use crate::assets::AssetKey;

    #[test]
    fn test_flat_squares() {
        let layout = Layout::new(10, BoardMode::Play);
        let palette = Palette::default();
        let mut raster = Raster::new(80, 80);
        draw_squares(&mut raster, &layout, &palette, &AssetStore::new());

        assert_eq!(raster.pixel(0, 0), Some(palette.light), "a8 is light");
        assert_eq!(raster.pixel(15, 5), Some(palette.dark));
        assert_eq!(raster.pixel(5, 75), Some(palette.dark), "a1 is dark");
    }

    #[test]
    fn test_square_image_replaces_fill() {
        let layout = Layout::new(10, BoardMode::Play);
        let mut assets = AssetStore::new();
        let wood = Rgba::rgb(120, 80, 40);
        assets.insert(AssetKey::DarkSquare, RasterImage::solid(55, 55, wood));

        let mut raster = Raster::new(80, 80);
        draw_squares(&mut raster, &layout, &Palette::default(), &assets);
        assert_eq!(raster.pixel(15, 5), Some(wood));
        assert_eq!(raster.pixel(5, 5), Some(Palette::default().light));
    }
}
