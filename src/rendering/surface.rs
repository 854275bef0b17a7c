//! The 2D drawing surface the pipeline renders into
//!
//! A host supplies two surfaces per board: the snapshot (fully composed
//! board) and the live surface (what the user sees). Both implement
//! [`Surface`]. The crate ships [`Raster`](crate::rendering::raster::Raster),
//! an in-memory implementation; the web host implements it over a canvas.

use crate::rendering::palette::Rgba;

/// Axis-aligned pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add_unsigned(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add_unsigned(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Overlap of two rectangles, `None` when they do not overlap
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= x || bottom <= y {
            return None;
        }
        Some(Rect::new(x, y, (right - x) as u32, (bottom - y) as u32))
    }
}

/// Drawing operations the board needs from a host
pub trait Surface {
    /// Decoded image type (piece and square artwork)
    type Image;

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Change dimensions. Contents are cleared.
    fn resize(&mut self, width: u32, height: u32);

    /// Make a region fully transparent
    fn clear_rect(&mut self, rect: Rect);

    /// Fill a region, blending by the color's alpha
    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    /// Draw `image` scaled into `dst`, only touching pixels inside `clip`
    fn draw_image(&mut self, image: &Self::Image, dst: Rect, clip: Option<Rect>);

    /// Draw text with its baseline starting at (`x`, `y`)
    fn fill_text(&mut self, text: &str, x: i32, y: i32, font_px: u32, color: Rgba);

    /// Replace `region` of this surface with the same region of `source`
    fn copy_region_from(&mut self, source: &Self, region: Rect);

    /// Full extent of the surface
    fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width(), self.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, -5, 10, 10);
        assert_eq!(a.intersect(&b), Some(Rect::new(5, 0, 5, 5)));
        assert_eq!(a.intersect(&Rect::new(10, 0, 4, 4)), None, "touching edges do not overlap");
    }

    #[test]
    fn test_contains() {
        let r = Rect::new(-2, 3, 4, 2);
        assert!(r.contains(-2, 3));
        assert!(r.contains(1, 4));
        assert!(!r.contains(2, 4));
        assert!(!r.contains(0, 5));
    }
}
