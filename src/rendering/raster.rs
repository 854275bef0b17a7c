//! In-memory RGBA surface
//!
//! [`Raster`] implements [`Surface`] over a plain pixel buffer. It backs the
//! demo binary, the benchmarks and every rendering test.
//!
//! # Text
//!
//! There is no font rasterizer. Text draws are recorded as [`TextRun`]s
//! anchored at their baseline origin; runs follow the pixels they sit on
//! (cleared by opaque fills and clears, carried by region copies).

use crate::rendering::palette::Rgba;
use crate::rendering::surface::{Rect, Surface};

/// A recorded text draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub font_px: u32,
    pub color: Rgba,
}

/// Decoded image for a [`Raster`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl RasterImage {
    /// Single-color image
    pub fn solid(width: u32, height: u32, color: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn sample(&self, u: u32, v: u32) -> Rgba {
        self.pixels[(v as usize) * (self.width as usize) + u as usize]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
    text: Vec<TextRun>,
}

impl Raster {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; (width as usize) * (height as usize)],
            text: Vec::new(),
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    pub fn text_runs(&self) -> &[TextRun] {
        &self.text
    }

    /// Binary PPM (P6) of the pixel data, alpha composited over black
    pub fn to_ppm(&self) -> Vec<u8> {
        let mut out = format!("P6\n{} {}\n255\n", self.width, self.height).into_bytes();
        out.reserve(self.pixels.len() * 3);
        for p in &self.pixels {
            let a = u16::from(p.a);
            for c in [p.r, p.g, p.b] {
                out.push(((u16::from(c) * a + 127) / 255) as u8);
            }
        }
        out
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + x as usize)
    }

    /// `rect` clipped to the raster bounds
    fn visible(&self, rect: Rect) -> Option<Rect> {
        rect.intersect(&self.bounds())
    }

    fn drop_text_in(&mut self, rect: Rect) {
        self.text.retain(|run| !rect.contains(run.x, run.y));
    }

    /// Straight-alpha source-over
    fn blend(dst: Rgba, src: Rgba) -> Rgba {
        match src.a {
            255 => src,
            0 => dst,
            a => {
                let a = u32::from(a);
                let inv = 255 - a;
                let dst_a = u32::from(dst.a);
                let out_a = a + (dst_a * inv + 127) / 255;
                if out_a == 0 {
                    return Rgba::new(0, 0, 0, 0);
                }
                let denom = out_a * 255;
                let mix = |s: u8, d: u8| {
                    let weighted = u32::from(s) * a * 255 + u32::from(d) * dst_a * inv;
                    ((weighted + denom / 2) / denom).min(255) as u8
                };
                Rgba::new(
                    mix(src.r, dst.r),
                    mix(src.g, dst.g),
                    mix(src.b, dst.b),
                    out_a.min(255) as u8,
                )
            }
        }
    }
}

impl Surface for Raster {
    type Image = RasterImage;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) {
        *self = Raster::new(width, height);
    }

    fn clear_rect(&mut self, rect: Rect) {
        let Some(area) = self.visible(rect) else {
            return;
        };
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                if let Some(i) = self.index(x, y) {
                    self.pixels[i] = Rgba::TRANSPARENT;
                }
            }
        }
        self.drop_text_in(area);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let Some(area) = self.visible(rect) else {
            return;
        };
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                if let Some(i) = self.index(x, y) {
                    self.pixels[i] = Self::blend(self.pixels[i], color);
                }
            }
        }
        if color.a == 255 {
            self.drop_text_in(area);
        }
    }

    fn draw_image(&mut self, image: &RasterImage, dst: Rect, clip: Option<Rect>) {
        if dst.is_empty() || image.width == 0 || image.height == 0 {
            return;
        }
        let mut area = match self.visible(dst) {
            Some(area) => area,
            None => return,
        };
        if let Some(clip) = clip {
            area = match area.intersect(&clip) {
                Some(area) => area,
                None => return,
            };
        }

        // Nearest-neighbour scaling
        for y in area.y..area.bottom() {
            let v = ((y - dst.y) as u64 * u64::from(image.height) / u64::from(dst.height)) as u32;
            for x in area.x..area.right() {
                let u = ((x - dst.x) as u64 * u64::from(image.width) / u64::from(dst.width)) as u32;
                if let Some(i) = self.index(x, y) {
                    self.pixels[i] = Self::blend(self.pixels[i], image.sample(u, v));
                }
            }
        }
    }

    fn fill_text(&mut self, text: &str, x: i32, y: i32, font_px: u32, color: Rgba) {
        if self.index(x, y).is_none() {
            return;
        }
        self.text.push(TextRun {
            text: text.to_string(),
            x,
            y,
            font_px,
            color,
        });
    }

    fn copy_region_from(&mut self, source: &Raster, region: Rect) {
        let Some(area) = self.visible(region).and_then(|r| r.intersect(&source.bounds())) else {
            return;
        };
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                if let (Some(dst), Some(src)) = (self.index(x, y), source.index(x, y)) {
                    self.pixels[dst] = source.pixels[src];
                }
            }
        }
        self.drop_text_in(area);
        self.text.extend(
            source
                .text
                .iter()
                .filter(|run| area.contains(run.x, run.y))
                .cloned(),
        );
    }
}
