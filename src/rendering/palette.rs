//! Colors used by the board
//!
//! [`Palette`] resolves the color strings of a [`BoardConfig`] once, so the
//! render path never parses text. Invalid strings are logged and replaced by
//! the defaults.

use crate::core::config::BoardConfig;
use crate::core::error::{ConfigError, ConfigResult};
use board_rules::Color;
use tracing::warn;

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parse `#rgb` or `#rrggbb` (the leading `#` is optional)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match digits.len() {
            3 => {
                let mut out = [0u8; 3];
                for (slot, i) in out.iter_mut().zip(0..3) {
                    *slot = channel(&digits[i..i + 1])? * 17;
                }
                Some(Self::rgb(out[0], out[1], out[2]))
            }
            6 => Some(Self::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            _ => None,
        }
    }

    /// Same color with opacity `alpha` (clamped to 0.0..=1.0)
    pub fn with_alpha(self, alpha: f32) -> Self {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { a, ..self }
    }

    /// CSS `rgba(...)` form, for canvas-backed surfaces
    pub fn to_css(self) -> String {
        format!(
            "rgba({},{},{},{})",
            self.r,
            self.g,
            self.b,
            f32::from(self.a) / 255.0
        )
    }
}

/// Parse a configured color, naming the offending option on failure
pub fn parse_color(field: &'static str, value: &str) -> ConfigResult<Rgba> {
    Rgba::from_hex(value).ok_or_else(|| ConfigError::InvalidColor {
        field,
        value: value.to_string(),
    })
}

fn parse_or_default(field: &'static str, value: &str, fallback: &str) -> Rgba {
    match parse_color(field, value) {
        Ok(color) => color,
        Err(e) => {
            warn!("[CONFIG] {}. Using fallback color {}", e, fallback);
            Rgba::from_hex(fallback).unwrap_or(Rgba::TRANSPARENT)
        }
    }
}

/// Resolved board colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub light: Rgba,
    pub dark: Rgba,
    pub hover_light: Rgba,
    pub hover_dark: Rgba,
    /// Last move highlight, alpha already applied
    pub highlight: Rgba,
    /// Flat tile colors for pieces whose image is not loaded
    pub white_piece: Rgba,
    pub black_piece: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_config(&BoardConfig::default())
    }
}

impl Palette {
    pub fn from_config(config: &BoardConfig) -> Self {
        let defaults = BoardConfig::default();
        Self {
            light: parse_or_default(
                "square_color_light",
                &config.square_color_light,
                &defaults.square_color_light,
            ),
            dark: parse_or_default(
                "square_color_dark",
                &config.square_color_dark,
                &defaults.square_color_dark,
            ),
            hover_light: parse_or_default(
                "square_hover_light",
                &config.square_hover_light,
                &defaults.square_hover_light,
            ),
            hover_dark: parse_or_default(
                "square_hover_dark",
                &config.square_hover_dark,
                &defaults.square_hover_dark,
            ),
            highlight: parse_or_default(
                "highlight_last_move_color",
                &config.highlight_last_move_color,
                &defaults.highlight_last_move_color,
            )
            .with_alpha(config.highlight_last_move_alpha),
            white_piece: Rgba::rgb(0xf8, 0xf8, 0xf8),
            black_piece: Rgba::rgb(0x22, 0x22, 0x22),
        }
    }

    pub fn square(&self, light: bool) -> Rgba {
        if light {
            self.light
        } else {
            self.dark
        }
    }

    pub fn hover(&self, light: bool) -> Rgba {
        if light {
            self.hover_light
        } else {
            self.hover_dark
        }
    }

    pub fn piece(&self, color: Color) -> Rgba {
        match color {
            Color::White => self.white_piece,
            Color::Black => self.black_piece,
        }
    }
}
