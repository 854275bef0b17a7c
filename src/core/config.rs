//! Board configuration
//!
//! [`BoardConfig`] carries every option an embedding application can pass to
//! [`Board::initialize`](crate::board::Board::initialize). Every field has a
//! default, so a config file only needs the keys it wants to change:
//!
//! ```json
//! { "mode": "setup", "highlight_last_move": true, "height": 480, "width": 480 }
//! ```

use crate::core::state::BoardMode;
use serde::{Deserialize, Serialize};

/// Options recognized by a board instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Id of the host element the surface is attached to
    pub container: Option<String>,

    /// `play` or `setup`
    pub mode: BoardMode,

    /// Initial position; the standard start position when absent
    pub fen: Option<String>,

    /// Requested surface height in pixels (0 = let the host decide)
    pub height: u32,

    /// Requested surface width in pixels (0 = let the host decide)
    pub width: u32,

    /// Piece image set name, used to build asset paths
    pub piece_set: String,

    /// Whether to highlight the last move
    pub highlight_last_move: bool,

    /// Last move highlight color (`#rrggbb`)
    pub highlight_last_move_color: String,

    /// Last move highlight opacity (0.0 to 1.0)
    pub highlight_last_move_alpha: f32,

    /// Whether to highlight the square under a dragged piece
    pub highlight_hover: bool,

    /// Whether to draw rank numbers and file letters on the edge squares
    pub show_row_col_labels: bool,

    pub square_color_light: String,
    pub square_color_dark: String,
    pub square_hover_light: String,
    pub square_hover_dark: String,

    /// Image used instead of the flat light square color
    pub square_light_image: Option<String>,

    /// Image used instead of the flat dark square color
    pub square_dark_image: Option<String>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            container: None,
            mode: BoardMode::Play,
            fen: None,
            height: 0,
            width: 0,
            piece_set: "default".to_string(),
            highlight_last_move: false,
            highlight_last_move_color: "#FF0000".to_string(),
            highlight_last_move_alpha: 0.5,
            highlight_hover: false,
            show_row_col_labels: true,
            square_color_light: "#ececd7".to_string(),
            square_color_dark: "#7389b6".to_string(),
            square_hover_light: "#b4d990".to_string(),
            square_hover_dark: "#85c249".to_string(),
            square_light_image: None,
            square_dark_image: None,
        }
    }
}

impl BoardConfig {
    /// Config with an explicit surface size
    pub fn with_size(height: u32, width: u32) -> Self {
        Self {
            height,
            width,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_widget() {
        let config = BoardConfig::default();
        assert_eq!(config.mode, BoardMode::Play);
        assert_eq!(config.square_color_light, "#ececd7");
        assert_eq!(config.square_color_dark, "#7389b6");
        assert!(config.show_row_col_labels);
        assert!(!config.highlight_last_move);
        assert!(!config.highlight_hover);
        assert_eq!(config.highlight_last_move_alpha, 0.5);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: BoardConfig =
            serde_json::from_str(r#"{ "mode": "setup", "height": 400, "width": 320 }"#).unwrap();
        assert_eq!(config.mode, BoardMode::Setup);
        assert_eq!(config.height, 400);
        assert_eq!(config.piece_set, "default");
        assert!(config.fen.is_none());
    }
}
