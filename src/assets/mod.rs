//! Asset tracking
//!
//! Keeps the decoded images a board draws with and remembers which ones
//! failed to load. The core never fetches anything itself: a host asks for
//! [`AssetStore::requests`], loads each path however it likes, and reports
//! back through `Board::asset_loaded` / `Board::asset_failed`.
//!
//! Missing images are never an error; the render path falls back to flat
//! colors for anything not in the store.

use crate::core::config::BoardConfig;
use board_rules::{Color, Piece, Role};
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

/// Identifies one image the board can draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKey {
    Piece(Piece),
    LightSquare,
    DarkSquare,
}

/// Path of a piece image within a piece set, e.g. `img/pieces/default/wk.svg`
pub fn piece_asset_path(piece_set: &str, piece: Piece) -> String {
    format!("img/pieces/{}/{}.svg", piece_set, piece.code())
}

/// Decoded images keyed by [`AssetKey`]
pub struct AssetStore<I> {
    images: HashMap<AssetKey, I>,
    failed: HashSet<AssetKey>,
}

impl<I> Default for AssetStore<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> AssetStore<I> {
    pub fn new() -> Self {
        Self {
            images: HashMap::new(),
            failed: HashSet::new(),
        }
    }

    /// Every image a config asks for, with its path
    pub fn requests(config: &BoardConfig) -> Vec<(AssetKey, String)> {
        let mut requests = Vec::with_capacity(14);
        for color in [Color::White, Color::Black] {
            for role in Role::BOX_ORDER {
                let piece = Piece::new(color, role);
                requests.push((
                    AssetKey::Piece(piece),
                    piece_asset_path(&config.piece_set, piece),
                ));
            }
        }
        if let Some(path) = &config.square_light_image {
            requests.push((AssetKey::LightSquare, path.clone()));
        }
        if let Some(path) = &config.square_dark_image {
            requests.push((AssetKey::DarkSquare, path.clone()));
        }
        requests
    }

    pub fn insert(&mut self, key: AssetKey, image: I) {
        info!("[ASSETS] Loaded {:?}", key);
        self.failed.remove(&key);
        self.images.insert(key, image);
    }

    pub fn mark_failed(&mut self, key: AssetKey, reason: &str) {
        warn!(
            "[ASSETS] Failed to load {:?}: {}. Falling back to flat colors.",
            key, reason
        );
        self.images.remove(&key);
        self.failed.insert(key);
    }

    pub fn get(&self, key: AssetKey) -> Option<&I> {
        self.images.get(&key)
    }

    pub fn piece(&self, piece: Piece) -> Option<&I> {
        self.get(AssetKey::Piece(piece))
    }

    pub fn square(&self, light: bool) -> Option<&I> {
        self.get(if light {
            AssetKey::LightSquare
        } else {
            AssetKey::DarkSquare
        })
    }

    pub fn has_failed(&self, key: AssetKey) -> bool {
        self.failed.contains(&key)
    }

    pub fn loaded_count(&self) -> usize {
        self.images.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_cover_all_pieces() {
        let requests = AssetStore::<()>::requests(&BoardConfig::default());
        assert_eq!(requests.len(), 12);
        assert!(requests
            .iter()
            .any(|(_, path)| path == "img/pieces/default/bn.svg"));
    }

    #[test]
    fn test_requests_include_square_images() {
        let config = BoardConfig {
            square_dark_image: Some("img/dark.png".to_string()),
            ..BoardConfig::default()
        };
        let requests = AssetStore::<()>::requests(&config);
        assert_eq!(requests.last(), Some(&(AssetKey::DarkSquare, "img/dark.png".to_string())));
    }

    #[test]
    fn test_failure_then_success() {
        let mut store = AssetStore::new();
        let key = AssetKey::Piece(Piece::new(Color::White, Role::King));

        store.mark_failed(key, "404");
        assert!(store.has_failed(key));
        assert!(store.get(key).is_none());

        store.insert(key, 7u8);
        assert!(!store.has_failed(key));
        assert_eq!(store.get(key), Some(&7));
        assert_eq!(store.loaded_count(), 1);
    }
}
