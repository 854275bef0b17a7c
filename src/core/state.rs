use serde::{Deserialize, Serialize};

/// Interaction mode of a board
///
/// - `Play`: moves go through the rules engine, only the side to move can drag
/// - `Setup`: free placement, the piece box is shown under the board
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardMode {
    #[default]
    Play,
    Setup,
}

impl BoardMode {
    /// Number of square rows the surface needs (board + piece box)
    pub fn rows(self) -> u32 {
        match self {
            BoardMode::Play => 8,
            BoardMode::Setup => 10,
        }
    }

    pub fn is_setup(self) -> bool {
        matches!(self, BoardMode::Setup)
    }
}
