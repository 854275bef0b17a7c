//! Error types for the rules collaborator
//!
//! Only programmatic misuse is an error here. An illegal move is not: the
//! engine reports it by returning `false` from
//! [`RulesEngine::apply_move`](crate::RulesEngine::apply_move).

use thiserror::Error;

/// Errors that can occur while talking to the rules engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// FEN text could not be parsed
    #[error("Invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    /// Square name is neither `a1`..`h8` nor the piece box sentinel
    #[error("Invalid square name '{name}'")]
    InvalidSquare { name: String },

    /// SAN text could not be parsed or does not describe a legal move
    #[error("Invalid SAN '{san}': {reason}")]
    InvalidSan { san: String, reason: String },

    /// Position cannot be handed to the move generator (e.g. no kings)
    #[error("Position is not playable: {reason}")]
    UnplayablePosition { reason: String },
}

/// Result type alias for rules operations
pub type RulesResult<T> = Result<T, RulesError>;
