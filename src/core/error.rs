//! Error types for core module
//!
//! Only programmatic misuse reaches the caller as an error. User gestures
//! (illegal drags, drops outside the board) never do; they are absorbed by
//! the input controller and the move transaction.

use board_rules::RulesError;
use thiserror::Error;

/// Errors surfaced by the public board operations
#[derive(Error, Debug)]
pub enum BoardError {
    /// FEN handed to `set_position` (or the initial config) is malformed
    #[error("Invalid position: {0}")]
    InvalidPosition(#[source] RulesError),

    /// Configuration could not be loaded or saved
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors that can occur while loading or saving a [`BoardConfig`](crate::core::BoardConfig)
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file I/O error
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config serialization/deserialization error
    #[error("Config serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Color string is not `#rgb` / `#rrggbb`
    #[error("Invalid color '{value}' for {field}")]
    InvalidColor { field: &'static str, value: String },
}

/// Result type alias for board operations
pub type BoardResult<T> = Result<T, BoardError>;

/// Result type alias for config operations
pub type ConfigResult<T> = Result<T, ConfigError>;
