//! Core module - configuration, errors and board mode
//!
//! # Contents
//!
//! - [`BoardConfig`] - every option a host can pass when creating a board
//! - [`BoardMode`] - `play` / `setup`
//! - [`BoardError`] / [`ConfigError`] - the errors public operations can return
//! - [`settings_persistence`] - JSON load/save of [`BoardConfig`]

pub mod config;
pub mod error;
pub mod settings_persistence;
pub mod state;

// Re-export commonly used items
pub use config::BoardConfig;
pub use error::{BoardError, BoardResult, ConfigError, ConfigResult};
pub use state::BoardMode;
