//! Game module - canonical state, move transaction and event delivery
//!
//! # Module Organization
//!
//! - `events` - [`EventBus`] and the [`MoveOutcome`] payload
//! - `model` - [`PositionModel`], owner of the canonical position
//! - `piece_box` - the setup-mode piece reserve
//!
//! Chess rules themselves live in the `board_rules` crate; this module only
//! drives them.

pub mod events;
pub mod model;
pub mod piece_box;

pub use events::{EventBus, MoveOutcome, SubscriberId, DEFAULT_CHANNEL, MOVE_BEFORE};
pub use model::{LastMove, MoveResult, PositionModel, PreparedMove};
pub use piece_box::PieceBox;
