//! XFBoard - an interactive chessboard widget core
//!
//! Renders a position onto host-provided 2D surfaces, lets the user drag
//! pieces with mouse or touch, and commits moves only after the rules engine
//! accepts them.
//!
//! # Module Organization
//!
//! - `core` - configuration, errors, board mode, config persistence
//! - `game` - position model, move transaction, event bus, piece box
//! - `rendering` - surfaces, layout and the snapshot/live render pipeline
//! - `input` - the pointer drag state machine
//! - `assets` - image bookkeeping for pieces and squares
//! - `board` - [`Board`], the facade hosts talk to
//! - `shared` - [`SharedBoard`], a lock-protected handle
//!
//! Chess rules come from the `board_rules` crate, re-exported here.

pub mod assets;
pub mod board;
pub mod core;
pub mod game;
pub mod input;
pub mod rendering;
pub mod shared;

pub use board::Board;
pub use board_rules;
pub use crate::core::{BoardConfig, BoardError, BoardMode, BoardResult};
pub use game::{MoveOutcome, MoveResult, SubscriberId, DEFAULT_CHANNEL, MOVE_BEFORE};
pub use input::{DropOutcome, PointerEvent, PointerKind};
pub use rendering::{Raster, RasterImage, Rgba, Surface};
pub use shared::SharedBoard;
