//! Rules collaborator for the XFBoard widget
//!
//! Holds the position value type the widget stores, the [`RulesEngine`]
//! contract it consumes, and [`ShakmatyRules`], the default implementation.

pub mod engine;
pub mod error;
pub mod fen;
pub mod position;
pub mod shakmaty_rules;
pub mod types;

pub use engine::{LongMove, RulesEngine};
pub use error::{RulesError, RulesResult};
pub use fen::START_FEN;
pub use position::{CastlingRights, Grid, Position, EMPTY_GRID};
pub use shakmaty_rules::ShakmatyRules;
pub use types::{Color, Piece, Role, Square, SquareName, PIECE_BOX};
