//! The rules engine contract
//!
//! The board widget never decides legality itself. Everything it needs to
//! know about chess goes through [`RulesEngine`]:
//!
//! | Operation | Purpose |
//! |-----------|---------|
//! | [`apply_move`](RulesEngine::apply_move) | validate and play a move on a position in place |
//! | [`is_mate`](RulesEngine::is_mate) / [`is_stalemate`](RulesEngine::is_stalemate) | classify a position |
//! | [`parse_fen`](RulesEngine::parse_fen) / [`to_fen`](RulesEngine::to_fen) | FEN codec |
//! | [`square_to_indices`](RulesEngine::square_to_indices) | square name lookup |
//! | [`san_to_long_move`](RulesEngine::san_to_long_move) | SAN to source/destination |
//! | [`clone_grid`](RulesEngine::clone_grid) | deep copy of a grid |
//!
//! All operations are synchronous and must give a definitive answer before
//! returning.

use crate::error::RulesResult;
use crate::fen;
use crate::position::{Grid, Position};
use crate::types::{Role, Square, SquareName};

/// A move expressed as source and destination squares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LongMove {
    pub from: Square,
    pub to: Square,
    /// Promotion role requested by the notation, if any
    pub promotion: Option<Role>,
}

impl std::fmt::Display for LongMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// Contract the board widget consumes for everything chess-specific
pub trait RulesEngine {
    /// Play `from`→`to` on `position` if legal.
    ///
    /// Returns `false` and leaves `position` untouched when the move is
    /// illegal. `promotion` selects the piece a pawn promotes to; `None`
    /// means queen.
    fn apply_move(
        &self,
        position: &mut Position,
        from: Square,
        to: Square,
        promotion: Option<Role>,
    ) -> bool;

    fn is_mate(&self, position: &Position) -> bool;

    fn is_stalemate(&self, position: &Position) -> bool;

    /// Replace `position` with the one described by `fen`.
    ///
    /// On error `position` is left untouched.
    fn parse_fen(&self, position: &mut Position, fen: &str) -> RulesResult<()>;

    fn to_fen(&self, position: &Position) -> String {
        fen::write_fen(position)
    }

    fn square_to_indices(&self, name: &str) -> RulesResult<SquareName> {
        name.parse()
    }

    fn san_to_long_move(&self, position: &Position, san: &str) -> RulesResult<LongMove>;

    fn clone_grid(&self, grid: &Grid) -> Grid {
        *grid
    }
}
