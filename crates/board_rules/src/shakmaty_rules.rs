//! [`RulesEngine`] backed by the `shakmaty` move generator
//!
//! The widget's [`Position`] is converted to a `shakmaty::Chess` through its
//! FEN, the move is looked up among the legal moves by its source and
//! destination squares, and the resulting setup is read back into the grid.
//!
//! # Drag Conventions
//!
//! A user drags the king two squares to castle (e1→g1). Castling moves are
//! matched only by the king's destination square; dropping the king on its
//! own rook is rejected. Pawns reaching the last rank promote to
//! a queen unless another role is requested.

use crate::engine::{LongMove, RulesEngine};
use crate::error::{RulesError, RulesResult};
use crate::fen::write_fen;
use crate::position::{CastlingRights, Position, EMPTY_GRID};
use crate::types::{Color, Piece, Role, Square};
use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::{
    CastlingMode, Chess, EnPassantMode, File, Move, Position as _, PositionError, Setup,
};
use tracing::trace;

/// Rules engine adapter over `shakmaty`
#[derive(Debug, Clone, Copy, Default)]
pub struct ShakmatyRules;

impl ShakmatyRules {
    pub fn new() -> Self {
        Self
    }

    /// Build a playable position, tolerating stale castling / en-passant flags
    fn to_chess(position: &Position) -> RulesResult<Chess> {
        let text = write_fen(position);
        let fen = Fen::from_ascii(text.as_bytes()).map_err(|e| RulesError::InvalidFen {
            fen: text.clone(),
            reason: e.to_string(),
        })?;
        fen.into_position::<Chess>(CastlingMode::Standard)
            .or_else(PositionError::ignore_invalid_castling_rights)
            .or_else(PositionError::ignore_invalid_ep_square)
            .map_err(|e| RulesError::UnplayablePosition {
                reason: e.to_string(),
            })
    }

    /// Source and destination of a shakmaty move as the user would drag it
    fn drag_squares(m: &Move) -> Option<(shakmaty::Square, shakmaty::Square)> {
        match m {
            Move::Normal { from, to, .. } | Move::EnPassant { from, to } => Some((*from, *to)),
            Move::Castle { king, rook } => {
                let file = if rook.file() > king.file() {
                    File::G
                } else {
                    File::C
                };
                Some((*king, shakmaty::Square::from_coords(file, king.rank())))
            }
            Move::Put { .. } => None,
        }
    }

    fn matches(m: &Move, from: shakmaty::Square, to: shakmaty::Square, promotion: Role) -> bool {
        let Some((move_from, move_to)) = Self::drag_squares(m) else {
            return false;
        };
        if move_from != from || move_to != to {
            return false;
        }
        match m.promotion() {
            Some(role) => role == to_shakmaty_role(promotion),
            None => true,
        }
    }
}

impl RulesEngine for ShakmatyRules {
    fn apply_move(
        &self,
        position: &mut Position,
        from: Square,
        to: Square,
        promotion: Option<Role>,
    ) -> bool {
        let chess = match Self::to_chess(position) {
            Ok(chess) => chess,
            Err(e) => {
                trace!("[RULES] Cannot judge {}-{}: {}", from, to, e);
                return false;
            }
        };

        let from_sq = to_shakmaty_square(from);
        let to_sq = to_shakmaty_square(to);
        let wanted = promotion.unwrap_or(Role::Queen);
        let Some(found) = chess
            .legal_moves()
            .into_iter()
            .find(|m| Self::matches(m, from_sq, to_sq, wanted))
        else {
            trace!("[RULES] {}-{} is not legal", from, to);
            return false;
        };

        match chess.play(&found) {
            Ok(next) => {
                *position = position_from_setup(&next.into_setup(EnPassantMode::Legal));
                true
            }
            Err(e) => {
                trace!("[RULES] {}-{} rejected while playing: {}", from, to, e);
                false
            }
        }
    }

    fn is_mate(&self, position: &Position) -> bool {
        Self::to_chess(position)
            .map(|chess| chess.is_checkmate())
            .unwrap_or(false)
    }

    fn is_stalemate(&self, position: &Position) -> bool {
        Self::to_chess(position)
            .map(|chess| chess.is_stalemate())
            .unwrap_or(false)
    }

    fn parse_fen(&self, position: &mut Position, fen: &str) -> RulesResult<()> {
        let trimmed = fen.trim();
        let parsed = Fen::from_ascii(trimmed.as_bytes()).map_err(|e| RulesError::InvalidFen {
            fen: trimmed.to_string(),
            reason: e.to_string(),
        })?;
        *position = position_from_setup(&parsed.into_setup());
        Ok(())
    }

    fn san_to_long_move(&self, position: &Position, san: &str) -> RulesResult<LongMove> {
        let invalid = |reason: String| RulesError::InvalidSan {
            san: san.to_string(),
            reason,
        };
        let parsed = SanPlus::from_ascii(san.trim().as_bytes()).map_err(|e| invalid(e.to_string()))?;
        let chess = Self::to_chess(position)?;
        let m = parsed
            .san
            .to_move(&chess)
            .map_err(|e| invalid(e.to_string()))?;
        let (from, to) =
            Self::drag_squares(&m).ok_or_else(|| invalid("drop moves are not supported".into()))?;

        Ok(LongMove {
            from: from_shakmaty_square(from).ok_or_else(|| invalid("bad source".into()))?,
            to: from_shakmaty_square(to).ok_or_else(|| invalid("bad destination".into()))?,
            promotion: m.promotion().map(from_shakmaty_role),
        })
    }
}

fn to_shakmaty_square(square: Square) -> shakmaty::Square {
    shakmaty::Square::new(square.a1_index())
}

fn from_shakmaty_square(square: shakmaty::Square) -> Option<Square> {
    Square::from_a1_index(u32::from(square))
}

fn to_shakmaty_role(role: Role) -> shakmaty::Role {
    match role {
        Role::Pawn => shakmaty::Role::Pawn,
        Role::Knight => shakmaty::Role::Knight,
        Role::Bishop => shakmaty::Role::Bishop,
        Role::Rook => shakmaty::Role::Rook,
        Role::Queen => shakmaty::Role::Queen,
        Role::King => shakmaty::Role::King,
    }
}

fn from_shakmaty_role(role: shakmaty::Role) -> Role {
    match role {
        shakmaty::Role::Pawn => Role::Pawn,
        shakmaty::Role::Knight => Role::Knight,
        shakmaty::Role::Bishop => Role::Bishop,
        shakmaty::Role::Rook => Role::Rook,
        shakmaty::Role::Queen => Role::Queen,
        shakmaty::Role::King => Role::King,
    }
}

fn from_shakmaty_color(color: shakmaty::Color) -> Color {
    match color {
        shakmaty::Color::White => Color::White,
        shakmaty::Color::Black => Color::Black,
    }
}

/// Read a shakmaty setup into the widget's grid layout
fn position_from_setup(setup: &Setup) -> Position {
    let mut grid = EMPTY_GRID;
    for index in 0..64u32 {
        let Some(square) = Square::from_a1_index(index) else {
            continue;
        };
        if let Some(piece) = setup.board.piece_at(shakmaty::Square::new(index)) {
            grid[usize::from(square.row())][usize::from(square.col())] = Some(Piece::new(
                from_shakmaty_color(piece.color),
                from_shakmaty_role(piece.role),
            ));
        }
    }

    let rights = setup.castling_rights;
    Position {
        grid,
        turn: from_shakmaty_color(setup.turn),
        castling: CastlingRights {
            white_king_side: rights.contains(shakmaty::Square::H1),
            white_queen_side: rights.contains(shakmaty::Square::A1),
            black_king_side: rights.contains(shakmaty::Square::H8),
            black_queen_side: rights.contains(shakmaty::Square::A8),
        },
        en_passant: setup.ep_square.and_then(from_shakmaty_square),
        halfmoves: setup.halfmoves,
        fullmoves: setup.fullmoves.get(),
    }
}
