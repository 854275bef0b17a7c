//! Canonical FEN writer
//!
//! Parsing goes through `shakmaty` (see [`crate::ShakmatyRules`]); writing is
//! a straight walk over the grid so the output never depends on whether the
//! position is playable.

use crate::position::Position;

/// Standard starting position
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Render the piece placement field
pub fn placement(position: &Position) -> String {
    let mut out = String::with_capacity(72);
    for (row, cells) in position.grid.iter().enumerate() {
        let mut empty = 0u8;
        for cell in cells {
            match cell {
                Some(piece) => {
                    if empty > 0 {
                        out.push((b'0' + empty) as char);
                        empty = 0;
                    }
                    out.push(piece.fen_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            out.push((b'0' + empty) as char);
        }
        if row < 7 {
            out.push('/');
        }
    }
    out
}

/// Render a full six-field FEN
pub fn write_fen(position: &Position) -> String {
    let en_passant = position
        .en_passant
        .map(|square| square.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{} {} {} {} {} {}",
        placement(position),
        position.turn.code(),
        position.castling.fen_field(),
        en_passant,
        position.halfmoves,
        position.fullmoves.max(1)
    )
}
