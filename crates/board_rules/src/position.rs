//! Rules-level position value
//!
//! [`Position`] is a plain value: cloning it is a copy of a 64-cell array and
//! a handful of flags. The board widget relies on that to run its move
//! transaction against a scratch copy without touching canonical state.

use crate::types::{Color, Piece, Role, Square};
use serde::{Deserialize, Serialize};

/// 8×8 grid of square contents, row 0 = rank 8, col 0 = file a
pub type Grid = [[Option<Piece>; 8]; 8];

/// An empty grid
pub const EMPTY_GRID: Grid = [[None; 8]; 8];

/// Four independent castling-rights flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastlingRights {
    pub white_king_side: bool,
    pub white_queen_side: bool,
    pub black_king_side: bool,
    pub black_queen_side: bool,
}

impl CastlingRights {
    pub const ALL: Self = Self {
        white_king_side: true,
        white_queen_side: true,
        black_king_side: true,
        black_queen_side: true,
    };

    pub const NONE: Self = Self {
        white_king_side: false,
        white_queen_side: false,
        black_king_side: false,
        black_queen_side: false,
    };

    /// FEN castling field (`KQkq`, `-`, ...)
    pub fn fen_field(&self) -> String {
        let mut field = String::with_capacity(4);
        if self.white_king_side {
            field.push('K');
        }
        if self.white_queen_side {
            field.push('Q');
        }
        if self.black_king_side {
            field.push('k');
        }
        if self.black_queen_side {
            field.push('q');
        }
        if field.is_empty() {
            field.push('-');
        }
        field
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::ALL
    }
}

/// Grid plus the flags the rules need to judge the next move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub grid: Grid,
    pub turn: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmoves: u32,
    pub fullmoves: u32,
}

impl Position {
    /// Empty board, white to move, all castling flags set
    pub fn empty() -> Self {
        Self {
            grid: EMPTY_GRID,
            turn: Color::White,
            castling: CastlingRights::ALL,
            en_passant: None,
            halfmoves: 0,
            fullmoves: 1,
        }
    }

    /// Standard initial layout
    pub fn start() -> Self {
        const BACK_RANK: [Role; 8] = [
            Role::Rook,
            Role::Knight,
            Role::Bishop,
            Role::Queen,
            Role::King,
            Role::Bishop,
            Role::Knight,
            Role::Rook,
        ];

        let mut position = Self::empty();
        for (col, role) in BACK_RANK.iter().enumerate() {
            position.grid[0][col] = Some(Piece::new(Color::Black, *role));
            position.grid[1][col] = Some(Piece::new(Color::Black, Role::Pawn));
            position.grid[6][col] = Some(Piece::new(Color::White, Role::Pawn));
            position.grid[7][col] = Some(Piece::new(Color::White, *role));
        }
        position
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.grid[usize::from(square.row())][usize::from(square.col())]
    }

    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.grid[usize::from(square.row())][usize::from(square.col())] = piece;
    }

    /// Number of occupied squares
    pub fn piece_count(&self) -> usize {
        self.grid.iter().flatten().filter(|cell| cell.is_some()).count()
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}
