//! Piece and square types shared by the rules engine and the board widget
//!
//! # Coordinate System
//!
//! Squares use grid coordinates, the same layout the widget stores its board
//! in:
//!
//! - `row` 0 is rank 8, `row` 7 is rank 1
//! - `col` 0 is file a, `col` 7 is file h
//!
//! So `a8` is `(0, 0)`, `h1` is `(7, 7)` and `e4` is `(4, 4)`.

use crate::error::{RulesError, RulesResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Square name used for the setup-mode piece reserve
pub const PIECE_BOX: &str = "piecebox";

/// Side color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "w")]
    White,
    #[serde(rename = "b")]
    Black,
}

impl Color {
    /// The other side
    pub fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Single-letter code (`w` / `b`) as used in FEN
    pub fn code(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    /// Grid row a pawn of this color promotes on
    pub fn promotion_row(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Piece type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Role {
    /// All roles, in the order the piece box lays them out
    pub const BOX_ORDER: [Role; 6] = [
        Role::King,
        Role::Queen,
        Role::Rook,
        Role::Bishop,
        Role::Knight,
        Role::Pawn,
    ];

    /// Lowercase letter used in FEN and asset names
    pub fn letter(self) -> char {
        match self {
            Role::Pawn => 'p',
            Role::Knight => 'n',
            Role::Bishop => 'b',
            Role::Rook => 'r',
            Role::Queen => 'q',
            Role::King => 'k',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(Role::Pawn),
            'n' => Some(Role::Knight),
            'b' => Some(Role::Bishop),
            'r' => Some(Role::Rook),
            'q' => Some(Role::Queen),
            'k' => Some(Role::King),
            _ => None,
        }
    }
}

/// A piece descriptor: color × type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub role: Role,
}

impl Piece {
    pub const fn new(color: Color, role: Role) -> Self {
        Self { color, role }
    }

    /// Two-letter code such as `wp` or `bk`, matching piece asset file names
    pub fn code(self) -> String {
        format!("{}{}", self.color.code(), self.role.letter())
    }

    /// FEN character: uppercase for white, lowercase for black
    pub fn fen_char(self) -> char {
        match self.color {
            Color::White => self.role.letter().to_ascii_uppercase(),
            Color::Black => self.role.letter(),
        }
    }

    pub fn from_fen_char(c: char) -> Option<Self> {
        let role = Role::from_letter(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Self { color, role })
    }
}

/// A board square in grid coordinates
///
/// See the module documentation for the row/col layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Create a square from grid indices, `None` when out of range
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Self { row, col })
        } else {
            None
        }
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    /// File letter `a`..`h`
    pub fn file_char(self) -> char {
        (b'a' + self.col) as char
    }

    /// Rank number 1..8
    pub fn rank_number(self) -> u8 {
        8 - self.row
    }

    /// Index with a1 = 0 and h8 = 63
    pub fn a1_index(self) -> u32 {
        u32::from(7 - self.row) * 8 + u32::from(self.col)
    }

    /// Inverse of [`Square::a1_index`]
    pub fn from_a1_index(index: u32) -> Option<Self> {
        if index >= 64 {
            return None;
        }
        Some(Self {
            row: 7 - (index / 8) as u8,
            col: (index % 8) as u8,
        })
    }

    /// Light squares are those where `row + col` is even (a8, h1, ...)
    pub fn is_light(self) -> bool {
        (self.row + self.col) % 2 == 0
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_number())
    }
}

impl FromStr for Square {
    type Err = RulesError;

    fn from_str(s: &str) -> RulesResult<Self> {
        let invalid = || RulesError::InvalidSquare {
            name: s.to_string(),
        };
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(invalid());
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(invalid());
        }
        Ok(Self {
            row: 7 - (rank - b'1'),
            col: file - b'a',
        })
    }
}

impl From<Square> for String {
    fn from(square: Square) -> Self {
        square.to_string()
    }
}

impl TryFrom<String> for Square {
    type Error = RulesError;

    fn try_from(value: String) -> RulesResult<Self> {
        value.parse()
    }
}

/// Result of looking up a square name: a board square or the piece box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquareName {
    Board(Square),
    PieceBox,
}

impl SquareName {
    pub fn square(self) -> Option<Square> {
        match self {
            SquareName::Board(square) => Some(square),
            SquareName::PieceBox => None,
        }
    }
}

impl FromStr for SquareName {
    type Err = RulesError;

    fn from_str(s: &str) -> RulesResult<Self> {
        if s == PIECE_BOX {
            Ok(SquareName::PieceBox)
        } else {
            s.parse().map(SquareName::Board)
        }
    }
}

impl fmt::Display for SquareName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareName::Board(square) => square.fmt(f),
            SquareName::PieceBox => f.write_str(PIECE_BOX),
        }
    }
}
