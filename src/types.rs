//! Core types for the mindmatter chess engine.
//!
//! This module defines the board, the piece model, the square addressing
//! scheme, and the move record. Rows run top-to-bottom (`row == 0` is
//! Black's home rank, `row == 7` is White's home rank); columns run
//! left-to-right. There is no algebraic notation anywhere in the core —
//! hosts that want "e4" strings build that translation layer themselves.

use std::fmt;

// ---------------------------------------------------------------------------
// Color & PieceKind
// ---------------------------------------------------------------------------

/// The side of a piece or player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Returns the opposing color.
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Index into the two-element `captured`/`score` arrays.
    pub fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// The row pawns of this color start on.
    pub fn pawn_start_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// The row direction pawns of this color march: `-1` for White (toward
    /// row 0), `+1` for Black (toward row 7).
    pub fn pawn_direction(self) -> i16 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// The back rank a pawn of this color promotes on.
    pub fn promotion_row(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// The home rank this color's king and rooks start on.
    pub fn home_row(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// A chess piece type, without color.
///
/// Material values follow the {100, 320, 330, 500, 900, 20000} scale
/// (see DESIGN.md — two scales coexist in the source this spec was
/// distilled from; the evaluator and the move-ordering heuristic both
/// use this one).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// The material value of this piece kind.
    pub fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 20_000,
        }
    }

    /// Lowercase name, used by the board wire shape.
    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }
}

// ---------------------------------------------------------------------------
// Piece
// ---------------------------------------------------------------------------

/// A piece on the board.
///
/// `pseudo_moves` is a scratch buffer the move generator fills for this
/// piece; callers must run it through [`crate::movegen::is_legal`] (or use
/// [`crate::board::Board::legal_moves`], which does the filtering) before
/// trusting any entry as a legal move.
#[derive(Debug, Clone)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub has_moved: bool,
    pub pseudo_moves: Vec<Move>,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Self {
        Self {
            kind,
            color,
            has_moved: false,
            pseudo_moves: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Square
// ---------------------------------------------------------------------------

/// A square on the 8x8 grid. `row` and `col` are both in `[0, 7]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    /// Creates a square. Panics if either coordinate is out of bounds;
    /// callers handling untrusted input should use [`Square::in_bounds`].
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < 8 && col < 8, "square out of bounds: ({row}, {col})");
        Self { row, col }
    }

    /// Builds a square from signed coordinates, returning `None` if either
    /// falls outside `[0, 7]`.
    pub fn in_bounds(row: i16, col: i16) -> Option<Square> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Square {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Returns the square offset by `(drow, dcol)`, or `None` if it falls
    /// off the board.
    pub fn offset(self, drow: i16, dcol: i16) -> Option<Square> {
        Square::in_bounds(self.row as i16 + drow, self.col as i16 + dcol)
    }

    /// Flat index into [`Board::squares`](crate::board::Board), `row * 8 + col`.
    pub fn index(self) -> usize {
        self.row as usize * 8 + self.col as usize
    }

    /// `true` if the square is within the center 4x4 block used by the
    /// evaluator and the move-ordering heuristic's center bonus.
    pub fn is_center(self) -> bool {
        (2..=5).contains(&self.row) && (2..=5).contains(&self.col)
    }
}

// ---------------------------------------------------------------------------
// Move
// ---------------------------------------------------------------------------

/// A move: the square a piece starts on and the square it ends on.
///
/// Equality is purely positional — no piece kind, capture, castling, or
/// promotion information is carried on the move itself. Castling is
/// recognized at apply time by the moving piece being a king that shifted
/// two columns; promotion is recognized by a pawn landing on the back rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}
