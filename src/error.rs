//! The error taxonomy exposed at the game boundary.
//!
//! Every fallible operation in [`crate::game`] returns one of these
//! variants instead of panicking; the one place a debug assertion stands
//! in for a `Result` is `Board::find_king`, which treats a missing king as
//! an invariant violation rather than routine input to report.

use thiserror::Error;
use uuid::Uuid;

use crate::types::Color;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("no game with id {0}")]
    InvalidGame(Uuid),

    #[error("square ({row}, {col}) is out of bounds")]
    OutOfBounds { row: i32, col: i32 },

    #[error("square ({row}, {col}) has no piece on it")]
    EmptySquare { row: u8, col: u8 },

    #[error("it is {turn}'s turn, not {attempted}'s")]
    WrongColor { turn: Color, attempted: Color },

    #[error(
        "move from ({from_row}, {from_col}) to ({to_row}, {to_col}) is not a legal move"
    )]
    IllegalMove {
        from_row: u8,
        from_col: u8,
        to_row: u8,
        to_col: u8,
    },

    #[error("search produced no move in a non-terminal position")]
    EngineFailure,
}
