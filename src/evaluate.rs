//! The static evaluator: material, center control, piece-square tables,
//! endgame adjustments, pawn structure, and check.
//!
//! Returns an integer score from White's perspective — positive favors
//! White, negative favors Black.

use crate::board::Board;
use crate::phase;
use crate::status;
use crate::types::{Color, PieceKind, Square};

const CHECKMATE_SCORE: i32 = 99_999;

/// Per-unit scale applied to the piece-square tables below: one PST unit
/// is worth roughly 1% of a pawn's material value.
const PST_UNIT: i32 = 1;

#[rustfmt::skip]
const PAWN_PST: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_PST: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

/// Indexes a PST for `color`: White reads the table top-down as written,
/// Black reads it mirrored vertically so the bonuses face its own camp.
fn pst_value(table: &[i32; 64], color: Color, sq: Square) -> i32 {
    let row = match color {
        Color::White => sq.row,
        Color::Black => 7 - sq.row,
    };
    table[row as usize * 8 + sq.col as usize]
}

/// Ranks advanced toward promotion, used for the endgame pawn bonus.
fn advancement(color: Color, row: u8) -> i32 {
    match color {
        Color::White => (6 - row as i32).max(0),
        Color::Black => (row as i32 - 1).max(0),
    }
}

pub fn evaluate(board: &mut Board) -> i32 {
    if let Some(status) = status::terminal_status(board, Color::White) {
        return match status {
            status::TerminalStatus::Checkmate { .. } => -CHECKMATE_SCORE,
            status::TerminalStatus::Stalemate => 0,
        };
    }
    if let Some(status) = status::terminal_status(board, Color::Black) {
        return match status {
            status::TerminalStatus::Checkmate { .. } => CHECKMATE_SCORE,
            status::TerminalStatus::Stalemate => 0,
        };
    }

    static_evaluation(board)
}

fn static_evaluation(board: &Board) -> i32 {
    let endgame = phase::is_endgame(board);
    let mut score = 0i32;
    let mut white_pawn_files = [false; 8];
    let mut black_pawn_files = [false; 8];

    for i in 0..64 {
        let Some(piece) = &board.squares[i] else {
            continue;
        };
        let sq = Square::new((i / 8) as u8, (i % 8) as u8);
        let mut value = piece.kind.value();

        if sq.is_center() {
            value += 10;
        }

        match piece.kind {
            PieceKind::Pawn => value += PST_UNIT * pst_value(&PAWN_PST, piece.color, sq),
            PieceKind::Knight => value += PST_UNIT * pst_value(&KNIGHT_PST, piece.color, sq),
            _ => {}
        }

        if endgame {
            if piece.kind == PieceKind::King {
                value += 200;
            }
            if piece.kind == PieceKind::Pawn {
                value += 10 * advancement(piece.color, sq.row);
            }
        }

        if piece.kind == PieceKind::Pawn {
            match piece.color {
                Color::White => white_pawn_files[sq.col as usize] = true,
                Color::Black => black_pawn_files[sq.col as usize] = true,
            }
        }

        score += match piece.color {
            Color::White => value,
            Color::Black => -value,
        };
    }

    let white_files = white_pawn_files.iter().filter(|&&present| present).count() as i32;
    let black_files = black_pawn_files.iter().filter(|&&present| present).count() as i32;
    score += 10 * (white_files - black_files);

    if board.is_in_check(Color::White) {
        score -= 50;
    }
    if board.is_in_check(Color::Black) {
        score += 50;
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_is_balanced() {
        let mut board = Board::starting_position();
        assert_eq!(evaluate(&mut board), 0);
    }

    #[test]
    fn white_up_a_queen_scores_positive() {
        let mut board = Board::empty();
        board.set(
            Square::new(0, 0),
            Some(crate::types::Piece::new(PieceKind::King, Color::Black)),
        );
        board.set(
            Square::new(7, 7),
            Some(crate::types::Piece::new(PieceKind::King, Color::White)),
        );
        board.set(
            Square::new(4, 4),
            Some(crate::types::Piece::new(PieceKind::Queen, Color::White)),
        );
        assert!(evaluate(&mut board) > 800);
    }
}
