//! The move-ordering heuristic used to sort and truncate candidates
//! before the search recurses into them (§4.11 / §4.9 step 4).
//!
//! This is deliberately cheap: no recursion, just a handful of additive
//! bonuses computed straight off the board and the move's own squares.
//! It only ever ranks candidates; the search's return value always comes
//! from the real recursive evaluation, never from this heuristic.

use crate::board::Board;
use crate::types::{Color, Move, PieceKind};

/// Plies below which a king move still draws the early-development
/// penalty — roughly fullmove 15, converted to plies.
const KING_MOVE_PENALTY_PLY_CUTOFF: usize = 28;
/// How many of the most recent moves to check for the repetition penalty.
const REPETITION_LOOKBACK: usize = 4;

/// Scores a candidate move for ordering purposes. Higher is better for
/// White; the caller sorts ascending instead of descending when ordering
/// for Black.
pub fn score_move(board: &Board, mv: Move, _mover_color: Color) -> i32 {
    let mover_kind = board
        .get(mv.from)
        .map(|p| p.kind)
        .expect("score_move: no piece at move origin");
    let mut score = 0;

    if let Some(target) = board.get(mv.to) {
        score += target.kind.value() * 10;
        if mover_kind.value() < target.kind.value() {
            score += 30;
        }
    }

    if mv.to.is_center() {
        score += 10;
    }

    if mover_kind == PieceKind::Pawn && (mv.to.row == 0 || mv.to.row == 7) {
        score += 800;
    }

    for prev in board.move_history.iter().rev().take(REPETITION_LOOKBACK) {
        if prev.to == mv.to {
            score -= 50;
        }
    }

    if mover_kind == PieceKind::King {
        if (mv.to.col as i16 - mv.from.col as i16).abs() == 2 {
            score += 40;
        } else if board.move_history.len() < KING_MOVE_PENALTY_PLY_CUTOFF {
            score -= 100;
        }
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Piece, Square};

    #[test]
    fn capturing_a_queen_with_a_pawn_scores_highest() {
        let mut board = Board::empty();
        board.set(
            Square::new(4, 4),
            Some(Piece::new(PieceKind::Pawn, Color::White)),
        );
        board.set(
            Square::new(3, 3),
            Some(Piece::new(PieceKind::Queen, Color::Black)),
        );
        board.set(
            Square::new(4, 5),
            Some(Piece::new(PieceKind::Pawn, Color::White)),
        );
        let capture = Move::new(Square::new(4, 4), Square::new(3, 3));
        let quiet_side = Move::new(Square::new(4, 5), Square::new(3, 5));
        assert!(
            score_move(&board, capture, Color::White)
                > score_move(&board, quiet_side, Color::White)
        );
    }

    #[test]
    fn promotion_outranks_a_quiet_pawn_push() {
        let mut board = Board::empty();
        board.set(
            Square::new(1, 0),
            Some(Piece::new(PieceKind::Pawn, Color::White)),
        );
        board.set(
            Square::new(4, 4),
            Some(Piece::new(PieceKind::Pawn, Color::White)),
        );
        let promotion = Move::new(Square::new(1, 0), Square::new(0, 0));
        let quiet = Move::new(Square::new(4, 4), Square::new(3, 4));
        assert!(
            score_move(&board, promotion, Color::White) > score_move(&board, quiet, Color::White)
        );
    }

    #[test]
    fn castling_outscores_an_early_king_walk() {
        let mut board = Board::empty();
        board.set(
            Square::new(7, 4),
            Some(Piece::new(PieceKind::King, Color::White)),
        );
        let castle = Move::new(Square::new(7, 4), Square::new(7, 6));
        let walk = Move::new(Square::new(7, 4), Square::new(7, 5));
        assert!(score_move(&board, castle, Color::White) > score_move(&board, walk, Color::White));
    }
}
