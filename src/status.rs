//! Terminal-position detection: checkmate and stalemate.

use crate::board::Board;
use crate::types::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalStatus {
    Checkmate { winner: Color },
    Stalemate,
}

/// Returns the terminal status for the side to move, or `None` if the
/// game continues. Computes `color`'s legal moves once and shares the
/// result between the checkmate and stalemate checks.
pub fn terminal_status(board: &mut Board, color: Color) -> Option<TerminalStatus> {
    if !board.all_legal_moves(color).is_empty() {
        return None;
    }
    if board.is_in_check(color) {
        Some(TerminalStatus::Checkmate {
            winner: color.opponent(),
        })
    } else {
        Some(TerminalStatus::Stalemate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Piece, PieceKind, Square};

    #[test]
    fn fools_mate_is_checkmate_for_white() {
        let mut board = Board::starting_position();
        // 1. f3 e5 2. g4 Qh4#
        let moves = [
            (Square::new(6, 5), Square::new(5, 5)),
            (Square::new(1, 4), Square::new(3, 4)),
            (Square::new(6, 6), Square::new(4, 6)),
            (Square::new(0, 3), Square::new(4, 7)),
        ];
        for (from, to) in moves {
            board.apply_move(crate::types::Move::new(from, to), false);
        }
        assert_eq!(
            terminal_status(&mut board, Color::White),
            Some(TerminalStatus::Checkmate {
                winner: Color::Black
            })
        );
    }

    #[test]
    fn lone_kings_are_not_terminal() {
        let mut board = Board::empty();
        board.set(
            Square::new(0, 0),
            Some(Piece::new(PieceKind::King, Color::Black)),
        );
        board.set(
            Square::new(7, 7),
            Some(Piece::new(PieceKind::King, Color::White)),
        );
        assert_eq!(terminal_status(&mut board, Color::White), None);
    }
}
