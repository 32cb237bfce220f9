//! Endgame phase detection.
//!
//! The source this engine's evaluator was distilled from computed "is this
//! an endgame" three equivalent ways across its history: no queens left,
//! both sides at or below a material floor, or either side alone at or
//! below a lower material floor. This engine commits to the combined
//! rule — any one of the three flips the position into the endgame phase.

use crate::board::Board;
use crate::types::PieceKind;

/// Roughly "3 points" on the classic {1, 3, 3, 5, 9} scale, converted to
/// this engine's {100, 320, ..., 900} scale.
const LOW_MATERIAL_THRESHOLD: i32 = 300;
/// Roughly "13 points" on the classic scale.
const BOTH_SIDES_THRESHOLD: i32 = 1300;

pub fn is_endgame(board: &Board) -> bool {
    let mut queens = 0;
    let mut white_material = 0;
    let mut black_material = 0;

    for square in &board.squares {
        if let Some(piece) = square {
            if piece.kind == PieceKind::King {
                continue;
            }
            if piece.kind == PieceKind::Queen {
                queens += 1;
            }
            match piece.color {
                crate::types::Color::White => white_material += piece.kind.value(),
                crate::types::Color::Black => black_material += piece.kind.value(),
            }
        }
    }

    queens == 0
        || (white_material <= BOTH_SIDES_THRESHOLD && black_material <= BOTH_SIDES_THRESHOLD)
        || white_material <= LOW_MATERIAL_THRESHOLD
        || black_material <= LOW_MATERIAL_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, Piece, Square};

    #[test]
    fn starting_position_is_not_endgame() {
        assert!(!is_endgame(&Board::starting_position()));
    }

    #[test]
    fn bare_kings_are_endgame() {
        let mut board = Board::empty();
        board.set(
            Square::new(0, 0),
            Some(Piece::new(PieceKind::King, Color::Black)),
        );
        board.set(
            Square::new(7, 7),
            Some(Piece::new(PieceKind::King, Color::White)),
        );
        assert!(is_endgame(&board));
    }
}
