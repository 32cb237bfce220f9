//! Pseudo-legal move generation and attack detection.
//!
//! [`generate_pseudo_moves`] dispatches on piece kind and returns moves
//! that obey that piece's movement rules and don't land on a
//! friendly-occupied square, but may still leave the mover's own king in
//! check — [`crate::board::Board::legal_moves`] filters those out by
//! probing with apply/undo.

use crate::board::Board;
use crate::types::{Color, Move, PieceKind, Square};

const KNIGHT_OFFSETS: [(i16, i16); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const DIAGONAL_DIRS: [(i16, i16); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const ORTHOGONAL_DIRS: [(i16, i16); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Generates pseudo-legal moves for the piece at `sq`. Returns an empty
/// vector if the square is empty.
pub fn generate_pseudo_moves(board: &Board, sq: Square) -> Vec<Move> {
    let Some(piece) = board.get(sq) else {
        return Vec::new();
    };
    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, sq),
        PieceKind::Knight => knight_moves(board, sq),
        PieceKind::Bishop => sliding_moves(board, sq, &DIAGONAL_DIRS),
        PieceKind::Rook => sliding_moves(board, sq, &ORTHOGONAL_DIRS),
        PieceKind::Queen => {
            let mut moves = sliding_moves(board, sq, &DIAGONAL_DIRS);
            moves.extend(sliding_moves(board, sq, &ORTHOGONAL_DIRS));
            moves
        }
        PieceKind::King => king_moves(board, sq),
    }
}

fn pawn_moves(board: &Board, sq: Square) -> Vec<Move> {
    let piece = board.get(sq).expect("pawn_moves: empty square");
    let color = piece.color;
    let dir = color.pawn_direction();
    let mut moves = Vec::new();

    if let Some(one) = sq.offset(dir, 0) {
        if board.get(one).is_none() {
            moves.push(Move::new(sq, one));
            if sq.row == color.pawn_start_row() {
                if let Some(two) = sq.offset(dir * 2, 0) {
                    if board.get(two).is_none() {
                        moves.push(Move::new(sq, two));
                    }
                }
            }
        }
    }

    for dc in [-1i16, 1] {
        if let Some(target) = sq.offset(dir, dc) {
            if let Some(occupant) = board.get(target) {
                if occupant.color != color {
                    moves.push(Move::new(sq, target));
                }
            }
        }
    }

    moves
}

fn knight_moves(board: &Board, sq: Square) -> Vec<Move> {
    let color = board.get(sq).expect("knight_moves: empty square").color;
    KNIGHT_OFFSETS
        .iter()
        .filter_map(|&(dr, dc)| sq.offset(dr, dc))
        .filter(|&target| board.get(target).map_or(true, |p| p.color != color))
        .map(|target| Move::new(sq, target))
        .collect()
}

fn sliding_moves(board: &Board, sq: Square, dirs: &[(i16, i16)]) -> Vec<Move> {
    let color = board.get(sq).expect("sliding_moves: empty square").color;
    let mut moves = Vec::new();
    for &(dr, dc) in dirs {
        let mut cur = sq;
        while let Some(next) = cur.offset(dr, dc) {
            match board.get(next) {
                None => {
                    moves.push(Move::new(sq, next));
                    cur = next;
                }
                Some(occupant) => {
                    if occupant.color != color {
                        moves.push(Move::new(sq, next));
                    }
                    break;
                }
            }
        }
    }
    moves
}

fn king_moves(board: &Board, sq: Square) -> Vec<Move> {
    let piece = board.get(sq).expect("king_moves: empty square");
    let color = piece.color;
    let mut moves = Vec::new();

    for dr in -1i16..=1 {
        for dc in -1i16..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }
            if let Some(target) = sq.offset(dr, dc) {
                if board.get(target).map_or(true, |p| p.color != color) {
                    moves.push(Move::new(sq, target));
                }
            }
        }
    }

    if !piece.has_moved && !board.is_in_check(color) {
        moves.extend(castling_moves(board, sq, color));
    }

    moves
}

/// Castling preconditions: king and rook both unmoved, squares between
/// them empty, and the king not currently in check. The king's transit
/// square is *not* checked for safety — this mirrors the source this
/// engine's rules were distilled from, which re-tested only the king's
/// static check status rather than simulating an attack on the square the
/// king passes through (see DESIGN.md).
fn castling_moves(board: &Board, king_sq: Square, color: Color) -> Vec<Move> {
    let rank = color.home_row();
    debug_assert_eq!(king_sq.row, rank);
    let mut moves = Vec::new();

    for (rook_col, step, king_to_col) in [(7u8, 1i16, 6u8), (0u8, -1i16, 2u8)] {
        let rook_sq = Square::new(rank, rook_col);
        let Some(rook) = board.get(rook_sq) else {
            continue;
        };
        if rook.kind != PieceKind::Rook || rook.color != color || rook.has_moved {
            continue;
        }

        let mut col = king_sq.col as i16 + step;
        let mut clear = true;
        while col != rook_col as i16 {
            if board.get(Square::new(rank, col as u8)).is_some() {
                clear = false;
                break;
            }
            col += step;
        }
        if clear {
            moves.push(Move::new(king_sq, Square::new(rank, king_to_col)));
        }
    }

    moves
}

/// Checks whether `sq` is attacked by any piece of `attacker`'s color, in
/// cheapest-first order: knight jumps, pawn diagonals, then the eight
/// sliding rays (which also catch rook/bishop/queen attacks and a king
/// standing one step away).
pub fn is_square_attacked(board: &Board, sq: Square, attacker: Color) -> bool {
    for &(dr, dc) in &KNIGHT_OFFSETS {
        if let Some(from) = sq.offset(dr, dc) {
            if let Some(piece) = board.get(from) {
                if piece.color == attacker && piece.kind == PieceKind::Knight {
                    return true;
                }
            }
        }
    }

    let pawn_dir = attacker.pawn_direction();
    for dc in [-1i16, 1] {
        if let Some(from) = sq.offset(-pawn_dir, dc) {
            if let Some(piece) = board.get(from) {
                if piece.color == attacker && piece.kind == PieceKind::Pawn {
                    return true;
                }
            }
        }
    }

    for &(dr, dc) in DIAGONAL_DIRS.iter().chain(ORTHOGONAL_DIRS.iter()) {
        let diagonal = DIAGONAL_DIRS.contains(&(dr, dc));
        let mut cur = sq;
        let mut distance = 0;
        while let Some(next) = cur.offset(dr, dc) {
            distance += 1;
            if let Some(piece) = board.get(next) {
                if piece.color == attacker {
                    let attacks = match piece.kind {
                        PieceKind::Queen => true,
                        PieceKind::Bishop => diagonal,
                        PieceKind::Rook => !diagonal,
                        PieceKind::King => distance == 1,
                        _ => false,
                    };
                    if attacks {
                        return true;
                    }
                }
                break;
            }
            cur = next;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn starting_position_has_twenty_pseudo_moves_per_side() {
        let board = Board::starting_position();
        let mut total = 0;
        for col in 0..8u8 {
            total += generate_pseudo_moves(&board, Square::new(6, col)).len();
        }
        total += generate_pseudo_moves(&board, Square::new(7, 1)).len();
        total += generate_pseudo_moves(&board, Square::new(7, 6)).len();
        assert_eq!(total, 16 + 2 + 2);
    }

    #[test]
    fn knight_never_steps_on_a_friendly_piece() {
        let board = Board::starting_position();
        let moves = generate_pseudo_moves(&board, Square::new(7, 1));
        assert!(moves.iter().all(|m| m.to.row != 7));
    }

    #[test]
    fn king_is_not_attacked_on_an_empty_board() {
        let mut board = Board::empty();
        board.set(
            Square::new(4, 4),
            Some(crate::types::Piece::new(PieceKind::King, Color::White)),
        );
        assert!(!is_square_attacked(&board, Square::new(4, 4), Color::Black));
    }
}
