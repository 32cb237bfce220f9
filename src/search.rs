//! Adaptive-depth alpha-beta search with a randomized opening bias.

use crate::board::Board;
use crate::evaluate::evaluate;
use crate::ordering;
use crate::types::{Color, Move, PieceKind, Square};

const CHECKMATE_SCORE: i32 = 99_999;
/// Plies (half-moves) below which a position still counts as "early
/// game" for the adaptive-depth override.
const EARLY_GAME_PLY_CUTOFF: usize = 10;
/// Piece count (kings included) at or below which the search reaches one
/// ply deeper.
const SHALLOW_MATERIAL_CUTOFF: usize = 10;
/// Plies of the engine's own color during which the opening bias applies.
const OPENING_BIAS_PLIES: usize = 6;

/// A host-settable override for search depth, primarily useful for
/// deterministic tests. Leave `None` to use the adaptive depth rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchConfig {
    pub max_depth_override: Option<u8>,
}

/// Chooses the search depth: 3 plies once the board has thinned to ten or
/// fewer pieces total, 2 otherwise — except the first ten plies of the
/// game always use 2, regardless of material count.
pub fn adaptive_depth(board: &Board) -> u8 {
    if board.move_history.len() < EARLY_GAME_PLY_CUTOFF {
        return 2;
    }
    let piece_count = board.squares.iter().filter(|sq| sq.is_some()).count();
    if piece_count <= SHALLOW_MATERIAL_CUTOFF {
        3
    } else {
        2
    }
}

/// Picks an opening-book move for `color` if this is still within its
/// first few plies: a pawn push (or, failing that, a minor-piece
/// development) into the center files and the fourth rank. Returns `None`
/// once no such move exists or the bias window has passed, so the caller
/// falls through to the full search.
pub fn opening_bias(board: &mut Board, color: Color) -> Option<Move> {
    let color_plies = match color {
        Color::White => (board.move_history.len() + 1) / 2,
        Color::Black => board.move_history.len() / 2,
    };
    if color_plies >= OPENING_BIAS_PLIES {
        return None;
    }

    let fourth_rank = if color == Color::White { 3 } else { 4 };
    let moves = board.all_legal_moves(color);

    let pawn_pushes: Vec<Move> = moves
        .iter()
        .copied()
        .filter(|mv| {
            board.get(mv.from).map(|p| p.kind) == Some(PieceKind::Pawn)
                && (2..=5).contains(&mv.to.col)
                && mv.to.row == fourth_rank
        })
        .collect();
    if let Some(&mv) = pick_random(&pawn_pushes) {
        return Some(mv);
    }

    let developing: Vec<Move> = moves
        .iter()
        .copied()
        .filter(|mv| {
            matches!(
                board.get(mv.from).map(|p| p.kind),
                Some(PieceKind::Knight) | Some(PieceKind::Bishop)
            ) && (2..=5).contains(&mv.to.row)
                && (1..=6).contains(&mv.to.col)
        })
        .collect();
    pick_random(&developing).copied()
}

fn pick_random(moves: &[Move]) -> Option<&Move> {
    if moves.is_empty() {
        None
    } else {
        Some(&moves[fastrand::usize(..moves.len())])
    }
}

/// Runs alpha-beta minimax rooted at the given depth and returns the best
/// score (from White's perspective) together with the move that achieves
/// it, or `None` if the side to move has no legal moves.
pub fn search_best_move(board: &mut Board, depth: u8, engine_color: Color) -> Option<Move> {
    let maximizing = engine_color == Color::White;
    let (_, best) = alpha_beta(board, depth, i32::MIN + 1, i32::MAX - 1, maximizing);
    best
}

fn alpha_beta(
    board: &mut Board,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
) -> (i32, Option<Move>) {
    if depth == 0 {
        return (evaluate(board), None);
    }

    let color = if maximizing { Color::White } else { Color::Black };
    let candidates = board.all_legal_moves(color);
    if candidates.is_empty() {
        return if board.is_in_check(color) {
            (if maximizing { -CHECKMATE_SCORE } else { CHECKMATE_SCORE }, None)
        } else {
            (0, None)
        };
    }

    let mut scored: Vec<(i32, Move)> = candidates
        .into_iter()
        .map(|mv| (ordering::score_move(board, mv, color), mv))
        .collect();
    scored.sort_by(|a, b| if maximizing { b.0.cmp(&a.0) } else { a.0.cmp(&b.0) });
    let width = if depth >= 2 { 8 } else { 5 };
    scored.truncate(width);

    let mut best_move = scored.first().map(|&(_, mv)| mv);
    let mut best_score = if maximizing { i32::MIN } else { i32::MAX };

    for (_, mv) in scored {
        let undo = board.apply_move(mv, true);
        let (score, _) = alpha_beta(board, depth - 1, alpha, beta, !maximizing);
        board.undo_move(undo, true);

        if maximizing {
            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            alpha = alpha.max(score);
        } else {
            if score < best_score {
                best_score = score;
                best_move = Some(mv);
            }
            beta = beta.min(score);
        }

        if beta <= alpha {
            break;
        }
    }

    (best_score, best_move)
}

/// Picks the engine's reply for `color`: the opening bias if still in its
/// window, otherwise a full alpha-beta search at the adaptive depth (or
/// `config`'s override). Returns `None` only when `color` has no legal
/// moves at all (a terminal position) — callers should have already
/// ruled that out.
pub fn choose_move(board: &mut Board, color: Color, config: SearchConfig) -> Option<Move> {
    if let Some(mv) = opening_bias(board, color) {
        return Some(mv);
    }
    let depth = config.max_depth_override.unwrap_or_else(|| adaptive_depth(board));
    search_best_move(board, depth, color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adaptive_depth_is_shallow_in_the_opening() {
        let board = Board::starting_position();
        assert_eq!(adaptive_depth(&board), 2);
    }

    #[test]
    fn search_finds_a_legal_move_from_the_opening() {
        let mut board = Board::starting_position();
        let mv = search_best_move(&mut board, 2, Color::White);
        assert!(mv.is_some());
    }

    #[test]
    fn search_finds_a_move_on_a_bare_king_endgame() {
        let mut board = Board::empty();
        board.set(
            Square::new(0, 0),
            Some(crate::types::Piece::new(PieceKind::King, Color::White)),
        );
        board.set(
            Square::new(7, 7),
            Some(crate::types::Piece::new(PieceKind::King, Color::Black)),
        );
        assert!(search_best_move(&mut board, 1, Color::White).is_some());
    }
}
