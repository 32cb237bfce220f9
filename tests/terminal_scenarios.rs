//! Drives the literal terminal-position scenarios end to end through the
//! public board and game facade: scholar's mate, fool's mate, a
//! constructed stalemate, promotion with a capture, kingside castling,
//! and self-check prohibition.

use mindmatter::board::Board;
use mindmatter::status::{terminal_status, TerminalStatus};
use mindmatter::{Color, Game, Move, Piece, PieceKind, Square};

fn sq(row: u8, col: u8) -> Square {
    Square::new(row, col)
}

fn play(board: &mut Board, from: (u8, u8), to: (u8, u8)) {
    board.apply_move(Move::new(sq(from.0, from.1), sq(to.0, to.1)), false);
}

#[test]
fn scholars_mate_checkmates_black() {
    let mut board = Board::starting_position();
    for (from, to) in [
        ((6, 4), (4, 4)),
        ((1, 4), (3, 4)),
        ((7, 5), (4, 2)),
        ((0, 1), (2, 2)),
        ((7, 3), (3, 7)),
        ((1, 0), (2, 0)),
        ((3, 7), (1, 5)),
    ] {
        play(&mut board, from, to);
    }
    assert_eq!(
        terminal_status(&mut board, Color::Black),
        Some(TerminalStatus::Checkmate {
            winner: Color::White
        })
    );
}

#[test]
fn fools_mate_checkmates_white() {
    let mut board = Board::starting_position();
    for (from, to) in [
        ((6, 5), (5, 5)),
        ((1, 4), (3, 4)),
        ((6, 6), (4, 6)),
        ((0, 3), (4, 7)),
    ] {
        play(&mut board, from, to);
    }
    assert_eq!(
        terminal_status(&mut board, Color::White),
        Some(TerminalStatus::Checkmate {
            winner: Color::Black
        })
    );
}

#[test]
fn constructed_position_is_stalemate() {
    let mut board = Board::empty();
    board.set(sq(0, 0), Some(Piece::new(PieceKind::King, Color::White)));
    board.set(sq(2, 2), Some(Piece::new(PieceKind::King, Color::Black)));
    board.set(sq(2, 1), Some(Piece::new(PieceKind::Queen, Color::Black)));

    assert!(!board.is_in_check(Color::White));
    assert!(board.all_legal_moves(Color::White).is_empty());
    assert_eq!(
        terminal_status(&mut board, Color::White),
        Some(TerminalStatus::Stalemate)
    );
}

#[test]
fn pawn_promotion_captures_and_becomes_a_queen() {
    let mut board = Board::empty();
    board.set(sq(1, 0), Some(Piece::new(PieceKind::Pawn, Color::White)));
    board.set(sq(0, 1), Some(Piece::new(PieceKind::Rook, Color::Black)));
    board.set(sq(7, 4), Some(Piece::new(PieceKind::King, Color::White)));
    board.set(sq(0, 4), Some(Piece::new(PieceKind::King, Color::Black)));

    board.apply_move(Move::new(sq(1, 0), sq(0, 1)), false);

    let landed = board.get(sq(0, 1)).expect("queen should have landed");
    assert_eq!(landed.kind, PieceKind::Queen);
    assert_eq!(landed.color, Color::White);
    assert_eq!(board.captured[Color::White.index()], vec![PieceKind::Rook]);
    assert_eq!(board.score[Color::White.index()], PieceKind::Rook.value());
}

#[test]
fn kingside_castling_moves_both_king_and_rook() {
    let mut board = Board::empty();
    board.set(sq(7, 4), Some(Piece::new(PieceKind::King, Color::White)));
    board.set(sq(7, 7), Some(Piece::new(PieceKind::Rook, Color::White)));
    board.set(sq(0, 4), Some(Piece::new(PieceKind::King, Color::Black)));

    let legal = board.legal_moves(sq(7, 4));
    assert!(legal.contains(&Move::new(sq(7, 4), sq(7, 6))));

    board.apply_move(Move::new(sq(7, 4), sq(7, 6)), false);

    let king = board.get(sq(7, 6)).expect("king should be at g1");
    assert_eq!(king.kind, PieceKind::King);
    assert!(king.has_moved);
    let rook = board.get(sq(7, 5)).expect("rook should be at f1");
    assert_eq!(rook.kind, PieceKind::Rook);
    assert!(rook.has_moved);
    assert!(board.get(sq(7, 4)).is_none());
    assert!(board.get(sq(7, 7)).is_none());
}

#[test]
fn pinned_bishop_cannot_leave_the_king_column() {
    let mut board = Board::empty();
    board.set(sq(7, 4), Some(Piece::new(PieceKind::King, Color::White)));
    board.set(sq(6, 4), Some(Piece::new(PieceKind::Bishop, Color::White)));
    board.set(sq(0, 4), Some(Piece::new(PieceKind::Rook, Color::Black)));

    // A bishop only moves diagonally, so it can never stay on column 4 —
    // every one of its moves would expose the king to the rook, leaving
    // it with no legal moves at all while pinned.
    let legal = board.legal_moves(sq(6, 4));
    assert!(legal.is_empty());
}

#[test]
fn game_facade_rejects_an_illegal_move() {
    let mut game = Game::new();
    let err = game
        .make_move(sq(6, 4), sq(3, 4))
        .expect_err("a two-and-a-half-square pawn push is not legal");
    assert!(matches!(err, mindmatter::GameError::IllegalMove { .. }));
}

#[test]
fn game_facade_plays_an_opening_and_gets_a_reply() {
    let mut game = Game::new();
    let outcome = game
        .make_move(sq(6, 4), sq(4, 4))
        .expect("e2-e4 is a legal opening move");
    assert!(outcome.engine_move.is_some());
    assert!(outcome.result.is_none());
}
