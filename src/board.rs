//! The board: piece storage, move application, and the legality filter.
//!
//! Legality checking never deep-clones the board. Every candidate move is
//! probed with [`Board::apply_move`]`(mv, true)` and reversed with
//! [`Board::undo_move`], exactly as cheap as a move that's actually played.

use std::collections::{HashMap, VecDeque};

use crate::movegen;
use crate::types::{Color, Move, Piece, PieceKind, Square};

/// What [`Board::apply_move`] changed, enough to reverse it exactly.
pub struct UndoInfo {
    mv: Move,
    moved_piece: Piece,
    captured: Option<Piece>,
    rook_undo: Option<(Square, Piece, Square)>,
}

/// Caches legal-move lists keyed on the facts that determine them: piece
/// identity, whether it has moved, and the board's last move (castling
/// rights and en-passant-adjacent pawn captures aren't modeled, but the
/// last move still affects king safety through discovered checks). The key
/// doesn't capture the full board, so it is only valid for as long as the
/// board hasn't changed since the entry was inserted — every
/// [`Board::apply_move`]/[`Board::undo_move`] call, probe or real, clears
/// it. Bounded to 10,000 entries; once full, the oldest half is evicted in
/// one pass rather than maintained as a strict LRU.
#[derive(Default)]
struct LegalMoveCache {
    map: HashMap<CacheKey, Vec<Move>>,
    order: VecDeque<CacheKey>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    kind: PieceKind,
    color: Color,
    square: Square,
    has_moved: bool,
    last_move: Option<Move>,
}

impl LegalMoveCache {
    const MAX_ENTRIES: usize = 10_000;

    fn get(&self, key: &CacheKey) -> Option<&Vec<Move>> {
        self.map.get(key)
    }

    fn insert(&mut self, key: CacheKey, moves: Vec<Move>) {
        if self.map.insert(key, moves).is_none() {
            self.order.push_back(key);
        }
        if self.map.len() > Self::MAX_ENTRIES {
            let evict = self.map.len() / 2;
            for _ in 0..evict {
                if let Some(k) = self.order.pop_front() {
                    self.map.remove(&k);
                }
            }
        }
    }

    fn clear(&mut self) {
        self.map.clear();
        self.order.clear();
    }
}

/// The board: an 8x8 grid of optional pieces plus the bookkeeping needed
/// to apply moves, undo probes, and detect terminal positions.
pub struct Board {
    pub squares: [Option<Piece>; 64],
    pub last_move: Option<Move>,
    pub move_history: Vec<Move>,
    pub captured: [Vec<PieceKind>; 2],
    pub score: [i32; 2],
    cache: LegalMoveCache,
}

impl Board {
    /// An empty board with no pieces placed.
    pub fn empty() -> Self {
        Self {
            squares: std::array::from_fn(|_| None),
            last_move: None,
            move_history: Vec::new(),
            captured: [Vec::new(), Vec::new()],
            score: [0, 0],
            cache: LegalMoveCache::default(),
        }
    }

    /// The standard chess starting position.
    pub fn starting_position() -> Self {
        let mut board = Self::empty();
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for col in 0..8u8 {
            board.set(
                Square::new(1, col),
                Some(Piece::new(PieceKind::Pawn, Color::Black)),
            );
            board.set(
                Square::new(6, col),
                Some(Piece::new(PieceKind::Pawn, Color::White)),
            );
            board.set(
                Square::new(0, col),
                Some(Piece::new(back_rank[col as usize], Color::Black)),
            );
            board.set(
                Square::new(7, col),
                Some(Piece::new(back_rank[col as usize], Color::White)),
            );
        }
        board
    }

    pub fn get(&self, sq: Square) -> Option<&Piece> {
        self.squares[sq.index()].as_ref()
    }

    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.index()] = piece;
    }

    fn invalidate_cache(&mut self) {
        self.cache.clear();
    }

    /// The square the given color's king currently sits on.
    ///
    /// A missing king is an invariant violation, not routine input — every
    /// code path that could remove one (only `apply_move` ever clears a
    /// square) is internal to this crate, so this never fires against
    /// caller-supplied data.
    pub fn find_king(&self, color: Color) -> Square {
        for i in 0..64 {
            if let Some(piece) = &self.squares[i] {
                if piece.kind == PieceKind::King && piece.color == color {
                    return Square::new((i / 8) as u8, (i % 8) as u8);
                }
            }
        }
        unreachable!("board invariant violated: no {color} king on the board")
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        let king_sq = self.find_king(color);
        movegen::is_square_attacked(self, king_sq, color.opponent())
    }

    /// Fills `piece.pseudo_moves` for the piece at `sq` and returns the
    /// legal subset, using (and populating) the legal-move cache.
    ///
    /// Returns an empty vector if `sq` holds no piece; callers that need
    /// to distinguish "no piece" from "no legal moves" should check
    /// [`Board::get`] first.
    pub fn legal_moves(&mut self, sq: Square) -> Vec<Move> {
        let Some(piece) = self.get(sq) else {
            return Vec::new();
        };
        let key = CacheKey {
            kind: piece.kind,
            color: piece.color,
            square: sq,
            has_moved: piece.has_moved,
            last_move: self.last_move,
        };
        if let Some(cached) = self.cache.get(&key) {
            return cached.clone();
        }

        let pseudo = movegen::generate_pseudo_moves(self, sq);
        if let Some(p) = self.squares[sq.index()].as_mut() {
            p.pseudo_moves = pseudo.clone();
        }

        let color = piece.color;
        let mut legal = Vec::with_capacity(pseudo.len());
        for mv in pseudo {
            let undo = self.apply_move(mv, true);
            let still_in_check = self.is_in_check(color);
            self.undo_move(undo, true);
            if !still_in_check {
                legal.push(mv);
            }
        }

        self.cache.insert(key, legal.clone());
        legal
    }

    /// All legal moves for every piece of `color`, in board order.
    pub fn all_legal_moves(&mut self, color: Color) -> Vec<Move> {
        let mut squares = Vec::new();
        for i in 0..64 {
            if let Some(piece) = &self.squares[i] {
                if piece.color == color {
                    squares.push(Square::new((i / 8) as u8, (i % 8) as u8));
                }
            }
        }
        let mut moves = Vec::new();
        for sq in squares {
            moves.extend(self.legal_moves(sq));
        }
        moves
    }

    /// Applies `mv`, returning the information needed to reverse it.
    ///
    /// When `testing` is `true` this is a probe: captures, scores,
    /// `has_moved`, `last_move`/`move_history`, the legal-move cache, and
    /// castling's rook move are all left untouched — only the moving
    /// piece's square and a pawn's auto-promotion to queen happen
    /// unconditionally. Every probe must be paired with
    /// [`Board::undo_move`] using the same `testing` value before any
    /// other mutation touches the board.
    pub fn apply_move(&mut self, mv: Move, testing: bool) -> UndoInfo {
        let moving_piece = self.squares[mv.from.index()]
            .clone()
            .expect("apply_move: no piece at source square");
        let captured = self.squares[mv.to.index()].clone();

        if !testing {
            if let Some(cap) = &captured {
                self.captured[moving_piece.color.index()].push(cap.kind);
                self.score[moving_piece.color.index()] += cap.kind.value();
            }
        }

        self.squares[mv.from.index()] = None;
        let mut landed = moving_piece.clone();
        let promotes =
            landed.kind == PieceKind::Pawn && mv.to.row == landed.color.promotion_row();
        if promotes {
            landed = Piece::new(PieceKind::Queen, landed.color);
        }
        self.squares[mv.to.index()] = Some(landed);

        // Every mutation invalidates the cache, probes included: the cache
        // key doesn't capture full board state, only the moved piece's own
        // facts, so two different probe positions reaching the same piece
        // with the same `last_move` would otherwise collide. Probes are
        // frequent enough that this makes the cache a same-position-only
        // accelerator rather than a survive-a-probe one.
        self.invalidate_cache();

        let mut rook_undo = None;
        if !testing {
            if let Some(p) = self.squares[mv.to.index()].as_mut() {
                p.has_moved = true;
            }
            self.last_move = Some(mv);
            self.move_history.push(mv);

            if moving_piece.kind == PieceKind::King {
                let delta = mv.to.col as i16 - mv.from.col as i16;
                if delta.abs() == 2 {
                    let rank = mv.from.row;
                    let (rook_from_col, rook_to_col) = if delta > 0 { (7, 5) } else { (0, 3) };
                    let rook_from = Square::new(rank, rook_from_col);
                    let rook_to = Square::new(rank, rook_to_col);
                    if let Some(rook_before) = self.squares[rook_from.index()].clone() {
                        let mut rook_after = rook_before.clone();
                        rook_after.has_moved = true;
                        self.squares[rook_from.index()] = None;
                        self.squares[rook_to.index()] = Some(rook_after);
                        rook_undo = Some((rook_from, rook_before, rook_to));
                    }
                }
            }
        }

        UndoInfo {
            mv,
            moved_piece: moving_piece,
            captured,
            rook_undo,
        }
    }

    /// Reverses an [`UndoInfo`] produced by `apply_move(mv, testing)`.
    /// `testing` must match the value passed to the paired `apply_move`.
    pub fn undo_move(&mut self, undo: UndoInfo, testing: bool) {
        let UndoInfo {
            mv,
            moved_piece,
            captured,
            rook_undo,
        } = undo;

        self.squares[mv.from.index()] = Some(moved_piece.clone());
        self.squares[mv.to.index()] = captured.clone();
        self.invalidate_cache();

        if !testing {
            if let Some(cap) = captured {
                let list = &mut self.captured[moved_piece.color.index()];
                if let Some(pos) = list.iter().rposition(|k| *k == cap.kind) {
                    list.remove(pos);
                }
                self.score[moved_piece.color.index()] -= cap.kind.value();
            }
            self.move_history.pop();
            self.last_move = self.move_history.last().copied();

            if let Some((rook_from, rook_before, rook_to)) = rook_undo {
                self.squares[rook_to.index()] = None;
                self.squares[rook_from.index()] = Some(rook_before);
            }
        }
    }
}
