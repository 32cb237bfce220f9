//! The external interface: a single game's facade and the in-memory
//! registry that hosts use to keep many games alive at once.

use std::collections::HashMap;

use log::{error, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::board::Board;
use crate::error::GameError;
use crate::search::{self, SearchConfig};
use crate::status::{self, TerminalStatus};
use crate::types::{Color, Move, PieceKind, Square};

/// The engine always plays Black; hosts play White. This mirrors the
/// original source, which only ever calls its search for the `'black'`
/// side.
pub const ENGINE_COLOR: Color = Color::Black;

pub struct Game {
    pub id: Uuid,
    pub board: Board,
    pub result: Option<TerminalStatus>,
    search_config: SearchConfig,
}

impl Game {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            board: Board::starting_position(),
            result: None,
            search_config: SearchConfig::default(),
        }
    }

    /// Resets the game to a fresh starting position, keeping its id.
    pub fn reset(&mut self) {
        self.board = Board::starting_position();
        self.result = None;
    }

    /// Overrides the search depth used for the engine's replies. Intended
    /// for deterministic tests; leave the default in place otherwise.
    pub fn set_search_depth_override(&mut self, depth: Option<u8>) {
        self.search_config.max_depth_override = depth;
    }

    pub fn turn(&self) -> Color {
        if self.board.move_history.len() % 2 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    fn validate_square(sq: Square) -> Result<(), GameError> {
        if sq.row < 8 && sq.col < 8 {
            Ok(())
        } else {
            Err(GameError::OutOfBounds {
                row: sq.row as i32,
                col: sq.col as i32,
            })
        }
    }

    /// The legal destination squares for the piece at `from`.
    pub fn legal_moves(&mut self, from: Square) -> Result<Vec<Square>, GameError> {
        Self::validate_square(from)?;
        let Some(_piece) = self.board.get(from) else {
            return Err(GameError::EmptySquare {
                row: from.row,
                col: from.col,
            });
        };
        Ok(self.board.legal_moves(from).into_iter().map(|m| m.to).collect())
    }

    /// Plays a human move for the side to move, then — if the game isn't
    /// over and it's the engine's turn — plays the engine's reply.
    pub fn make_move(&mut self, from: Square, to: Square) -> Result<MakeMoveOutcome, GameError> {
        Self::validate_square(from)?;
        Self::validate_square(to)?;

        if self.result.is_some() {
            return Err(GameError::InvalidGame(self.id));
        }

        let Some(piece) = self.board.get(from) else {
            return Err(GameError::EmptySquare {
                row: from.row,
                col: from.col,
            });
        };
        let turn = self.turn();
        if piece.color != turn {
            return Err(GameError::WrongColor {
                turn,
                attempted: piece.color,
            });
        }

        let legal = self.board.legal_moves(from);
        let mv = Move::new(from, to);
        if !legal.contains(&mv) {
            return Err(GameError::IllegalMove {
                from_row: from.row,
                from_col: from.col,
                to_row: to.row,
                to_col: to.col,
            });
        }

        self.board.apply_move(mv, false);

        let opponent = turn.opponent();
        self.result = status::terminal_status(&mut self.board, opponent);

        let mut engine_move = None;
        if self.result.is_none() && opponent == ENGINE_COLOR {
            engine_move = Some(self.play_engine_reply()?);
            self.result = status::terminal_status(&mut self.board, ENGINE_COLOR.opponent());
        }

        Ok(MakeMoveOutcome {
            engine_move,
            result: self.result,
        })
    }

    fn play_engine_reply(&mut self) -> Result<Move, GameError> {
        let mv = search::choose_move(&mut self.board, ENGINE_COLOR, self.search_config)
            .or_else(|| {
                error!("search returned no move for a non-terminal position; falling back to a random legal move");
                self.random_legal_move(ENGINE_COLOR)
            })
            .ok_or(GameError::EngineFailure)?;

        self.board.apply_move(mv, false);
        Ok(mv)
    }

    fn random_legal_move(&mut self, color: Color) -> Option<Move> {
        let moves = self.board.all_legal_moves(color);
        if moves.is_empty() {
            warn!("no legal moves available for the engine-failure fallback");
            return None;
        }
        Some(moves[fastrand::usize(..moves.len())])
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

/// The outcome of a successful [`Game::make_move`] call.
#[derive(Debug, Clone)]
pub struct MakeMoveOutcome {
    pub engine_move: Option<Move>,
    pub result: Option<TerminalStatus>,
}

/// The in-memory registry of live games. No persistence: games that
/// aren't explicitly kept alive by a host (e.g. by holding this registry
/// behind a `Mutex` for the duration of a process) disappear when it
/// drops.
#[derive(Default)]
pub struct GameManager {
    games: HashMap<Uuid, Game>,
}

impl GameManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_game(&mut self) -> Uuid {
        let game = Game::new();
        let id = game.id;
        self.games.insert(id, game);
        id
    }

    pub fn get_game(&self, id: Uuid) -> Result<&Game, GameError> {
        self.games.get(&id).ok_or(GameError::InvalidGame(id))
    }

    pub fn get_game_mut(&mut self, id: Uuid) -> Result<&mut Game, GameError> {
        self.games.get_mut(&id).ok_or(GameError::InvalidGame(id))
    }

    pub fn delete_game(&mut self, id: Uuid) -> Result<(), GameError> {
        self.games.remove(&id).map(|_| ()).ok_or(GameError::InvalidGame(id))
    }

    pub fn list_game_ids(&self) -> Vec<Uuid> {
        self.games.keys().copied().collect()
    }
}

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

/// A square as hosts send and receive it over the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SquareWire {
    pub row: u8,
    pub col: u8,
}

impl From<Square> for SquareWire {
    fn from(sq: Square) -> Self {
        SquareWire { row: sq.row, col: sq.col }
    }
}

impl From<SquareWire> for Square {
    fn from(sq: SquareWire) -> Self {
        Square::new(sq.row, sq.col)
    }
}

/// A move as hosts may submit it: either nested squares or flat
/// coordinates. The core accepts both shapes.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum MoveInput {
    Nested { from: SquareWire, to: SquareWire },
    Flat {
        from_row: u8,
        from_col: u8,
        to_row: u8,
        to_col: u8,
    },
}

impl MoveInput {
    pub fn squares(self) -> (Square, Square) {
        match self {
            MoveInput::Nested { from, to } => (from.into(), to.into()),
            MoveInput::Flat {
                from_row,
                from_col,
                to_row,
                to_col,
            } => (Square::new(from_row, from_col), Square::new(to_row, to_col)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PieceWire {
    pub kind: &'static str,
    pub color: &'static str,
}

/// The board as an 8x8 array of optional pieces, row-major from row 0.
#[derive(Debug, Clone, Serialize)]
pub struct BoardWire(pub Vec<Vec<Option<PieceWire>>>);

pub fn board_to_wire(board: &Board) -> BoardWire {
    let mut rows = Vec::with_capacity(8);
    for row in 0..8u8 {
        let mut cells = Vec::with_capacity(8);
        for col in 0..8u8 {
            let piece = board.get(Square::new(row, col)).map(|p| PieceWire {
                kind: p.kind.name(),
                color: match p.color {
                    Color::White => "white",
                    Color::Black => "black",
                },
            });
            cells.push(piece);
        }
        rows.push(cells);
    }
    BoardWire(rows)
}

#[derive(Debug, Clone, Serialize)]
pub struct CapturedWire {
    pub white: Vec<&'static str>,
    pub black: Vec<&'static str>,
}

pub fn captured_to_wire(board: &Board) -> CapturedWire {
    let names = |kinds: &[PieceKind]| kinds.iter().map(|k| k.name()).collect();
    CapturedWire {
        white: names(&board.captured[Color::White.index()]),
        black: names(&board.captured[Color::Black.index()]),
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScoreWire {
    pub white: i32,
    pub black: i32,
}

pub fn score_to_wire(board: &Board) -> ScoreWire {
    ScoreWire {
        white: board.score[Color::White.index()],
        black: board.score[Color::Black.index()],
    }
}

/// The full state of a game, shaped for `get_state` / `make_move`
/// responses.
#[derive(Debug, Clone, Serialize)]
pub struct GameStateWire {
    pub id: Uuid,
    pub board: BoardWire,
    pub turn: &'static str,
    pub captured: CapturedWire,
    pub score: ScoreWire,
    pub result: Option<TerminalStatusWire>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status")]
pub enum TerminalStatusWire {
    Checkmate { winner: &'static str },
    Stalemate,
}

impl From<TerminalStatus> for TerminalStatusWire {
    fn from(status: TerminalStatus) -> Self {
        match status {
            TerminalStatus::Checkmate { winner } => TerminalStatusWire::Checkmate {
                winner: match winner {
                    Color::White => "white",
                    Color::Black => "black",
                },
            },
            TerminalStatus::Stalemate => TerminalStatusWire::Stalemate,
        }
    }
}

pub fn game_state_to_wire(game: &Game) -> GameStateWire {
    GameStateWire {
        id: game.id,
        board: board_to_wire(&game.board),
        turn: match game.turn() {
            Color::White => "white",
            Color::Black => "black",
        },
        captured: captured_to_wire(&game.board),
        score: score_to_wire(&game.board),
        result: game.result.map(Into::into),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game_starts_with_white_to_move() {
        let game = Game::new();
        assert_eq!(game.turn(), Color::White);
    }

    #[test]
    fn out_of_bounds_square_is_rejected() {
        let mut game = Game::new();
        let result = game.legal_moves(Square { row: 9, col: 0 });
        assert!(matches!(result, Err(GameError::OutOfBounds { .. })));
    }

    #[test]
    fn empty_square_is_rejected() {
        let mut game = Game::new();
        let result = game.legal_moves(Square::new(3, 3));
        assert!(matches!(result, Err(GameError::EmptySquare { .. })));
    }

    #[test]
    fn wrong_color_move_is_rejected() {
        let mut game = Game::new();
        // Black's pawn, but White is to move.
        let result = game.make_move(Square::new(1, 4), Square::new(2, 4));
        assert!(matches!(result, Err(GameError::WrongColor { .. })));
    }

    #[test]
    fn illegal_destination_is_rejected() {
        let mut game = Game::new();
        let result = game.make_move(Square::new(6, 4), Square::new(3, 4));
        assert!(matches!(result, Err(GameError::IllegalMove { .. })));
    }

    #[test]
    fn legal_opening_move_triggers_an_engine_reply() {
        let mut game = Game::new();
        let outcome = game.make_move(Square::new(6, 4), Square::new(4, 4)).unwrap();
        assert!(outcome.engine_move.is_some());
        assert_eq!(game.turn(), Color::White);
    }

    #[test]
    fn registry_round_trips_a_game() {
        let mut manager = GameManager::new();
        let id = manager.create_game();
        assert!(manager.get_game(id).is_ok());
        manager.delete_game(id).unwrap();
        assert!(matches!(manager.get_game(id), Err(GameError::InvalidGame(_))));
    }
}
