//! A minimal terminal host: a human plays White against the engine's
//! Black over a colored Unicode board. Moves are typed as four-character
//! coordinates, e.g. `e2e4`.

use std::io::{self, Write};

use clap::Parser;
use colored::Colorize;

use mindmatter::status::TerminalStatus;
use mindmatter::{Color, Game, Piece, PieceKind, Square};

/// Play chess against mindmatter's engine in a terminal.
#[derive(Parser, Debug)]
#[command(name = "play", version, about)]
struct Args {
    /// Force every engine reply to search at this depth instead of the
    /// adaptive depth rule.
    #[arg(long)]
    depth: Option<u8>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut game = Game::new();
    if let Some(depth) = args.depth {
        game.set_search_depth_override(Some(depth));
    }

    println!("mindmatter — you are White. Moves look like e2e4. Type 'help' for commands.");
    print_board(&game);

    loop {
        if let Some(result) = game.result {
            print_result(result);
            break;
        }

        print!("> ");
        io::stdout().flush().ok();
        let mut line = String::new();
        if io::stdin().read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let line = line.trim();

        match line {
            "" => continue,
            "quit" | "exit" => break,
            "help" => print_help(),
            "board" => print_board(&game),
            "moves" => print_moves(&mut game),
            _ => match parse_move(line) {
                Some((from, to)) => match game.make_move(from, to) {
                    Ok(outcome) => {
                        if let Some(engine_move) = outcome.engine_move {
                            println!(
                                "engine plays {}",
                                format_move(engine_move.from, engine_move.to)
                            );
                        }
                        print_board(&game);
                    }
                    Err(err) => println!("{}", err.to_string().red()),
                },
                None => println!("couldn't parse '{line}' as a move, e.g. e2e4"),
            },
        }
    }
}

fn print_help() {
    println!("commands: <move like e2e4>, moves, board, help, quit");
}

fn print_moves(game: &mut Game) {
    let turn = game.turn();
    let mut any = false;
    for row in 0..8u8 {
        for col in 0..8u8 {
            let from = Square::new(row, col);
            let occupant_color = game.board.get(from).map(|p| p.color);
            if occupant_color != Some(turn) {
                continue;
            }
            if let Ok(destinations) = game.legal_moves(from) {
                for to in destinations {
                    println!("  {}", format_move(from, to));
                    any = true;
                }
            }
        }
    }
    if !any {
        println!("  (no legal moves)");
    }
}

fn print_result(result: TerminalStatus) {
    match result {
        TerminalStatus::Checkmate { winner } => {
            println!("checkmate — {winner} wins");
        }
        TerminalStatus::Stalemate => println!("stalemate — draw"),
    }
}

fn parse_move(input: &str) -> Option<(Square, Square)> {
    let bytes = input.as_bytes();
    if bytes.len() != 4 {
        return None;
    }
    let from = algebraic_to_square(&input[0..2])?;
    let to = algebraic_to_square(&input[2..4])?;
    Some((from, to))
}

fn algebraic_to_square(s: &str) -> Option<Square> {
    let bytes = s.as_bytes();
    let file = bytes[0];
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'9').contains(&rank) {
        return None;
    }
    let col = file - b'a';
    let rank_num = (rank - b'0') as i16;
    if !(1..=8).contains(&rank_num) {
        return None;
    }
    let row = 8 - rank_num;
    Some(Square::new(row as u8, col))
}

fn square_to_algebraic(sq: Square) -> String {
    let file = (b'a' + sq.col) as char;
    let rank = 8 - sq.row;
    format!("{file}{rank}")
}

fn format_move(from: Square, to: Square) -> String {
    format!("{}{}", square_to_algebraic(from), square_to_algebraic(to))
}

fn print_board(game: &Game) {
    println!();
    println!("  +---+---+---+---+---+---+---+---+");
    for row in 0..8u8 {
        print!("{} ", 8 - row);
        for col in 0..8u8 {
            let sq = Square::new(row, col);
            let dark = (row + col) % 2 == 0;
            let cell = match game.board.get(sq) {
                Some(piece) => {
                    let symbol = piece_symbol(piece);
                    if piece.color == Color::White {
                        symbol.white().bold().to_string()
                    } else {
                        symbol.cyan().bold().to_string()
                    }
                }
                None => {
                    if dark {
                        "·".dimmed().to_string()
                    } else {
                        " ".to_string()
                    }
                }
            };
            print!("| {cell} ");
        }
        println!("|");
        println!("  +---+---+---+---+---+---+---+---+");
    }
    println!("    a   b   c   d   e   f   g   h");
    println!();
}

fn piece_symbol(piece: &Piece) -> &'static str {
    match (piece.color, piece.kind) {
        (Color::White, PieceKind::King) => "K",
        (Color::White, PieceKind::Queen) => "Q",
        (Color::White, PieceKind::Rook) => "R",
        (Color::White, PieceKind::Bishop) => "B",
        (Color::White, PieceKind::Knight) => "N",
        (Color::White, PieceKind::Pawn) => "P",
        (Color::Black, PieceKind::King) => "k",
        (Color::Black, PieceKind::Queen) => "q",
        (Color::Black, PieceKind::Rook) => "r",
        (Color::Black, PieceKind::Bishop) => "b",
        (Color::Black, PieceKind::Knight) => "n",
        (Color::Black, PieceKind::Pawn) => "p",
    }
}
