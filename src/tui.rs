//! The console front end: board display, move prompt and a random opponent.

use crossterm::style::Stylize;
use engine::{Config, GameState, Move, MoveOutcome, Player, SfenError};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum TuiError {
    #[error("invalid starting position: {0}")]
    Sfen(#[from] SfenError),
    #[error("console i/o failed: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Side played by the computer, if any.
    pub computer: Option<Player>,
    pub seed: Option<u64>,
    pub sfen: Option<String>,
    pub color: bool,
}

/// Runs the main game loop for the text-based UI.
pub fn run(config: Config, options: Options) -> Result<(), TuiError> {
    let mut game = match &options.sfen {
        Some(sfen) => GameState::from_sfen(sfen, config)?,
        None => GameState::with_config(config),
    };
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    println!("--- Shogi in Rust ---");
    println!("Enter moves as RC-RC (file then rank, e.g. 77-76). Type 'quit' to exit.");

    loop {
        println!();
        print_position(&game, options.color);

        let status = game.status();
        if status.sente_in_check {
            println!("{}", warn_text("Sente is in check!", options.color));
        }
        if status.gote_in_check {
            println!("{}", warn_text("Gote is in check!", options.color));
        }
        if let Some(winner) = status.winner {
            println!("Checkmate! {} wins.", player_name(winner));
            break;
        }

        let player = game.current_player();
        let legal_moves = game.legal_move_list();
        if legal_moves.is_empty() {
            println!("No legal move for {}. Game over.", player_name(player));
            break;
        }

        if options.computer == Some(player) {
            let Some(&mv) = legal_moves.as_slice().choose(&mut rng) else {
                break;
            };
            let promote = game.can_promote(mv.from_sq(), mv.to_sq());
            match game.make_move(mv.with_promotion(promote)) {
                Ok(outcome) => println!("Computer plays {}", describe(&outcome)),
                Err(err) => {
                    debug!(%err, "computer move rejected");
                    break;
                }
            }
            continue;
        }

        print!("{} to move: ", player_name(player));
        stdout.flush()?;
        let Some(line) = read_line(&mut input)? else {
            break;
        };
        if matches!(line.as_str(), "quit" | "exit") {
            break;
        }

        let mv: Move = match line.parse() {
            Ok(mv) => mv,
            Err(err) => {
                println!("Could not read '{line}': {err}");
                continue;
            }
        };
        let (from_sq, to_sq) = (mv.from_sq(), mv.to_sq());
        let promote = legal_moves.contains(from_sq, to_sq)
            && game.can_promote(from_sq, to_sq)
            && ask_promotion(&mut input, &mut stdout)?;

        match game.execute(from_sq, to_sq, promote) {
            Ok(outcome) => {
                info!(mv = %outcome.mv, "player move");
                println!("{} plays {}", player_name(player), describe(&outcome));
            }
            Err(err) => println!("Illegal move: {err}. Please try again."),
        }
    }
    Ok(())
}

/// Reads one trimmed line; `None` on end of input.
fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn ask_promotion(input: &mut impl BufRead, stdout: &mut impl Write) -> io::Result<bool> {
    loop {
        print!("Promote? (y/n): ");
        stdout.flush()?;
        let Some(answer) = read_line(input)? else {
            return Ok(false);
        };
        match answer.to_ascii_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => println!("Please answer y or n."),
        }
    }
}

fn print_position(game: &GameState, color: bool) {
    println!("Gote hand: {}", hand_text(game, Player::Gote));
    for line in game.board().to_string().lines() {
        if color {
            println!("{}", color_gote_pieces(line));
        } else {
            println!("{line}");
        }
    }
    println!("Sente hand: {}", hand_text(game, Player::Sente));
    println!("{} to move (ply {})", player_name(game.current_player()), game.ply());
}

/// Highlights the `v`-marked Gote pieces in one line of the board display.
fn color_gote_pieces(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars();
    while let Some(ch) = chars.next() {
        if ch == 'v' {
            let letter = chars.next().unwrap_or(' ');
            out.push_str(&format!("v{letter}").red().to_string());
        } else {
            out.push(ch);
        }
    }
    out
}

fn hand_text(game: &GameState, player: Player) -> String {
    let hand = game.hand(player);
    if hand.is_empty() {
        return "-".to_string();
    }
    hand.pieces()
        .iter()
        .map(|piece| piece.kind.display_char(false).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn describe(outcome: &MoveOutcome) -> String {
    let mut text = format!(
        "{} {}",
        outcome.piece.kind.display_char(outcome.piece.promoted),
        outcome.mv
    );
    if outcome.promoted {
        text.push('+');
    }
    if let Some(captured) = outcome.captured {
        text.push_str(&format!(" capturing {}", captured.kind.display_char(captured.promoted)));
    }
    text
}

fn warn_text(text: &str, color: bool) -> String {
    if color {
        text.yellow().bold().to_string()
    } else {
        text.to_string()
    }
}

fn player_name(player: Player) -> &'static str {
    match player {
        Player::Sente => "Sente",
        Player::Gote => "Gote",
    }
}
