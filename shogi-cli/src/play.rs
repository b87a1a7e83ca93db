//! Play command - AI-vs-AI match from the initial position

use anyhow::{Context, Result};
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use shogi_core::{game_status, select_move, sfen, Color, Difficulty, GameStatus, Position};

use crate::dump::board_text;
use crate::DifficultyArg;

#[derive(Args)]
pub struct PlayArgs {
    /// Difficulty of the first player
    #[arg(long, value_enum, default_value = "hard")]
    pub black: DifficultyArg,

    /// Difficulty of the second player
    #[arg(long, value_enum, default_value = "hard")]
    pub white: DifficultyArg,

    /// RNG seed, for reproducible games
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Stop after this many plies
    #[arg(long, default_value = "256")]
    pub max_moves: u32,

    /// Suppress the per-move board printout
    #[arg(long)]
    pub quiet: bool,

    /// Emit the game report as JSON
    #[arg(long)]
    pub json: bool,
}

/// How the game ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum Ending {
    Checkmate,
    Stalemate,
    MoveLimit,
}

#[derive(Clone, Debug, Serialize)]
struct GameReport {
    moves: Vec<String>,
    plies: u32,
    winner: Option<Color>,
    ending: Ending,
}

pub fn run(args: PlayArgs) -> Result<()> {
    let black: Difficulty = args.black.into();
    let white: Difficulty = args.white.into();
    tracing::info!(?black, ?white, seed = args.seed, "starting match");

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut pos = Position::initial();
    let mut moves = Vec::new();
    let mut ending = Ending::MoveLimit;
    let mut winner = None;

    while (moves.len() as u32) < args.max_moves {
        let color = pos.turn();
        match game_status(&pos, color) {
            GameStatus::Checkmate => {
                ending = Ending::Checkmate;
                winner = Some(color.opponent());
                break;
            }
            GameStatus::Stalemate => {
                // No draw by stalemate: the moveless side loses
                ending = Ending::Stalemate;
                winner = Some(color.opponent());
                break;
            }
            GameStatus::InProgress => {}
        }

        let difficulty = match color {
            Color::Black => black,
            Color::White => white,
        };
        let mv = select_move(&pos, difficulty, color, &mut rng)
            .context("no move from AI despite legal moves remaining")?;
        pos = pos
            .apply_move(&mv)
            .context("AI selected an illegal move")?;
        moves.push(sfen::encode_move(&mv));

        if !args.quiet {
            println!("{:>3}. {:?} {}", moves.len(), color, moves[moves.len() - 1]);
        }
    }

    let report = GameReport { plies: moves.len() as u32, moves, winner, ending };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        if !args.quiet {
            println!("{}", board_text(&pos));
        }
        match report.winner {
            Some(color) => println!(
                "{:?} wins by {} after {} plies",
                color,
                match report.ending {
                    Ending::Checkmate => "checkmate",
                    Ending::Stalemate => "stalemate",
                    Ending::MoveLimit => "move limit",
                },
                report.plies
            ),
            None => println!("no result within {} plies", report.plies),
        }
    }

    Ok(())
}
