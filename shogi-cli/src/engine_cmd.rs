//! Engine command - one search on an external USI engine

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use shogi_core::{select_move, sfen, Difficulty};
use shogi_usi::{generate_move, EngineConfig, SearchBudget};

use crate::dump::position_after;
use crate::DifficultyArg;

#[derive(Args)]
pub struct EngineArgs {
    /// Path to the engine executable
    #[arg(long, value_name = "FILE")]
    pub engine: PathBuf,

    /// Search depth (ignored when --movetime is given)
    #[arg(long)]
    pub depth: Option<u8>,

    /// Search time in milliseconds
    #[arg(long, value_name = "MS")]
    pub movetime: Option<u64>,

    /// Rule-variant name pushed to the engine
    #[arg(long)]
    pub variant: Option<String>,

    /// USI moves applied from the initial position before the search
    #[arg(long)]
    pub moves: Vec<String>,

    /// Built-in tier used when the engine returns no move
    #[arg(long, value_enum, default_value = "hard")]
    pub fallback: DifficultyArg,

    /// RNG seed for the fallback tier
    #[arg(long, default_value = "42")]
    pub seed: u64,
}

const DEFAULT_DEPTH: u8 = 4;

pub fn run(args: EngineArgs) -> Result<()> {
    let pos = position_after(&args.moves)?;

    let budget = SearchBudget {
        depth: args.depth.or(Some(DEFAULT_DEPTH)),
        movetime: args.movetime.map(Duration::from_millis),
    };
    let mut config = EngineConfig::new(&args.engine);
    config.variant = args.variant.clone();

    tracing::info!(engine = %args.engine.display(), "requesting engine move");
    match generate_move(&pos, &budget, &config) {
        Some(mv) => {
            println!("engine move: {}", sfen::encode_move(&mv));
        }
        None => {
            // Recoverable by design: the caller picks the fallback
            let fallback: Difficulty = args.fallback.into();
            let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
            match select_move(&pos, fallback, pos.turn(), &mut rng) {
                Some(mv) => println!(
                    "engine returned no move; {:?} fallback: {}",
                    fallback,
                    sfen::encode_move(&mv)
                ),
                None => println!("engine returned no move and no legal move exists"),
            }
        }
    }

    Ok(())
}
