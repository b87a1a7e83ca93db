//! Shogi CLI - command-line front end
//!
//! Commands:
//! - play: AI-vs-AI match from the initial position
//! - engine: ask an external USI engine for a move
//! - dump: print the board diagram and SFEN of a position

mod dump;
mod engine_cmd;
mod play;

use clap::{Parser, Subcommand, ValueEnum};

use shogi_core::Difficulty;

#[derive(Parser)]
#[command(name = "shogi")]
#[command(about = "Shogi match play and external engine bridge")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an AI-vs-AI match from the initial position
    Play(play::PlayArgs),
    /// Ask an external USI engine for a move
    Engine(engine_cmd::EngineArgs),
    /// Print the board diagram and SFEN of a position
    Dump(dump::DumpArgs),
}

/// clap-facing difficulty names
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play::run(args),
        Commands::Engine(args) => engine_cmd::run(args),
        Commands::Dump(args) => dump::run(args),
    }
}
