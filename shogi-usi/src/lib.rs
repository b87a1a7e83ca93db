//! USI bridge - delegate move selection to an external engine
//!
//! Drives a child process speaking the Universal Shogi Interface through
//! one handshake/search cycle: spawn, `usi`/`usiok`, optional variant
//! option, `isready`/`readyok`, position push, `go`, `bestmove`, `quit`.
//! Every phase has a wall-clock timeout and every failure degrades to
//! "no move"; the subprocess never outlives the call.

mod engine;

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use shogi_core::{sfen, Move, Position};

use engine::UsiEngine;

/// Default bound on each handshake phase
pub const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(2);

/// Default bound on the search phase
pub const SEARCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Protocol phase a timeout is attributed to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Handshake,
    Ready,
    Search,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Handshake => "handshake",
            Phase::Ready => "ready",
            Phase::Search => "search",
        };
        f.write_str(name)
    }
}

/// Bridge failures. All of them are recoverable: the caller gets "no
/// move" and decides the fallback itself.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("engine unavailable: {0}")]
    EngineUnavailable(std::io::Error),
    #[error("engine i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("{phase} phase exceeded {timeout:?}")]
    Timeout { phase: Phase, timeout: Duration },
    #[error("engine closed its output stream")]
    StreamClosed,
    #[error("malformed engine reply: {0}")]
    Protocol(String),
}

/// Search effort handed to the engine. When both are set, `movetime`
/// wins and `depth` is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchBudget {
    pub depth: Option<u8>,
    pub movetime: Option<Duration>,
}

impl SearchBudget {
    pub fn depth(depth: u8) -> Self {
        Self { depth: Some(depth), movetime: None }
    }

    pub fn movetime(movetime: Duration) -> Self {
        Self { depth: None, movetime: Some(movetime) }
    }

    fn go_command(&self) -> String {
        if let Some(movetime) = self.movetime {
            format!("go movetime {}", movetime.as_millis())
        } else if let Some(depth) = self.depth {
            format!("go depth {depth}")
        } else {
            "go depth 1".to_string()
        }
    }
}

/// Where and how to run the engine
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Path to the engine executable
    pub path: PathBuf,
    /// Rule-variant name pushed via `setoption` when set
    pub variant: Option<String>,
    pub handshake_timeout: Duration,
    pub search_timeout: Duration,
}

impl EngineConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            variant: None,
            handshake_timeout: HANDSHAKE_TIMEOUT,
            search_timeout: SEARCH_TIMEOUT,
        }
    }
}

/// Run one search on an external engine. Returns `None` when the engine
/// resigns, claims a win, or fails in any recoverable way (missing
/// executable, handshake or search timeout, malformed reply); the caller
/// falls back to the built-in AI or ends the game.
pub fn generate_move(
    pos: &Position,
    budget: &SearchBudget,
    config: &EngineConfig,
) -> Option<Move> {
    match run_search(pos, budget, config) {
        Ok(best) => best,
        Err(err) => {
            tracing::warn!(engine = %config.path.display(), error = %err,
                "external engine failed, returning no move");
            None
        }
    }
}

fn run_search(
    pos: &Position,
    budget: &SearchBudget,
    config: &EngineConfig,
) -> Result<Option<Move>, BridgeError> {
    let mut engine = UsiEngine::spawn(&config.path)?;
    let result = drive(&mut engine, pos, budget, config);
    // Quit-then-reap on success and failure alike
    engine.quit();
    result
}

fn drive(
    engine: &mut UsiEngine,
    pos: &Position,
    budget: &SearchBudget,
    config: &EngineConfig,
) -> Result<Option<Move>, BridgeError> {
    engine.send("usi")?;
    engine.wait_for("usiok", config.handshake_timeout, Phase::Handshake)?;

    if let Some(variant) = &config.variant {
        engine.send(&format!("setoption name UCI_Variant value {variant}"))?;
    }

    engine.send("isready")?;
    engine.wait_for("readyok", config.handshake_timeout, Phase::Ready)?;

    engine.send(&format!("position sfen {}", sfen::encode(pos)))?;
    engine.send(&budget.go_command())?;
    let line = engine.wait_for("bestmove", config.search_timeout, Phase::Search)?;
    parse_bestmove(pos, &line)
}

fn parse_bestmove(pos: &Position, line: &str) -> Result<Option<Move>, BridgeError> {
    let token = line
        .split_whitespace()
        .skip_while(|word| *word != "bestmove")
        .nth(1)
        .ok_or_else(|| BridgeError::Protocol(line.to_string()))?;
    if token == "resign" || token == "win" {
        return Ok(None);
    }
    sfen::decode_move(pos, token)
        .map(Some)
        .map_err(|err| BridgeError::Protocol(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shogi_core::{PieceKind, Square};

    #[test]
    fn test_go_command_priority() {
        assert_eq!(SearchBudget::depth(7).go_command(), "go depth 7");
        assert_eq!(
            SearchBudget::movetime(Duration::from_millis(1500)).go_command(),
            "go movetime 1500"
        );
        let both = SearchBudget {
            depth: Some(7),
            movetime: Some(Duration::from_millis(200)),
        };
        assert_eq!(both.go_command(), "go movetime 200");
    }

    #[test]
    fn test_parse_bestmove() {
        let pos = Position::initial();
        let mv = parse_bestmove(&pos, "bestmove 5g5f").unwrap().unwrap();
        assert_eq!(mv.to(), Square::new(4, 5).unwrap());
        assert_eq!(mv.piece(), PieceKind::Pawn);
        // Ponder suffix is ignored
        assert!(parse_bestmove(&pos, "bestmove 5g5f ponder 5c5d").unwrap().is_some());
    }

    #[test]
    fn test_parse_bestmove_resign() {
        let pos = Position::initial();
        assert!(parse_bestmove(&pos, "bestmove resign").unwrap().is_none());
        assert!(parse_bestmove(&pos, "bestmove win").unwrap().is_none());
    }

    #[test]
    fn test_parse_bestmove_malformed() {
        let pos = Position::initial();
        assert!(matches!(
            parse_bestmove(&pos, "bestmove"),
            Err(BridgeError::Protocol(_))
        ));
        assert!(matches!(
            parse_bestmove(&pos, "bestmove zz99"),
            Err(BridgeError::Protocol(_))
        ));
    }

    #[test]
    fn test_missing_engine_returns_no_move() {
        let config = EngineConfig::new("/nonexistent/engine/binary");
        let best = generate_move(&Position::initial(), &SearchBudget::depth(1), &config);
        assert!(best.is_none());
    }
}
