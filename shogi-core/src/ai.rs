//! Built-in AI: three single-ply difficulty tiers

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::in_promotion_zone;
use crate::movegen::legal_moves;
use crate::pieces::{Color, PieceKind};
use crate::position::{Move, Position};

/// Bonus for capturing the opposing king outright (terminal win)
const KING_CAPTURE_BONUS: i32 = 10_000;

/// Flat bonus for landing inside either back three ranks
const ZONE_BONUS: i32 = 50;

/// Exclusive upper bound of the tie-breaking jitter
const JITTER: i32 = 10;

/// Difficulty tier of the built-in AI
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Pick a move for `color`, or `None` when no legal move exists (the
/// caller reads that as checkmate or a no-move loss). Pure in the
/// position; all randomness comes from the supplied source.
pub fn select_move<R: Rng>(
    pos: &Position,
    difficulty: Difficulty,
    color: Color,
    rng: &mut R,
) -> Option<Move> {
    let moves = legal_moves(pos, color);
    if moves.is_empty() {
        return None;
    }
    match difficulty {
        Difficulty::Easy => moves.choose(rng).copied(),
        Difficulty::Medium => Some(pick_greedy(pos, &moves)),
        Difficulty::Hard => {
            pick_scored(pos, &moves, rng).or_else(|| moves.choose(rng).copied())
        }
    }
}

/// Material value of the piece standing on the destination square
fn victim_value(pos: &Position, mv: &Move) -> i32 {
    if !mv.is_capture() {
        return 0;
    }
    pos.piece_at(mv.to()).map_or(0, |p| p.kind.value())
}

/// Best capture by victim value; non-captures all rank equal-lowest and
/// ties keep the earliest move in generator order
fn pick_greedy(pos: &Position, moves: &[Move]) -> Move {
    let mut best = moves[0];
    let mut best_value = victim_value(pos, &best);
    for mv in &moves[1..] {
        let value = victim_value(pos, mv);
        if value > best_value {
            best = *mv;
            best_value = value;
        }
    }
    best
}

/// Score every candidate independently, no look-ahead
fn score_move<R: Rng>(pos: &Position, mv: &Move, rng: &mut R) -> i32 {
    let mut score = victim_value(pos, mv);
    if mv.is_capture()
        && pos.piece_at(mv.to()).map_or(false, |p| p.kind == PieceKind::King)
    {
        score += KING_CAPTURE_BONUS;
    }
    let to = mv.to();
    if in_promotion_zone(to, Color::Black) || in_promotion_zone(to, Color::White) {
        score += ZONE_BONUS;
    }
    score + rng.gen_range(0..JITTER)
}

fn pick_scored<R: Rng>(pos: &Position, moves: &[Move], rng: &mut R) -> Option<Move> {
    let mut best: Option<(Move, i32)> = None;
    for mv in moves {
        let score = score_move(pos, mv, rng);
        if best.map_or(true, |(_, b)| score > b) {
            best = Some((*mv, score));
        }
    }
    best.map(|(mv, _)| mv)
}
