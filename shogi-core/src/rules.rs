//! Check, checkmate and promotion rules

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{in_promotion_zone, ranks_to_far_edge, Square};
use crate::movegen;
use crate::pieces::{Color, PieceKind};
use crate::position::Position;

/// Rule violations reported to the caller; the position is left
/// unchanged and never silently repaired
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RulesError {
    #[error("illegal move from {from} to {to}")]
    IllegalMove { from: Square, to: Square },
    #[error("illegal drop of {piece:?} on {to}")]
    IllegalDrop { piece: PieceKind, to: Square },
    #[error("illegal promotion flag for {piece:?}")]
    IllegalPromotion { piece: PieceKind },
}

/// Terminal state of a position from one side's point of view. A side
/// with no legal moves loses either way; stalemate is reported
/// distinctly because it is not mate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Checkmate,
    Stalemate,
}

/// True if any opposing piece pseudo-legally attacks `color`'s king
pub fn is_check(pos: &Position, color: Color) -> bool {
    match pos.king_square(color) {
        Some(king) => movegen::attacks(pos, king, color.opponent()),
        None => false,
    }
}

/// True if `color` is in check with no legal move
pub fn is_checkmate(pos: &Position, color: Color) -> bool {
    is_check(pos, color) && movegen::legal_moves(pos, color).is_empty()
}

/// Classify the position for `color`
pub fn game_status(pos: &Position, color: Color) -> GameStatus {
    if !movegen::legal_moves(pos, color).is_empty() {
        return GameStatus::InProgress;
    }
    if is_check(pos, color) {
        GameStatus::Checkmate
    } else {
        GameStatus::Stalemate
    }
}

/// Total demotion table; identity on base kinds
pub fn demote_piece(kind: PieceKind) -> PieceKind {
    kind.demote()
}

/// A move may promote when it starts or ends inside the mover's zone;
/// kings and golds never promote
pub fn promotion_eligible(kind: PieceKind, from: Square, to: Square, color: Color) -> bool {
    kind.can_promote() && (in_promotion_zone(from, color) || in_promotion_zone(to, color))
}

/// Forced promotion: the piece would never move again otherwise
pub fn must_promote(kind: PieceKind, to: Square, color: Color) -> bool {
    let edge = ranks_to_far_edge(to, color);
    match kind {
        PieceKind::Pawn | PieceKind::Lance => edge == 0,
        PieceKind::Knight => edge <= 1,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::Piece;

    fn sq(rank: u8, file: u8) -> Square {
        Square::new(rank, file).unwrap()
    }

    fn piece(kind: PieceKind, color: Color) -> Option<Piece> {
        Some(Piece { kind, color })
    }

    #[test]
    fn test_initial_position_no_check() {
        let pos = Position::initial();
        assert!(!is_check(&pos, Color::Black));
        assert!(!is_check(&pos, Color::White));
        assert_eq!(game_status(&pos, Color::Black), GameStatus::InProgress);
    }

    #[test]
    fn test_check_by_slider() {
        let mut pos = Position::empty();
        pos.set_piece(sq(1, 5), piece(PieceKind::King, Color::Black));
        pos.set_piece(sq(9, 5), piece(PieceKind::King, Color::White));
        pos.set_piece(sq(7, 5), piece(PieceKind::Rook, Color::White));
        assert!(is_check(&pos, Color::Black));
        assert!(!is_check(&pos, Color::White));
        // An interposed piece lifts the check
        pos.set_piece(sq(4, 5), piece(PieceKind::Pawn, Color::Black));
        assert!(!is_check(&pos, Color::Black));
    }

    #[test]
    fn test_cornered_king_checkmate() {
        // Lone white king on (9, 9), boxed in by a rook-backed gold
        let mut pos = Position::empty();
        pos.set_piece(sq(1, 1), piece(PieceKind::King, Color::Black));
        pos.set_piece(sq(9, 9), piece(PieceKind::King, Color::White));
        pos.set_piece(sq(8, 9), piece(PieceKind::Gold, Color::Black));
        pos.set_piece(sq(8, 1), piece(PieceKind::Rook, Color::Black));
        pos.set_turn(Color::White);
        assert!(is_check(&pos, Color::White));
        assert!(movegen::legal_moves(&pos, Color::White).is_empty());
        assert!(is_checkmate(&pos, Color::White));
        assert_eq!(game_status(&pos, Color::White), GameStatus::Checkmate);
    }

    #[test]
    fn test_checkmate_iff_check_and_no_moves() {
        let pos = Position::initial();
        assert!(!is_checkmate(&pos, Color::Black));
        // Checked but mobile: not mate
        let mut pos = Position::empty();
        pos.set_piece(sq(1, 5), piece(PieceKind::King, Color::Black));
        pos.set_piece(sq(9, 5), piece(PieceKind::King, Color::White));
        pos.set_piece(sq(7, 5), piece(PieceKind::Rook, Color::White));
        assert!(is_check(&pos, Color::Black));
        assert!(!is_checkmate(&pos, Color::Black));
    }

    #[test]
    fn test_stalemate_reported_distinctly() {
        // White king on (9, 9) is not attacked but every flight square is
        let mut pos = Position::empty();
        pos.set_piece(sq(1, 1), piece(PieceKind::King, Color::Black));
        pos.set_piece(sq(9, 9), piece(PieceKind::King, Color::White));
        pos.set_piece(sq(7, 8), piece(PieceKind::Rook, Color::Black));
        pos.set_piece(sq(7, 9), piece(PieceKind::Gold, Color::Black));
        pos.set_turn(Color::White);
        assert!(!is_check(&pos, Color::White));
        assert!(movegen::legal_moves(&pos, Color::White).is_empty());
        assert!(!is_checkmate(&pos, Color::White));
        assert_eq!(game_status(&pos, Color::White), GameStatus::Stalemate);
    }

    #[test]
    fn test_promotion_eligibility() {
        let color = Color::Black;
        // Into the zone, out of the zone, wholly inside
        assert!(promotion_eligible(PieceKind::Silver, sq(6, 5), sq(7, 4), color));
        assert!(promotion_eligible(PieceKind::Silver, sq(7, 5), sq(6, 4), color));
        assert!(promotion_eligible(PieceKind::Rook, sq(8, 1), sq(8, 9), color));
        assert!(!promotion_eligible(PieceKind::Silver, sq(5, 5), sq(6, 4), color));
        // Kings and golds never promote
        assert!(!promotion_eligible(PieceKind::Gold, sq(6, 5), sq(7, 5), color));
        assert!(!promotion_eligible(PieceKind::King, sq(6, 5), sq(7, 5), color));
    }

    #[test]
    fn test_forced_promotion_ranks() {
        assert!(must_promote(PieceKind::Pawn, sq(9, 5), Color::Black));
        assert!(must_promote(PieceKind::Lance, sq(9, 5), Color::Black));
        assert!(!must_promote(PieceKind::Pawn, sq(8, 5), Color::Black));
        assert!(must_promote(PieceKind::Knight, sq(8, 5), Color::Black));
        assert!(must_promote(PieceKind::Knight, sq(2, 5), Color::White));
        assert!(!must_promote(PieceKind::Knight, sq(3, 5), Color::White));
        assert!(!must_promote(PieceKind::Silver, sq(9, 5), Color::Black));
    }
}
