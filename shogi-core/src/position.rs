//! Position: board, hands and side to move

use serde::{Deserialize, Serialize};

use crate::board::Square;
use crate::movegen;
use crate::pieces::{hand_index, Color, Piece, PieceKind, HAND_ORDER};
use crate::rules::{self, RulesError};

/// A move, by value coordinates only; outlives the position it was
/// generated from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    /// A piece already on the board moves (and possibly captures/promotes)
    Board {
        from: Square,
        to: Square,
        piece: PieceKind,
        capture: bool,
        promote: bool,
    },
    /// A captured piece is dropped from the hand onto an empty square
    Drop { to: Square, piece: PieceKind },
}

impl Move {
    pub fn to(&self) -> Square {
        match *self {
            Move::Board { to, .. } | Move::Drop { to, .. } => to,
        }
    }

    pub fn piece(&self) -> PieceKind {
        match *self {
            Move::Board { piece, .. } | Move::Drop { piece, .. } => piece,
        }
    }

    pub fn is_drop(&self) -> bool {
        matches!(self, Move::Drop { .. })
    }

    pub fn is_capture(&self) -> bool {
        matches!(self, Move::Board { capture: true, .. })
    }

    pub fn is_promotion(&self) -> bool {
        matches!(self, Move::Board { promote: true, .. })
    }
}

/// Captured pieces available to drop, counted per base kind
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Hand {
    counts: [u8; HAND_ORDER.len()],
}

impl Hand {
    pub fn count(&self, kind: PieceKind) -> u8 {
        hand_index(kind).map_or(0, |i| self.counts[i])
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Kinds with a nonzero count, in `HAND_ORDER`
    pub fn kinds(&self) -> impl Iterator<Item = (PieceKind, u8)> + '_ {
        HAND_ORDER
            .iter()
            .enumerate()
            .filter(|&(i, _)| self.counts[i] > 0)
            .map(|(i, &kind)| (kind, self.counts[i]))
    }

    /// Kings and promoted kinds have no hand slot and are ignored
    pub(crate) fn add(&mut self, kind: PieceKind) {
        if let Some(i) = hand_index(kind) {
            self.counts[i] += 1;
        }
    }

    pub(crate) fn take(&mut self, kind: PieceKind) -> bool {
        match hand_index(kind) {
            Some(i) if self.counts[i] > 0 => {
                self.counts[i] -= 1;
                true
            }
            _ => false,
        }
    }
}

/// Full game position. Applying a move yields a new position; the
/// original is never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    /// `board[rank - 1][file - 1]`
    board: [[Option<Piece>; 9]; 9],
    hands: [Hand; 2],
    turn: Color,
}

const BACK_RANK: [PieceKind; 9] = [
    PieceKind::Lance,
    PieceKind::Knight,
    PieceKind::Silver,
    PieceKind::Gold,
    PieceKind::King,
    PieceKind::Gold,
    PieceKind::Silver,
    PieceKind::Knight,
    PieceKind::Lance,
];

impl Position {
    /// Empty board, empty hands, Black to move. Fixture constructor for
    /// tests and custom setups.
    pub fn empty() -> Self {
        Self {
            board: [[None; 9]; 9],
            hands: [Hand::default(), Hand::default()],
            turn: Color::Black,
        }
    }

    /// The standard starting layout
    pub fn initial() -> Self {
        let mut pos = Self::empty();
        let at = |rank, file| Square::new(rank, file).expect("fixed layout square");
        for (i, &kind) in BACK_RANK.iter().enumerate() {
            let file = i as u8 + 1;
            pos.put(at(1, file), kind, Color::Black);
            pos.put(at(9, file), kind, Color::White);
        }
        pos.put(at(2, 2), PieceKind::Bishop, Color::Black);
        pos.put(at(2, 8), PieceKind::Rook, Color::Black);
        pos.put(at(8, 2), PieceKind::Rook, Color::White);
        pos.put(at(8, 8), PieceKind::Bishop, Color::White);
        for file in 1..=9 {
            pos.put(at(3, file), PieceKind::Pawn, Color::Black);
            pos.put(at(7, file), PieceKind::Pawn, Color::White);
        }
        pos
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board[sq.rank() as usize - 1][sq.file() as usize - 1]
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn hand(&self, color: Color) -> &Hand {
        &self.hands[color.index()]
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        Square::all().find(|&sq| {
            self.piece_at(sq)
                .map_or(false, |p| p.kind == PieceKind::King && p.color == color)
        })
    }

    // ------------------------------------------------------------------
    // Setup helpers (fixtures, collaborators)
    // ------------------------------------------------------------------

    pub fn set_piece(&mut self, sq: Square, piece: Option<Piece>) {
        self.board[sq.rank() as usize - 1][sq.file() as usize - 1] = piece;
    }

    pub fn set_turn(&mut self, color: Color) {
        self.turn = color;
    }

    pub fn add_to_hand(&mut self, color: Color, kind: PieceKind) {
        self.hands[color.index()].add(kind);
    }

    fn put(&mut self, sq: Square, kind: PieceKind, color: Color) {
        self.set_piece(sq, Some(Piece { kind, color }));
    }

    // ------------------------------------------------------------------
    // Move application
    // ------------------------------------------------------------------

    /// Validate and apply a move for the side to move, returning the
    /// successor position. Illegal moves and illegal promotion flags are
    /// rejected, never silently corrected.
    pub fn apply_move(&self, mv: &Move) -> Result<Position, RulesError> {
        let color = self.turn;
        match *mv {
            Move::Board { from, to, piece, capture, promote } => {
                let mover = self
                    .piece_at(from)
                    .filter(|p| p.color == color && p.kind == piece)
                    .ok_or(RulesError::IllegalMove { from, to })?;
                let takes = self.piece_at(to).map_or(false, |p| p.color != color);
                if capture != takes || !movegen::is_valid_move(self, from, to, color) {
                    return Err(RulesError::IllegalMove { from, to });
                }
                if promote {
                    if !rules::promotion_eligible(mover.kind, from, to, color) {
                        return Err(RulesError::IllegalPromotion { piece });
                    }
                } else if rules::must_promote(mover.kind, to, color) {
                    return Err(RulesError::IllegalPromotion { piece });
                }
                Ok(self.apply_board_move(from, to, promote))
            }
            Move::Drop { to, piece } => {
                if !movegen::is_legal_drop(self, piece, to, color) {
                    return Err(RulesError::IllegalDrop { piece, to });
                }
                Ok(self.apply_drop(piece, to, color))
            }
        }
    }

    /// Unchecked board-move application; the mover's color is taken from
    /// the piece itself so the generator can probe either side
    pub(crate) fn apply_board_move(&self, from: Square, to: Square, promote: bool) -> Position {
        let mut next = self.clone();
        let Some(piece) = next.piece_at(from) else {
            return next;
        };
        next.set_piece(from, None);
        if let Some(captured) = next.piece_at(to) {
            next.hands[piece.color.index()].add(captured.kind.demote());
        }
        let kind = if promote {
            piece.kind.promote().unwrap_or(piece.kind)
        } else {
            piece.kind
        };
        next.set_piece(to, Some(Piece { kind, color: piece.color }));
        next.turn = piece.color.opponent();
        next
    }

    /// Unchecked drop application
    pub(crate) fn apply_drop(&self, kind: PieceKind, to: Square, color: Color) -> Position {
        let mut next = self.clone();
        next.hands[color.index()].take(kind);
        next.set_piece(to, Some(Piece { kind, color }));
        next.turn = color.opponent();
        next
    }
}
