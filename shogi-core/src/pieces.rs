//! Piece kinds, colors and movement-pattern tables

use serde::{Deserialize, Serialize};

/// Player color. Black is the first player and moves toward rank 9.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black = 0,
    White = 1,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Rank delta of one step forward
    pub fn forward(self) -> i8 {
        match self {
            Color::Black => 1,
            Color::White => -1,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Piece kind, promoted variants included
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Lance,
    Knight,
    Silver,
    Gold,
    Bishop,
    Rook,
    King,
    ProPawn,
    ProLance,
    ProKnight,
    ProSilver,
    ProBishop,
    ProRook,
}

/// A piece on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

/// (rank delta, file delta) from the moving piece's square
pub type Delta = (i8, i8);

// Single-step offsets, from Black's point of view (forward = +rank).
const BLACK_PAWN_STEPS: [Delta; 1] = [(1, 0)];
const WHITE_PAWN_STEPS: [Delta; 1] = [(-1, 0)];
const BLACK_KNIGHT_STEPS: [Delta; 2] = [(2, -1), (2, 1)];
const WHITE_KNIGHT_STEPS: [Delta; 2] = [(-2, -1), (-2, 1)];
const BLACK_SILVER_STEPS: [Delta; 5] = [(1, -1), (1, 0), (1, 1), (-1, -1), (-1, 1)];
const WHITE_SILVER_STEPS: [Delta; 5] = [(-1, -1), (-1, 0), (-1, 1), (1, -1), (1, 1)];
const BLACK_GOLD_STEPS: [Delta; 6] = [(1, -1), (1, 0), (1, 1), (0, -1), (0, 1), (-1, 0)];
const WHITE_GOLD_STEPS: [Delta; 6] = [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, 0)];
const KING_STEPS: [Delta; 8] = [
    (1, -1), (1, 0), (1, 1),
    (0, -1), (0, 1),
    (-1, -1), (-1, 0), (-1, 1),
];
const ORTHO_STEPS: [Delta; 4] = [(1, 0), (0, -1), (0, 1), (-1, 0)];
const DIAG_STEPS: [Delta; 4] = [(1, -1), (1, 1), (-1, -1), (-1, 1)];

// Sliding ray directions.
const BLACK_LANCE_RAYS: [Delta; 1] = [(1, 0)];
const WHITE_LANCE_RAYS: [Delta; 1] = [(-1, 0)];
const ROOK_RAYS: [Delta; 4] = ORTHO_STEPS;
const BISHOP_RAYS: [Delta; 4] = DIAG_STEPS;

impl PieceKind {
    /// Promoted counterpart, or `None` for kinds that never promote
    pub fn promote(self) -> Option<PieceKind> {
        match self {
            PieceKind::Pawn => Some(PieceKind::ProPawn),
            PieceKind::Lance => Some(PieceKind::ProLance),
            PieceKind::Knight => Some(PieceKind::ProKnight),
            PieceKind::Silver => Some(PieceKind::ProSilver),
            PieceKind::Bishop => Some(PieceKind::ProBishop),
            PieceKind::Rook => Some(PieceKind::ProRook),
            PieceKind::Gold
            | PieceKind::King
            | PieceKind::ProPawn
            | PieceKind::ProLance
            | PieceKind::ProKnight
            | PieceKind::ProSilver
            | PieceKind::ProBishop
            | PieceKind::ProRook => None,
        }
    }

    /// Base kind; identity for kinds that are already base
    pub fn demote(self) -> PieceKind {
        match self {
            PieceKind::ProPawn => PieceKind::Pawn,
            PieceKind::ProLance => PieceKind::Lance,
            PieceKind::ProKnight => PieceKind::Knight,
            PieceKind::ProSilver => PieceKind::Silver,
            PieceKind::ProBishop => PieceKind::Bishop,
            PieceKind::ProRook => PieceKind::Rook,
            PieceKind::Pawn
            | PieceKind::Lance
            | PieceKind::Knight
            | PieceKind::Silver
            | PieceKind::Gold
            | PieceKind::Bishop
            | PieceKind::Rook
            | PieceKind::King => self,
        }
    }

    pub fn is_promoted(self) -> bool {
        self != self.demote()
    }

    pub fn can_promote(self) -> bool {
        self.promote().is_some()
    }

    /// Material value used by the AI tiers
    pub fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 100,
            PieceKind::Lance => 300,
            PieceKind::Knight => 350,
            PieceKind::Silver => 500,
            PieceKind::Gold => 600,
            PieceKind::Bishop => 800,
            PieceKind::Rook => 1000,
            PieceKind::King => 100_000,
            // Promoted minors move like gold
            PieceKind::ProPawn
            | PieceKind::ProLance
            | PieceKind::ProKnight
            | PieceKind::ProSilver => 600,
            PieceKind::ProBishop => 1000,
            PieceKind::ProRook => 1200,
        }
    }

    /// SFEN letter of the base kind (promoted kinds emit a `+` prefix
    /// plus their base letter)
    pub fn sfen_letter(self) -> char {
        match self.demote() {
            PieceKind::Pawn => 'P',
            PieceKind::Lance => 'L',
            PieceKind::Knight => 'N',
            PieceKind::Silver => 'S',
            PieceKind::Gold => 'G',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::King => 'K',
            _ => unreachable!("demote returns base kinds only"),
        }
    }

    /// Inverse of `sfen_letter` for base kinds (uppercase input)
    pub fn from_sfen_letter(c: char) -> Option<PieceKind> {
        match c {
            'P' => Some(PieceKind::Pawn),
            'L' => Some(PieceKind::Lance),
            'N' => Some(PieceKind::Knight),
            'S' => Some(PieceKind::Silver),
            'G' => Some(PieceKind::Gold),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Single-step movement offsets for this kind
    pub fn steps(self, color: Color) -> &'static [Delta] {
        match (self, color) {
            (PieceKind::Pawn, Color::Black) => &BLACK_PAWN_STEPS,
            (PieceKind::Pawn, Color::White) => &WHITE_PAWN_STEPS,
            (PieceKind::Knight, Color::Black) => &BLACK_KNIGHT_STEPS,
            (PieceKind::Knight, Color::White) => &WHITE_KNIGHT_STEPS,
            (PieceKind::Silver, Color::Black) => &BLACK_SILVER_STEPS,
            (PieceKind::Silver, Color::White) => &WHITE_SILVER_STEPS,
            (
                PieceKind::Gold
                | PieceKind::ProPawn
                | PieceKind::ProLance
                | PieceKind::ProKnight
                | PieceKind::ProSilver,
                Color::Black,
            ) => &BLACK_GOLD_STEPS,
            (
                PieceKind::Gold
                | PieceKind::ProPawn
                | PieceKind::ProLance
                | PieceKind::ProKnight
                | PieceKind::ProSilver,
                Color::White,
            ) => &WHITE_GOLD_STEPS,
            (PieceKind::King, _) => &KING_STEPS,
            // Horse and dragon add the king steps their rays lack
            (PieceKind::ProBishop, _) => &ORTHO_STEPS,
            (PieceKind::ProRook, _) => &DIAG_STEPS,
            (PieceKind::Lance | PieceKind::Bishop | PieceKind::Rook, _) => &[],
        }
    }

    /// Sliding ray directions for this kind
    pub fn rays(self, color: Color) -> &'static [Delta] {
        match (self, color) {
            (PieceKind::Lance, Color::Black) => &BLACK_LANCE_RAYS,
            (PieceKind::Lance, Color::White) => &WHITE_LANCE_RAYS,
            (PieceKind::Bishop | PieceKind::ProBishop, _) => &BISHOP_RAYS,
            (PieceKind::Rook | PieceKind::ProRook, _) => &ROOK_RAYS,
            (
                PieceKind::Pawn
                | PieceKind::Knight
                | PieceKind::Silver
                | PieceKind::Gold
                | PieceKind::King
                | PieceKind::ProPawn
                | PieceKind::ProLance
                | PieceKind::ProKnight
                | PieceKind::ProSilver,
                _,
            ) => &[],
        }
    }
}

/// Droppable base kinds in hand-priority order; fixes both drop-move
/// grouping and SFEN hand emission
pub const HAND_ORDER: [PieceKind; 7] = [
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Gold,
    PieceKind::Silver,
    PieceKind::Knight,
    PieceKind::Lance,
    PieceKind::Pawn,
];

/// Index of a base kind within `HAND_ORDER`, `None` for King and
/// promoted kinds
pub fn hand_index(kind: PieceKind) -> Option<usize> {
    HAND_ORDER.iter().position(|&k| k == kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [PieceKind; 14] = [
        PieceKind::Pawn,
        PieceKind::Lance,
        PieceKind::Knight,
        PieceKind::Silver,
        PieceKind::Gold,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::King,
        PieceKind::ProPawn,
        PieceKind::ProLance,
        PieceKind::ProKnight,
        PieceKind::ProSilver,
        PieceKind::ProBishop,
        PieceKind::ProRook,
    ];

    #[test]
    fn test_promote_demote_round_trip() {
        for kind in ALL_KINDS {
            if let Some(promoted) = kind.promote() {
                assert_eq!(promoted.demote(), kind, "{kind:?} should round-trip");
            }
        }
    }

    #[test]
    fn test_demote_idempotent() {
        for kind in ALL_KINDS {
            assert_eq!(kind.demote(), kind.demote().demote());
        }
    }

    #[test]
    fn test_king_and_gold_never_promote() {
        assert_eq!(PieceKind::King.promote(), None);
        assert_eq!(PieceKind::Gold.promote(), None);
    }

    #[test]
    fn test_value_ordering() {
        let v = |k: PieceKind| k.value();
        assert!(v(PieceKind::King) > 10 * v(PieceKind::Rook));
        assert!(v(PieceKind::Rook) > v(PieceKind::Bishop));
        assert!(v(PieceKind::Bishop) > v(PieceKind::Gold));
        assert!(v(PieceKind::Gold) > v(PieceKind::Silver));
        assert!(v(PieceKind::Silver) > v(PieceKind::Knight));
        assert!(v(PieceKind::Knight) > v(PieceKind::Lance));
        assert!(v(PieceKind::Lance) > v(PieceKind::Pawn));
    }

    #[test]
    fn test_sfen_letters() {
        assert_eq!(PieceKind::Pawn.sfen_letter(), 'P');
        assert_eq!(PieceKind::ProRook.sfen_letter(), 'R');
        for kind in [
            PieceKind::Pawn,
            PieceKind::Lance,
            PieceKind::Knight,
            PieceKind::Silver,
            PieceKind::Gold,
            PieceKind::Bishop,
            PieceKind::Rook,
            PieceKind::King,
        ] {
            assert_eq!(PieceKind::from_sfen_letter(kind.sfen_letter()), Some(kind));
        }
    }

    #[test]
    fn test_movement_mirroring() {
        // White patterns are Black patterns with the rank delta negated
        for kind in ALL_KINDS {
            let mut mirrored: Vec<Delta> = kind
                .steps(Color::Black)
                .iter()
                .map(|&(dr, df)| (-dr, df))
                .collect();
            let mut white: Vec<Delta> = kind.steps(Color::White).to_vec();
            mirrored.sort_unstable();
            white.sort_unstable();
            assert_eq!(mirrored, white, "steps of {kind:?} should mirror");
        }
    }

    #[test]
    fn test_promoted_minors_move_like_gold() {
        for kind in [
            PieceKind::ProPawn,
            PieceKind::ProLance,
            PieceKind::ProKnight,
            PieceKind::ProSilver,
        ] {
            assert_eq!(kind.steps(Color::Black), PieceKind::Gold.steps(Color::Black));
            assert!(kind.rays(Color::Black).is_empty());
        }
    }

    #[test]
    fn test_hand_index() {
        assert_eq!(hand_index(PieceKind::Rook), Some(0));
        assert_eq!(hand_index(PieceKind::Pawn), Some(6));
        assert_eq!(hand_index(PieceKind::King), None);
        assert_eq!(hand_index(PieceKind::ProPawn), None);
    }
}
