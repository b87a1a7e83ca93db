//! Board geometry: ranks, files and promotion zones

use serde::{Deserialize, Serialize};

use crate::pieces::Color;

/// Board side length
pub const BOARD_SIZE: u8 = 9;

/// Depth of the promotion zone (furthest ranks from a color's base)
pub const PROMOTION_ZONE_DEPTH: u8 = 3;

/// A board coordinate. Ranks increase away from Black's base; files are
/// plain 1..=9 integers. Construction is bounds-checked, so a `Square`
/// held anywhere in the crate is always on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSquare", into = "RawSquare")]
pub struct Square {
    rank: u8,
    file: u8,
}

impl Square {
    /// Create a square, or `None` if either coordinate is off the board
    pub fn new(rank: u8, file: u8) -> Option<Self> {
        if (1..=BOARD_SIZE).contains(&rank) && (1..=BOARD_SIZE).contains(&file) {
            Some(Self { rank, file })
        } else {
            None
        }
    }

    pub const fn rank(self) -> u8 {
        self.rank
    }

    pub const fn file(self) -> u8 {
        self.file
    }

    /// Square offset by (rank, file) deltas, or `None` if off the board
    pub fn offset(self, dr: i8, df: i8) -> Option<Self> {
        let rank = self.rank as i8 + dr;
        let file = self.file as i8 + df;
        if rank < 1 || file < 1 {
            return None;
        }
        Self::new(rank as u8, file as u8)
    }

    /// Iterate every square, rank 1 file 1 through rank 9 file 9
    pub fn all() -> impl Iterator<Item = Square> {
        (1..=BOARD_SIZE)
            .flat_map(|rank| (1..=BOARD_SIZE).map(move |file| Square { rank, file }))
    }
}

impl std::fmt::Display for Square {
    /// USI notation: file digit then rank letter (`a` = rank 9 .. `i` = rank 1)
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rank_letter = (b'a' + (BOARD_SIZE - self.rank)) as char;
        write!(f, "{}{}", self.file, rank_letter)
    }
}

/// Serde mirror so deserialized squares still pass the bounds check
#[derive(Clone, Copy, Serialize, Deserialize)]
struct RawSquare {
    rank: u8,
    file: u8,
}

impl TryFrom<RawSquare> for Square {
    type Error = String;

    fn try_from(raw: RawSquare) -> Result<Self, Self::Error> {
        Square::new(raw.rank, raw.file)
            .ok_or_else(|| format!("square ({}, {}) is off the board", raw.rank, raw.file))
    }
}

impl From<Square> for RawSquare {
    fn from(sq: Square) -> Self {
        RawSquare { rank: sq.rank, file: sq.file }
    }
}

/// True if the square lies in `color`'s promotion zone (the three ranks
/// furthest from that color's base)
pub fn in_promotion_zone(sq: Square, color: Color) -> bool {
    match color {
        Color::Black => sq.rank() > BOARD_SIZE - PROMOTION_ZONE_DEPTH,
        Color::White => sq.rank() <= PROMOTION_ZONE_DEPTH,
    }
}

/// Number of ranks between the square and the far edge from `color`'s
/// point of view (0 = furthest rank)
pub fn ranks_to_far_edge(sq: Square, color: Color) -> u8 {
    match color {
        Color::Black => BOARD_SIZE - sq.rank(),
        Color::White => sq.rank() - 1,
    }
}
