//! SFEN position encoding and USI move notation

use thiserror::Error;

use crate::board::{Square, BOARD_SIZE};
use crate::pieces::{hand_index, Color, PieceKind};
use crate::position::{Move, Position};

/// Move-token decode failures; recoverable, the caller treats them like
/// an engine timeout
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveDecodeError {
    #[error("malformed move token `{0}`")]
    Malformed(String),
    #[error("no piece on source square {0}")]
    EmptySource(Square),
}

/// Encode a position: board ranks 9 down to 1 (files 1..9 within each),
/// run-length-encoded empties, `+` prefix on promoted kinds, lowercase
/// for White; then side to move, hand composition and a constant move
/// number
pub fn encode(pos: &Position) -> String {
    let mut out = String::new();
    for rank in (1..=BOARD_SIZE).rev() {
        let mut run = 0;
        for file in 1..=BOARD_SIZE {
            let sq = Square::new(rank, file).expect("rank and file stay in 1..=9");
            match pos.piece_at(sq) {
                None => run += 1,
                Some(piece) => {
                    if run > 0 {
                        out.push_str(&run.to_string());
                        run = 0;
                    }
                    if piece.kind.is_promoted() {
                        out.push('+');
                    }
                    let letter = piece.kind.sfen_letter();
                    out.push(match piece.color {
                        Color::Black => letter,
                        Color::White => letter.to_ascii_lowercase(),
                    });
                }
            }
        }
        if run > 0 {
            out.push_str(&run.to_string());
        }
        if rank > 1 {
            out.push('/');
        }
    }

    out.push(' ');
    out.push(match pos.turn() {
        Color::Black => 'b',
        Color::White => 'w',
    });
    out.push(' ');
    out.push_str(&encode_hands(pos));
    out.push_str(" 1");
    out
}

fn encode_hands(pos: &Position) -> String {
    let mut hands = String::new();
    for color in [Color::Black, Color::White] {
        for (kind, count) in pos.hand(color).kinds() {
            if count > 1 {
                hands.push_str(&count.to_string());
            }
            let letter = kind.sfen_letter();
            hands.push(match color {
                Color::Black => letter,
                Color::White => letter.to_ascii_lowercase(),
            });
        }
    }
    if hands.is_empty() {
        hands.push('-');
    }
    hands
}

/// Encode a move in USI notation (`7g7f`, `2b8h+`, `P*5e`)
pub fn encode_move(mv: &Move) -> String {
    match *mv {
        Move::Drop { to, piece } => format!("{}*{}", piece.sfen_letter(), to),
        Move::Board { from, to, promote, .. } => {
            format!("{}{}{}", from, to, if promote { "+" } else { "" })
        }
    }
}

/// Decode a USI move token against a position. Board moves resolve the
/// moving kind and capture flag from the position; `resign`/`win` are
/// not moves and are handled by the caller.
pub fn decode_move(pos: &Position, token: &str) -> Result<Move, MoveDecodeError> {
    let malformed = || MoveDecodeError::Malformed(token.to_string());
    let chars: Vec<char> = token.trim().chars().collect();

    if chars.len() == 4 && chars[1] == '*' {
        let piece = PieceKind::from_sfen_letter(chars[0])
            .filter(|&k| hand_index(k).is_some())
            .ok_or_else(malformed)?;
        let to = parse_square(chars[2], chars[3]).ok_or_else(malformed)?;
        return Ok(Move::Drop { to, piece });
    }

    let promote = match chars.len() {
        4 => false,
        5 if chars[4] == '+' => true,
        _ => return Err(malformed()),
    };
    let from = parse_square(chars[0], chars[1]).ok_or_else(malformed)?;
    let to = parse_square(chars[2], chars[3]).ok_or_else(malformed)?;
    let mover = pos
        .piece_at(from)
        .ok_or(MoveDecodeError::EmptySource(from))?;
    let capture = pos.piece_at(to).map_or(false, |p| p.color != mover.color);
    Ok(Move::Board { from, to, piece: mover.kind, capture, promote })
}

/// File digit plus rank letter; `a` maps to rank 9 down to `i` = rank 1
fn parse_square(file_c: char, rank_c: char) -> Option<Square> {
    let file = file_c.to_digit(10)? as u8;
    if !rank_c.is_ascii_lowercase() || rank_c > 'i' {
        return None;
    }
    let rank = BOARD_SIZE - (rank_c as u8 - b'a');
    Square::new(rank, file)
}
