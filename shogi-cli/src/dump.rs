//! Dump command - board diagram and SFEN for a position

use anyhow::{Context, Result};
use clap::Args;

use shogi_core::{sfen, Color, Position, Square, BOARD_SIZE};

#[derive(Args)]
pub struct DumpArgs {
    /// USI moves applied from the initial position, in order
    #[arg(long)]
    pub moves: Vec<String>,
}

pub fn run(args: DumpArgs) -> Result<()> {
    let pos = position_after(&args.moves)?;
    println!("{}", board_text(&pos));
    println!("sfen: {}", sfen::encode(&pos));
    Ok(())
}

/// The initial position with a sequence of USI moves applied
pub fn position_after(moves: &[String]) -> Result<Position> {
    let mut pos = Position::initial();
    for token in moves {
        let mv = sfen::decode_move(&pos, token)
            .with_context(|| format!("cannot parse move `{token}`"))?;
        pos = pos
            .apply_move(&mv)
            .with_context(|| format!("move `{token}` is illegal here"))?;
    }
    Ok(pos)
}

/// ASCII diagram, rank 9 at the top, file 9 on the left as in printed
/// shogi diagrams; White pieces lowercase, promoted kinds prefixed `+`
pub fn board_text(pos: &Position) -> String {
    let mut out = String::new();
    out.push_str("    9  8  7  6  5  4  3  2  1\n");
    for rank in (1..=BOARD_SIZE).rev() {
        out.push_str(&format!("{rank} |"));
        for file in (1..=BOARD_SIZE).rev() {
            let sq = Square::new(rank, file).expect("rank and file stay in 1..=9");
            match pos.piece_at(sq) {
                None => out.push_str(" . "),
                Some(piece) => {
                    let letter = match piece.color {
                        Color::Black => piece.kind.sfen_letter(),
                        Color::White => piece.kind.sfen_letter().to_ascii_lowercase(),
                    };
                    if piece.kind.is_promoted() {
                        out.push_str(&format!("+{letter} "));
                    } else {
                        out.push_str(&format!(" {letter} "));
                    }
                }
            }
        }
        out.push('\n');
    }
    for color in [Color::Black, Color::White] {
        let hand: Vec<String> = pos
            .hand(color)
            .kinds()
            .map(|(kind, count)| {
                if count > 1 {
                    format!("{}{}", count, kind.sfen_letter())
                } else {
                    kind.sfen_letter().to_string()
                }
            })
            .collect();
        if !hand.is_empty() {
            out.push_str(&format!("{:?} hand: {}\n", color, hand.join(" ")));
        }
    }
    out.push_str(&format!("{:?} to move", pos.turn()));
    out
}
