//! Shogi core - rules engine and built-in AI
//!
//! This crate provides the game core:
//! - Board geometry (9x9, validated rank/file coordinates)
//! - Piece kinds, promotion pairs and movement-pattern tables
//! - Position, hands and move application
//! - Legal move and drop generation (nifu, uchifuzume, king safety)
//! - Check, checkmate and stalemate detection
//! - Three single-ply AI difficulty tiers
//! - SFEN position encoding and USI move notation

pub mod ai;
pub mod board;
pub mod movegen;
pub mod pieces;
pub mod position;
pub mod rules;
pub mod sfen;

// Re-exports for convenient access
pub use ai::{select_move, Difficulty};
pub use board::{in_promotion_zone, Square, BOARD_SIZE, PROMOTION_ZONE_DEPTH};
pub use movegen::{is_legal_drop, is_valid_move, legal_moves};
pub use pieces::{hand_index, Color, Piece, PieceKind, HAND_ORDER};
pub use position::{Hand, Move, Position};
pub use rules::{demote_piece, game_status, is_check, is_checkmate, GameStatus, RulesError};
