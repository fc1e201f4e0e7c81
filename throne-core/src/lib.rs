//! Throne Core - Rules engine for the Throne board game
//!
//! This crate provides the full game logic for Throne:
//! - Board geometry (5x5 grid, row/column coordinates)
//! - Piece kinds and movement rules
//! - Legal destination generation
//! - The match state machine: selection, moves, sacrifices, win conditions
//! - The serializable match snapshot exchanged in networked play

pub mod board;
pub mod pieces;
pub mod movegen;
pub mod engine;

// Re-exports for convenient access
pub use board::{Board, Square, BOARD_SIZE, DIRECTIONS, ORTHOGONALS};
pub use pieces::{BySide, Piece, PieceKind, Side};
pub use movegen::{legal_moves, CHAMPION_RANGE, TOWER_RANGE};
pub use engine::{
    ActionError, KillOutcome, MatchState, MoveOutcome, RuleEngine, Sacrifice, Selection,
};
