// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Beetle Battle: a two-player chain-reaction territory game.
//!
//! Players take turns dropping beetles onto an N×N board. A cell holds as
//! many beetles as it has neighbors; one more and it bursts, sending one
//! beetle to each neighbor and capturing whatever lives there. A player
//! wins once the opponent has no cells left.
//!
//! This crate provides:
//! - The rules engine with cascade resolution and change notifications
//! - A greedy computer opponent
//! - Game records, replay and terminal rendering
//! - Seeded computer-vs-computer tournaments
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Tournament Runner  /  Replay      │
//! ├─────────────────────────────────────┤
//! │         Evaluator (ai)              │
//! ├─────────────────────────────────────┤
//! │    Engine (Game) + Observers        │
//! ├─────────────────────────────────────┤
//! │         Board / Cells               │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use beetle_battle::{Color, Game, Location};
//!
//! let mut game = Game::new(3).unwrap();
//! assert!(game.do_move(Location::new(0, 0)));
//! assert_eq!(game.turn(), Color::Blue);
//! assert!(!game.check_move(Location::new(0, 0)));
//! ```

pub mod ai;
pub mod error;
pub mod game;
pub mod replay;
pub mod tournament;

pub use error::{GameError, MAX_DIMENSION, MIN_DIMENSION};

// Re-export key game types at crate root for convenience
pub use game::{
    Board, Cell, Color, EventLog, Game, GameEvent, GameObserver, Location, Move, NullObserver,
    Piece, PieceId,
};
