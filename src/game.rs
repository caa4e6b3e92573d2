//! Game layer for Beetle Battle.
//!
//! Implements the rules of the chain-reaction territory game:
//! - Board of cells whose capacity is their neighbor count
//! - Placement, overflow cascades and captures
//! - Win detection and the move history
//! - Notifications to an external observer

mod board;
mod events;
mod invariants;
mod location;
mod state;

pub use board::{Board, Cell, Piece, PieceId};
pub use events::{EventLog, GameEvent, GameObserver, NullObserver};
pub use invariants::{assert_invariants, check_invariants, InvariantViolation};
pub use location::{Color, Location, Move, ParseColorError};
pub use state::{Game, PendingJump, MIN_MOVES_FOR_WINNER};
