//! Computer opponent.
//!
//! A greedy one-ply search over a positional heuristic:
//! - [`board_value`] scores a position for one color
//! - [`critical_chains`] finds groups of cells about to overflow together
//! - [`Evaluator`] plays every candidate on a copy and keeps the best

mod chains;
mod heuristic;
mod search;

pub use chains::critical_chains;
pub use heuristic::{LOSS_VALUE, WIN_VALUE, board_value};
pub use search::{Evaluator, ScoredMove, random_move};
