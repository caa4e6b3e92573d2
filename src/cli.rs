//! CLI command implementations for Beetle Battle.

pub(crate) mod play;
pub(crate) mod replay;
pub(crate) mod tournament;

mod output;

use beetle_battle::tournament::Strategy;
use clap::ValueEnum;
use std::error::Error;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Who controls one side in the `play` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum PlayerKind {
    /// Moves typed on stdin.
    Human,
    /// Greedy computer player.
    Greedy,
    /// Random computer player.
    Random,
}

impl PlayerKind {
    /// The computer strategy, or `None` for a human.
    pub(crate) fn strategy(self) -> Option<Strategy> {
        match self {
            Self::Human => None,
            Self::Greedy => Some(Strategy::Greedy),
            Self::Random => Some(Strategy::Random),
        }
    }
}

/// Computer strategy for the `tournament` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum StrategyArg {
    /// Greedy one-move lookahead.
    Greedy,
    /// Uniformly random legal moves.
    Random,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Greedy => Strategy::Greedy,
            StrategyArg::Random => Strategy::Random,
        }
    }
}

/// File format for saved records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum RecordFormat {
    /// Flat text with a CSV move table.
    Text,
    /// JSON.
    Json,
}

/// Output format for the `replay` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ReplayFormat {
    /// Interactive stepping on stdin.
    Step,
    /// Every position with ANSI colors.
    Text,
    /// Every position without colors.
    Plain,
}

/// Output format for the `tournament` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum TournamentFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<beetle_battle::GameError> for CliError {
    fn from(e: beetle_battle::GameError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<beetle_battle::tournament::TournamentError> for CliError {
    fn from(e: beetle_battle::tournament::TournamentError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<beetle_battle::replay::ReplayError> for CliError {
    fn from(e: beetle_battle::replay::ReplayError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON serialization failed: {e}"))
    }
}

/// Seed from the clock, for runs without `--seed`.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42)
}
