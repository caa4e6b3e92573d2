//! Game records and replay.
//!
//! Games are fully determined by their move list, so a record holds only:
//! - `dimension` - The board size
//! - `moves` - Every accepted move, in order
//! - `winner` - The outcome, kept for readers of the file
//!
//! To view move N, re-run the game from the empty board through move N.
//!
//! # Time Travel
//!
//! - **Forward**: Play the next recorded move
//! - **Backward**: Re-run from move 0 to (`current_move` - 1)
//! - **Jump to move N**: Re-run from move 0 to N

mod render;
mod text;

pub use render::{render_ascii, render_plain};
pub use text::{MOVES_HEADER, RecordError};

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GameError;
use crate::game::{Color, Game, GameObserver, Move};

/// Everything needed to replay a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Board dimension.
    pub dimension: u16,
    /// Winner, or `None` for an unfinished or drawn game.
    pub winner: Option<Color>,
    /// Accepted moves, oldest first.
    pub moves: Vec<Move>,
}

impl GameRecord {
    /// Capture the move history and outcome of a game.
    #[must_use]
    pub fn from_game<O: GameObserver>(game: &Game<O>) -> Self {
        Self {
            dimension: game.dimension(),
            winner: game.get_winner(),
            moves: game.history().to_vec(),
        }
    }

    /// Encode in the flat text format.
    #[must_use]
    pub fn to_text(&self) -> String {
        text::to_text(self)
    }

    /// Parse the flat text format.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a well-formed record.
    pub fn parse(input: &str) -> Result<Self, RecordError> {
        text::parse(input)
    }

    /// Encode as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Save in the flat text format.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.to_text())
    }

    /// Save as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_json(&self, path: &Path) -> Result<(), ReplayError> {
        let json = self.to_json().map_err(ReplayError::Json)?;
        fs::write(path, json).map_err(ReplayError::Io)
    }

    /// Load a record saved in either format.
    ///
    /// Files whose first non-blank character is `{` are read as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let contents = fs::read_to_string(path).map_err(ReplayError::Io)?;
        if contents.trim_start().starts_with('{') {
            serde_json::from_str(&contents).map_err(ReplayError::Json)
        } else {
            Self::parse(&contents).map_err(ReplayError::Record)
        }
    }
}

/// Error type for replay operations.
#[derive(Debug)]
pub enum ReplayError {
    /// Reading or writing a record failed.
    Io(io::Error),
    /// The text encoding is malformed.
    Record(RecordError),
    /// The JSON encoding is malformed.
    Json(serde_json::Error),
    /// The recorded dimension is not playable.
    Dimension(GameError),
    /// A recorded move was made by the wrong color.
    WrongColor {
        /// 1-based move number.
        number: usize,
        /// The offending move.
        recorded: Move,
        /// The color whose turn it was.
        expected: Color,
    },
    /// A recorded move is not legal in its position.
    IllegalMove {
        /// 1-based move number.
        number: usize,
        /// The offending move.
        recorded: Move,
    },
    /// The recorded winner disagrees with the replayed outcome.
    WinnerMismatch {
        /// Winner stored in the record.
        recorded: Option<Color>,
        /// Winner after replaying every move.
        actual: Option<Color>,
    },
    /// Move number out of bounds.
    MoveOutOfBounds {
        /// Requested move.
        requested: usize,
        /// Number of moves in the record.
        total: usize,
    },
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Record(e) => write!(f, "Malformed record: {e}"),
            Self::Json(e) => write!(f, "Malformed JSON record: {e}"),
            Self::Dimension(e) => write!(f, "Unplayable record: {e}"),
            Self::WrongColor {
                number,
                recorded,
                expected,
            } => write!(
                f,
                "Move {number} at {} is played by {} but it is {expected}'s turn",
                recorded.location, recorded.color
            ),
            Self::IllegalMove { number, recorded } => write!(
                f,
                "Move {number} by {} at {} is illegal",
                recorded.color, recorded.location
            ),
            Self::WinnerMismatch { recorded, actual } => write!(
                f,
                "Record names winner {} but the moves produce {}",
                winner_name(*recorded),
                winner_name(*actual)
            ),
            Self::MoveOutOfBounds { requested, total } => {
                write!(f, "Move {requested} out of bounds (max: {total})")
            }
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Record(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Dimension(e) => Some(e),
            _ => None,
        }
    }
}

fn winner_name(winner: Option<Color>) -> &'static str {
    winner.map_or("none", Color::name)
}

/// Replay engine - steps through a recorded game.
///
/// Since games are deterministic, this engine can:
/// - Step forward by playing one recorded move
/// - Step backward by replaying from move 0
/// - Jump to any move by replaying from move 0
#[derive(Debug, Clone)]
pub struct ReplayEngine {
    /// The record being replayed.
    record: GameRecord,
    /// Position after `current_move` moves.
    game: Game,
    /// Number of moves applied.
    current_move: usize,
}

impl ReplayEngine {
    /// Create a replay engine positioned before the first move.
    ///
    /// The whole record is checked up front.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimension is invalid, a move is illegal or
    /// out of turn, or the recorded winner is wrong.
    pub fn new(record: GameRecord) -> Result<Self, ReplayError> {
        Self::new_at_move(record, 0)
    }

    /// Create a replay engine positioned after `target` moves.
    ///
    /// # Errors
    ///
    /// Returns an error if the record does not replay cleanly or `target`
    /// exceeds the number of recorded moves.
    pub fn new_at_move(record: GameRecord, target: usize) -> Result<Self, ReplayError> {
        let total = record.moves.len();
        let full = replay_prefix(&record, total)?;
        if full.get_winner() != record.winner {
            return Err(ReplayError::WinnerMismatch {
                recorded: record.winner,
                actual: full.get_winner(),
            });
        }
        debug!(dimension = record.dimension, moves = total, "record verified");

        let game = if target == total {
            full
        } else {
            check_bounds(target, total)?;
            replay_prefix(&record, target)?
        };

        Ok(Self {
            record,
            game,
            current_move: target,
        })
    }

    /// Get the record.
    #[must_use]
    pub fn record(&self) -> &GameRecord {
        &self.record
    }

    /// Number of moves applied so far.
    #[must_use]
    pub fn current_move(&self) -> usize {
        self.current_move
    }

    /// Number of moves in the record.
    #[must_use]
    pub fn total_moves(&self) -> usize {
        self.record.moves.len()
    }

    /// Current position.
    #[must_use]
    pub fn state(&self) -> &Game {
        &self.game
    }

    /// Check whether every recorded move has been applied.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.current_move == self.total_moves()
    }

    /// Apply the next recorded move.
    ///
    /// # Errors
    ///
    /// Returns an error if already at the last move.
    pub fn step_forward(&mut self) -> Result<(), ReplayError> {
        let next = self.current_move + 1;
        check_bounds(next, self.total_moves())?;
        apply(&mut self.game, &self.record.moves[self.current_move], next)?;
        self.current_move = next;
        Ok(())
    }

    /// Step back one move.
    ///
    /// This replays from move 0 to (`current_move` - 1).
    ///
    /// # Errors
    ///
    /// Returns an error if already at move 0.
    pub fn step_backward(&mut self) -> Result<(), ReplayError> {
        let Some(target) = self.current_move.checked_sub(1) else {
            return Err(ReplayError::MoveOutOfBounds {
                requested: 0,
                total: self.total_moves(),
            });
        };
        self.goto_move(target)
    }

    /// Jump to the position after `target` moves.
    ///
    /// # Errors
    ///
    /// Returns an error if `target` exceeds the number of recorded moves.
    pub fn goto_move(&mut self, target: usize) -> Result<(), ReplayError> {
        check_bounds(target, self.total_moves())?;
        self.game = replay_prefix(&self.record, target)?;
        self.current_move = target;
        Ok(())
    }

    /// Render the current position with ANSI colors.
    #[must_use]
    pub fn render_ascii(&self) -> String {
        render_ascii(&self.game, self.current_move, self.total_moves())
    }

    /// Render the current position without colors.
    #[must_use]
    pub fn render_plain(&self) -> String {
        render_plain(self.game.board())
    }
}

fn check_bounds(requested: usize, total: usize) -> Result<(), ReplayError> {
    if requested > total {
        return Err(ReplayError::MoveOutOfBounds { requested, total });
    }
    Ok(())
}

fn replay_prefix(record: &GameRecord, count: usize) -> Result<Game, ReplayError> {
    let mut game = Game::new(record.dimension).map_err(ReplayError::Dimension)?;
    for (index, recorded) in record.moves.iter().take(count).enumerate() {
        apply(&mut game, recorded, index + 1)?;
    }
    Ok(game)
}

fn apply(game: &mut Game, recorded: &Move, number: usize) -> Result<(), ReplayError> {
    if recorded.color != game.turn() {
        return Err(ReplayError::WrongColor {
            number,
            recorded: *recorded,
            expected: game.turn(),
        });
    }
    if !game.do_move(recorded.location) {
        return Err(ReplayError::IllegalMove {
            number,
            recorded: *recorded,
        });
    }
    Ok(())
}
