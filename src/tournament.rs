//! Computer-vs-computer matches.
//!
//! Provides a pure function interface: `(seed, strategies) -> GameResult`
//!
//! The tournament runner handles:
//! - Seeded move selection, so every game is reproducible from its seed
//! - Move caps, so games between weak strategies still terminate
//! - Parallel batches with rayon and aggregated statistics

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::ai::{Evaluator, random_move};
use crate::error::GameError;
use crate::game::{Board, Color, Game, GameObserver, Location};
use crate::replay::GameRecord;

/// How a computer player picks its moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Highest heuristic value after one move, ties broken at random.
    Greedy,
    /// Uniformly random legal move.
    Random,
}

impl Strategy {
    /// Lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Strategy::Greedy => "greedy",
            Strategy::Random => "random",
        }
    }

    /// Pick a move for the side to move.
    ///
    /// Returns `None` when the game is over.
    pub fn choose_move<O, R>(self, evaluator: &Evaluator, game: &Game<O>, rng: &mut R) -> Option<Location>
    where
        O: GameObserver,
        R: Rng + ?Sized,
    {
        match self {
            Strategy::Greedy => evaluator.best_move(game, rng),
            Strategy::Random => random_move(game, rng),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "greedy" => Ok(Strategy::Greedy),
            "random" => Ok(Strategy::Random),
            _ => Err(format!("unknown strategy {s:?} (expected greedy or random)")),
        }
    }
}

/// Configuration for a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchConfig {
    /// Board dimension.
    pub dimension: u16,
    /// Moves played before the game is scored as a draw.
    pub max_moves: usize,
    /// Score greedy candidates on the rayon pool.
    pub parallel_search: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            dimension: 5,
            max_moves: 500,
            parallel_search: false,
        }
    }
}

/// Final result of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// The seed used for this game.
    pub seed: u64,
    /// Strategies for red and blue.
    pub strategies: [Strategy; 2],
    /// The winner (None if the move cap was reached).
    pub winner: Option<Color>,
    /// Total moves played.
    pub moves_played: usize,
    /// Full record, for saving or replay.
    pub record: GameRecord,
}

/// Error type for tournament operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TournamentError {
    /// The configured board cannot be built.
    InvalidConfig(GameError),
    /// A strategy found no move in a game that is not over.
    NoMove {
        /// Game seed.
        seed: u64,
        /// 1-based number of the move that could not be chosen.
        move_number: usize,
    },
}

impl fmt::Display for TournamentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(e) => write!(f, "Invalid match configuration: {e}"),
            Self::NoMove { seed, move_number } => {
                write!(f, "No move available at move {move_number} (seed {seed})")
            }
        }
    }
}

impl std::error::Error for TournamentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidConfig(e) => Some(e),
            Self::NoMove { .. } => None,
        }
    }
}

const fn seat(color: Color) -> usize {
    match color {
        Color::Red => 0,
        Color::Blue => 1,
    }
}

/// Run a complete game with the given seed and strategies.
///
/// `strategies[0]` plays red, `strategies[1]` plays blue.
///
/// # Determinism
///
/// Given the same seed, strategies and configuration, this function always
/// produces the same `GameResult`, with or without parallel search.
///
/// # Errors
///
/// Returns an error if the configured dimension is invalid, or if a strategy
/// fails to produce a legal move before the game ends.
pub fn run_game(
    seed: u64,
    strategies: [Strategy; 2],
    config: &MatchConfig,
) -> Result<GameResult, TournamentError> {
    let mut game = Game::new(config.dimension).map_err(TournamentError::InvalidConfig)?;
    let mut rng = StdRng::seed_from_u64(seed);
    let evaluator = Evaluator {
        parallel: config.parallel_search,
    };

    while !game.is_over() && game.history().len() < config.max_moves {
        let strategy = strategies[seat(game.turn())];
        let move_number = game.history().len() + 1;
        let location = strategy
            .choose_move(&evaluator, &game, &mut rng)
            .ok_or(TournamentError::NoMove { seed, move_number })?;
        if !game.do_move(location) {
            return Err(TournamentError::NoMove { seed, move_number });
        }
    }

    let winner = game.get_winner();
    debug!(
        seed,
        winner = winner.map_or("none", Color::name),
        moves = game.history().len(),
        "game finished"
    );

    Ok(GameResult {
        seed,
        strategies,
        winner,
        moves_played: game.history().len(),
        record: GameRecord::from_game(&game),
    })
}

/// Aggregated results over many games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TournamentStats {
    /// Total games played.
    pub games_played: u64,
    /// Games won by red.
    pub red_wins: u64,
    /// Games won by blue.
    pub blue_wins: u64,
    /// Games stopped by the move cap.
    pub draws: u64,
    /// Total moves across all games.
    pub total_moves: u64,
}

impl TournamentStats {
    /// Create empty stats.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a game result to the stats.
    pub fn add_result(&mut self, result: &GameResult) {
        self.games_played += 1;
        self.total_moves += result.moves_played as u64;
        match result.winner {
            Some(Color::Red) => self.red_wins += 1,
            Some(Color::Blue) => self.blue_wins += 1,
            None => self.draws += 1,
        }
    }

    /// Merge another set of stats into this one.
    pub fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        self.red_wins += other.red_wins;
        self.blue_wins += other.blue_wins;
        self.draws += other.draws;
        self.total_moves += other.total_moves;
    }

    /// Wins for one color.
    #[must_use]
    pub const fn wins(&self, color: Color) -> u64 {
        match color {
            Color::Red => self.red_wins,
            Color::Blue => self.blue_wins,
        }
    }

    /// Win rate for one color (0.0-1.0).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn win_rate(&self, color: Color) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.wins(color) as f64 / self.games_played as f64
    }

    /// Average moves per game.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn avg_moves(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_moves as f64 / self.games_played as f64
    }
}

/// Play `games` games in parallel, seeded `base_seed`, `base_seed + 1`, ...
///
/// `on_game` is called from worker threads once per finished game.
///
/// # Errors
///
/// Returns an error if the configured dimension is invalid, or the first
/// error of any game that could not be completed. No partial statistics are
/// returned in that case.
pub fn run_tournament<F>(
    games: u64,
    base_seed: u64,
    strategies: [Strategy; 2],
    config: &MatchConfig,
    on_game: F,
) -> Result<TournamentStats, TournamentError>
where
    F: Fn(&GameResult) + Sync,
{
    Board::new(config.dimension).map_err(TournamentError::InvalidConfig)?;

    let stats = collect_stats(
        games,
        base_seed,
        |seed| run_game(seed, strategies, config),
        on_game,
    )?;

    info!(
        games = stats.games_played,
        red = %strategies[0],
        blue = %strategies[1],
        red_wins = stats.red_wins,
        blue_wins = stats.blue_wins,
        draws = stats.draws,
        "tournament finished"
    );

    Ok(stats)
}

/// Run `play` for every seed and fold the results into one `TournamentStats`.
fn collect_stats<P, F>(
    games: u64,
    base_seed: u64,
    play: P,
    on_game: F,
) -> Result<TournamentStats, TournamentError>
where
    P: Fn(u64) -> Result<GameResult, TournamentError> + Sync,
    F: Fn(&GameResult) + Sync,
{
    // Each worker accumulates into its own stats; merged at the end.
    (0..games)
        .into_par_iter()
        .try_fold(TournamentStats::new, |mut local, i| {
            let result = play(base_seed.wrapping_add(i))?;
            on_game(&result);
            local.add_result(&result);
            Ok(local)
        })
        .try_reduce(TournamentStats::new, |mut a, b| {
            a.merge(&b);
            Ok(a)
        })
}
