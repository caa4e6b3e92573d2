//! One-ply move search.
//!
//! Every legal move is played on its own headless copy of the game and the
//! resulting position is scored for the mover. The best move is drawn at
//! random from the moves sharing the top score.

use rand::Rng;
use rand::seq::IndexedRandom;
use rayon::prelude::*;
use serde::Serialize;

use crate::game::{Color, Game, GameObserver, Location};

use super::heuristic::board_value;

/// A candidate move and the value of the position it leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoredMove {
    /// Where the piece is placed.
    pub location: Location,
    /// Heuristic value for the mover after the cascade settles.
    pub value: i32,
}

/// Greedy one-ply evaluator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Evaluator {
    /// Score candidates on the rayon thread pool.
    pub parallel: bool,
}

impl Evaluator {
    /// Create a sequential evaluator.
    #[must_use]
    pub const fn new() -> Self {
        Self { parallel: false }
    }

    /// Create an evaluator that scores candidates in parallel.
    #[must_use]
    pub const fn parallel() -> Self {
        Self { parallel: true }
    }

    /// Score every legal move for the side to move, in
    /// [`Game::get_possible_moves`] order.
    ///
    /// Returns an empty list once the game is over.
    #[must_use]
    pub fn score_moves<O: GameObserver>(&self, game: &Game<O>) -> Vec<ScoredMove> {
        if game.is_over() {
            return Vec::new();
        }

        let base = game.headless();
        let mover = base.turn();
        let candidates = base.get_possible_moves();

        if self.parallel {
            candidates
                .par_iter()
                .map(|&location| score_candidate(&base, mover, location))
                .collect()
        } else {
            candidates
                .iter()
                .map(|&location| score_candidate(&base, mover, location))
                .collect()
        }
    }

    /// Pick a move with the highest score, breaking ties uniformly at
    /// random.
    ///
    /// Returns `None` when the game is over or no move is legal.
    pub fn best_move<O, R>(&self, game: &Game<O>, rng: &mut R) -> Option<Location>
    where
        O: GameObserver,
        R: Rng + ?Sized,
    {
        let scored = self.score_moves(game);
        let best = scored.iter().map(|scored| scored.value).max()?;
        let tied: Vec<Location> = scored
            .iter()
            .filter(|scored| scored.value == best)
            .map(|scored| scored.location)
            .collect();
        tied.choose(rng).copied()
    }
}

fn score_candidate(base: &Game, mover: Color, location: Location) -> ScoredMove {
    let mut trial = base.clone();
    if !trial.do_move(location) {
        unreachable!("candidate {location} rejected by the engine");
    }
    ScoredMove {
        location,
        value: board_value(trial.board(), mover),
    }
}

/// Pick a legal move uniformly at random.
///
/// Returns `None` when the game is over or no move is legal.
pub fn random_move<O, R>(game: &Game<O>, rng: &mut R) -> Option<Location>
where
    O: GameObserver,
    R: Rng + ?Sized,
{
    if game.is_over() {
        return None;
    }
    game.get_possible_moves().choose(rng).copied()
}

impl<O: GameObserver> Game<O> {
    /// Best move for the side to move, using the default [`Evaluator`] and
    /// the thread-local RNG for tie-breaks.
    ///
    /// Returns `None` when the game is over or no move is legal.
    #[must_use]
    pub fn get_best_move(&self) -> Option<Location> {
        Evaluator::default().best_move(self, &mut rand::rng())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::game::EventLog;

    fn game_after(dimension: u16, moves: &[(u16, u16)]) -> Game {
        let mut game = Game::new(dimension).unwrap();
        for &(row, column) in moves {
            assert!(game.do_move(Location::new(row, column)));
        }
        game
    }

    #[test]
    fn test_first_move_scores() {
        let game = Game::new(3).unwrap();
        let scored = Evaluator::new().score_moves(&game);
        assert_eq!(scored.len(), 9);

        for entry in &scored {
            let Location { row, column } = entry.location;
            let expected = match (row == 1, column == 1) {
                (true, true) => 1,
                (true, false) | (false, true) => 3,
                (false, false) => 6,
            };
            assert_eq!(entry.value, expected, "at {}", entry.location);
        }
    }

    #[test]
    fn test_first_move_prefers_corner() {
        let game = Game::new(3).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let corners = [
            Location::new(0, 0),
            Location::new(0, 2),
            Location::new(2, 0),
            Location::new(2, 2),
        ];
        for _ in 0..20 {
            let best = Evaluator::new().best_move(&game, &mut rng).unwrap();
            assert!(corners.contains(&best), "picked {best}");
        }
    }

    #[test]
    fn test_tie_break_covers_both_tied_moves() {
        let game = game_after(3, &[(1, 1), (0, 0), (1, 1), (2, 2)]);
        let scored = Evaluator::new().score_moves(&game);
        let best = scored.iter().map(|s| s.value).max().unwrap();
        let mut tied: Vec<Location> = scored
            .iter()
            .filter(|s| s.value == best)
            .map(|s| s.location)
            .collect();
        tied.sort();
        assert_eq!(tied, vec![Location::new(0, 2), Location::new(2, 0)]);

        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = HashSet::new();
        for _ in 0..100 {
            let choice = Evaluator::new().best_move(&game, &mut rng).unwrap();
            assert!(tied.contains(&choice));
            seen.insert(choice);
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let game = game_after(5, &[(0, 0), (4, 4), (2, 2), (1, 3), (0, 0)]);
        let sequential = Evaluator::new().score_moves(&game);
        let parallel = Evaluator::parallel().score_moves(&game);
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_scoring_leaves_game_untouched() {
        let mut game = Game::with_observer(3, EventLog::new()).unwrap();
        assert!(game.do_move(Location::new(0, 0)));
        let before_events = game.observer().events().len();
        let before_board = game.board().clone();

        let _ = Evaluator::new().score_moves(&game);
        let _ = game.get_best_move();

        assert_eq!(game.observer().events().len(), before_events);
        assert_eq!(game.board().piece_count(), before_board.piece_count());
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.turn(), Color::Blue);
    }

    #[test]
    fn test_no_moves_after_win() {
        let game = game_after(3, &[(0, 0), (0, 1), (2, 2), (0, 1), (0, 0)]);
        assert_eq!(game.get_winner(), Some(Color::Red));
        assert!(Evaluator::new().score_moves(&game).is_empty());
        assert_eq!(game.get_best_move(), None);

        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random_move(&game, &mut rng), None);
    }

    #[test]
    fn test_random_move_is_legal() {
        let game = game_after(4, &[(0, 0), (3, 3)]);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let location = random_move(&game, &mut rng).unwrap();
            assert!(game.check_move(location));
        }
    }
}
