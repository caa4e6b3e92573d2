//! Game invariants - sanity checks that detect bugs.
//!
//! These should NEVER trigger in a correctly implemented game. If they do,
//! the cascade logic is broken; there is no recovery path.

use std::collections::HashSet;

use crate::game::{Game, GameObserver};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

fn violation(message: String) -> InvariantViolation {
    InvariantViolation { message }
}

/// Expected capacity for a cell, from its position alone.
fn positional_capacity(row: u16, column: u16, dimension: u16) -> usize {
    let last = dimension - 1;
    let on_row_edge = row == 0 || row == last;
    let on_column_edge = column == 0 || column == last;
    match (on_row_edge, on_column_edge) {
        (true, true) => 2,
        (true, false) | (false, true) => 3,
        (false, false) => 4,
    }
}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants<O: GameObserver>(game: &Game<O>) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let board = game.board();
    let dimension = board.dimension();
    let mut seen_ids = HashSet::new();

    for cell in board.cells() {
        let location = cell.location();

        let expected = positional_capacity(location.row, location.column, dimension);
        if cell.capacity() != expected {
            violations.push(violation(format!(
                "Cell at {location} has capacity {} but its position implies {expected}",
                cell.capacity()
            )));
        }

        if cell.len() > cell.capacity() {
            violations.push(violation(format!(
                "Cell at {location} holds {} pieces > capacity {}",
                cell.len(),
                cell.capacity()
            )));
        }

        if let Some(color) = cell.color() {
            if cell.pieces().iter().any(|piece| piece.color != color) {
                violations.push(violation(format!("Cell at {location} holds mixed colors")));
            }
        }

        for piece in cell.pieces() {
            if piece.location != location {
                violations.push(violation(format!(
                    "Piece {} is in cell {location} but records location {}",
                    piece.id(),
                    piece.location
                )));
            }
            if !seen_ids.insert(piece.id()) {
                violations.push(violation(format!("Piece {} appears twice", piece.id())));
            }
            if piece.id() >= board.next_piece_id() {
                violations.push(violation(format!(
                    "Piece {} was never issued (next id {})",
                    piece.id(),
                    board.next_piece_id()
                )));
            }
        }
    }

    if board.piece_count() != game.history().len() {
        violations.push(violation(format!(
            "Board holds {} pieces after {} moves",
            board.piece_count(),
            game.history().len()
        )));
    }

    for jump in game.pending_jumps() {
        let queued = board
            .cell(jump.from)
            .and_then(|cell| cell.pieces().iter().find(|piece| piece.id() == jump.piece));
        match queued {
            Some(piece) if piece.destination == Some(jump.to) => {}
            Some(_) => violations.push(violation(format!(
                "Queued piece {} does not point at {}",
                jump.piece, jump.to
            ))),
            None => violations.push(violation(format!(
                "Queued piece {} is not in {}",
                jump.piece, jump.from
            ))),
        }
    }

    if game.get_winner().is_none() && game.pending_jumps().next().is_some() {
        violations.push(violation(
            "Jumps left queued although nobody has won".to_string(),
        ));
    }

    violations
}

/// Assert all game invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants<O: GameObserver>(game: &Game<O>) {
    let violations = check_invariants(game);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants<O: GameObserver>(_game: &Game<O>) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Color, Location};

    #[test]
    fn test_fresh_game_passes() {
        let game = Game::new(5).unwrap();
        assert!(check_invariants(&game).is_empty());
    }

    #[test]
    fn test_played_game_passes() {
        let mut game = Game::new(3).unwrap();
        for (row, column) in [(0, 0), (2, 2), (0, 0), (2, 2), (1, 1)] {
            assert!(game.do_move(Location::new(row, column)));
        }
        let violations = check_invariants(&game);
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn test_positional_capacity() {
        assert_eq!(positional_capacity(0, 0, 4), 2);
        assert_eq!(positional_capacity(3, 3, 4), 2);
        assert_eq!(positional_capacity(0, 2, 4), 3);
        assert_eq!(positional_capacity(2, 3, 4), 3);
        assert_eq!(positional_capacity(1, 2, 4), 4);
    }

    #[test]
    fn test_piece_without_move_detected() {
        let mut game = Game::new(3).unwrap();
        assert!(game.do_move(Location::new(0, 0)));
        // Sneak an extra piece onto the board behind the engine's back.
        let mut board = game.board().clone();
        board.place_piece(Color::Red, Location::new(0, 0));
        let mut tampered = game.clone();
        tampered.replace_board_for_test(board);

        let violations = check_invariants(&tampered);
        assert_eq!(violations.len(), 1, "{violations:?}");
        assert!(violations[0].message.contains("pieces after"));
    }

    #[test]
    fn test_overfull_cell_detected() {
        let mut game = Game::new(3).unwrap();
        let mut board = game.board().clone();
        for _ in 0..3 {
            board.place_piece(Color::Blue, Location::new(2, 2));
        }
        game.replace_board_for_test(board);

        let violations = check_invariants(&game);
        assert!(violations.iter().any(|v| v.message.contains("> capacity")));
    }

    #[test]
    fn test_mixed_colors_detected() {
        let mut game = Game::new(3).unwrap();
        let mut board = game.board().clone();
        board.place_piece(Color::Blue, Location::new(1, 1));
        board.place_piece(Color::Red, Location::new(1, 1));
        game.replace_board_for_test(board);

        let violations = check_invariants(&game);
        assert!(violations.iter().any(|v| v.message.contains("mixed colors")));
    }
}
