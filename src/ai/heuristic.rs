//! Heuristic evaluation of a board position.
//!
//! The score rewards, for the evaluated color:
//! - Pieces on the board
//! - Safe corners and edges (cells that overflow sooner)
//! - Cells one placement away from overflowing
//! - Chains of adjacent critical cells (see [`critical_chains`])
//!
//! and penalizes cells sitting next to an enemy cell that is about to
//! overflow into them.
//!
//! [`critical_chains`]: super::critical_chains

use crate::game::{Board, Cell, Color};

use super::chains::critical_chains;

/// Score of a position the evaluated color has won.
pub const WIN_VALUE: i32 = 100_000;

/// Score of a position the evaluated color has lost.
pub const LOSS_VALUE: i32 = -WIN_VALUE;

/// Bonus for an unthreatened corner cell.
const CORNER_BONUS: i32 = 3;

/// Bonus for an unthreatened edge cell.
const EDGE_BONUS: i32 = 2;

/// Bonus for an own cell one placement away from overflowing.
const CRITICAL_BONUS: i32 = 2;

/// Penalty base for each critical enemy neighbor; the actual penalty is
/// `THREAT_BASE - capacity`, so cells that overflow sooner lose less.
const THREAT_BASE: i32 = 5;

/// Bonus per cell of a chain with more than one critical cell.
const CHAIN_BONUS_PER_CELL: i32 = 2;

/// Evaluate the board from the perspective of `color`.
///
/// Returns [`WIN_VALUE`] when the opponent holds no pieces and `color`
/// holds more than one, and [`LOSS_VALUE`] for the mirrored case.
#[must_use]
pub fn board_value(board: &Board, color: Color) -> i32 {
    let opponent = color.opponent();
    let mut score = 0i32;
    let mut owned = 0i32;
    let mut opposing = 0i32;

    for cell in board.cells() {
        let pieces = as_score(cell.len());

        if cell.color() != Some(color) {
            opposing += pieces;
            continue;
        }

        owned += pieces;
        score += cell_value(board, cell, opponent);
    }

    score += owned;

    if opposing == 0 && owned > 1 {
        return WIN_VALUE;
    }
    if owned == 0 && opposing > 1 {
        return LOSS_VALUE;
    }

    for chain in critical_chains(board, color) {
        if chain.len() > 1 {
            score += CHAIN_BONUS_PER_CELL * as_score(chain.len());
        }
    }

    score
}

/// Positional value of one cell owned by the evaluated color.
fn cell_value(board: &Board, cell: &Cell, opponent: Color) -> i32 {
    let capacity = as_score(cell.capacity());
    let mut value = 0;
    let mut vulnerable = false;

    for &neighbor in cell.neighbors() {
        let threatened = board
            .cell(neighbor)
            .is_some_and(|other| other.color() == Some(opponent) && other.is_critical());
        if threatened {
            value -= THREAT_BASE - capacity;
            vulnerable = true;
        }
    }

    if !vulnerable {
        match capacity {
            2 => value += CORNER_BONUS,
            3 => value += EDGE_BONUS,
            _ => {}
        }
    }

    if cell.is_critical() {
        value += CRITICAL_BONUS;
    }

    value
}

// Boards are at most 64x64, so every count fits.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const fn as_score(count: usize) -> i32 {
    count as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Game, Location};

    fn game_after(dimension: u16, moves: &[(u16, u16)]) -> Game {
        let mut game = Game::new(dimension).unwrap();
        for &(row, column) in moves {
            assert!(game.do_move(Location::new(row, column)));
        }
        game
    }

    #[test]
    fn test_empty_board_scores_zero() {
        let board = Board::new(3).unwrap();
        assert_eq!(board_value(&board, Color::Red), 0);
        assert_eq!(board_value(&board, Color::Blue), 0);
    }

    #[test]
    fn test_single_piece_by_position() {
        // Corner: 1 piece + corner bonus + critical bonus.
        let game = game_after(3, &[(0, 0)]);
        assert_eq!(board_value(game.board(), Color::Red), 1 + 3 + 2);

        // Edge: 1 piece + edge bonus.
        let game = game_after(3, &[(0, 1)]);
        assert_eq!(board_value(game.board(), Color::Red), 1 + 2);

        // Interior: just the piece.
        let game = game_after(3, &[(1, 1)]);
        assert_eq!(board_value(game.board(), Color::Red), 1);
    }

    #[test]
    fn test_threatened_edge_loses_bonus() {
        // Blue corner (0,0) is critical and borders red's edge (0,1).
        let game = game_after(3, &[(0, 1), (0, 0)]);
        // Red: 1 piece, threat penalty 5 - 3 = 2, no edge bonus.
        assert_eq!(board_value(game.board(), Color::Red), 1 - 2);
        // Blue: 1 piece, corner cell stays unthreatened (red edge is not critical).
        assert_eq!(board_value(game.board(), Color::Blue), 1 + 3 + 2);
    }

    #[test]
    fn test_win_and_loss_sentinels() {
        let mut board = Board::new(3).unwrap();
        board.place_piece(Color::Red, Location::new(1, 1));
        board.place_piece(Color::Red, Location::new(1, 1));
        assert_eq!(board_value(&board, Color::Red), WIN_VALUE);
        assert_eq!(board_value(&board, Color::Blue), LOSS_VALUE);
    }

    #[test]
    fn test_single_piece_is_not_a_win() {
        let mut board = Board::new(3).unwrap();
        board.place_piece(Color::Red, Location::new(1, 1));
        assert_eq!(board_value(&board, Color::Red), 1);
        assert_eq!(board_value(&board, Color::Blue), 0);
    }

    #[test]
    fn test_chain_bonus_for_adjacent_critical_cells() {
        let mut board = Board::new(4).unwrap();
        // Two adjacent critical edges on the top row: (0,1) and (0,2), 2 pieces each.
        for location in [Location::new(0, 1), Location::new(0, 2)] {
            board.place_piece(Color::Red, location);
            board.place_piece(Color::Red, location);
        }
        board.place_piece(Color::Blue, Location::new(3, 3));
        board.place_piece(Color::Blue, Location::new(3, 3));

        // Per edge: edge bonus 2 + critical bonus 2. Pieces 4. Chain of 2: +4.
        assert_eq!(board_value(&board, Color::Red), 2 * (2 + 2) + 4 + 4);
    }
}
