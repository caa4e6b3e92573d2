//! Groups of adjacent critical cells.
//!
//! A chain overflows as a unit: once one member bursts, each neighbor
//! receives the piece it was missing and bursts in turn.

use std::collections::HashSet;

use crate::game::{Board, Color, Location};

/// Partition the critical cells owned by `color` into orthogonally
/// connected groups.
///
/// Chains are returned in row-major order of their first cell; cells
/// within a chain are in discovery order.
#[must_use]
pub fn critical_chains(board: &Board, color: Color) -> Vec<Vec<Location>> {
    let is_member = |location: Location| {
        board
            .cell(location)
            .is_some_and(|cell| cell.color() == Some(color) && cell.is_critical())
    };

    let mut visited = HashSet::new();
    let mut chains = Vec::new();

    for cell in board.cells() {
        let start = cell.location();
        if visited.contains(&start) || !is_member(start) {
            continue;
        }

        let mut chain = Vec::new();
        let mut stack = vec![start];
        visited.insert(start);

        while let Some(location) = stack.pop() {
            chain.push(location);
            let Some(current) = board.cell(location) else {
                continue;
            };
            for &neighbor in current.neighbors() {
                if is_member(neighbor) && visited.insert(neighbor) {
                    stack.push(neighbor);
                }
            }
        }

        chains.push(chain);
    }

    chains
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(board: &mut Board, color: Color, location: Location, count: usize) {
        for _ in 0..count {
            board.place_piece(color, location);
        }
    }

    #[test]
    fn test_no_chains_on_empty_board() {
        let board = Board::new(4).unwrap();
        assert!(critical_chains(&board, Color::Red).is_empty());
    }

    #[test]
    fn test_isolated_critical_cells_are_separate_chains() {
        let mut board = Board::new(4).unwrap();
        fill(&mut board, Color::Red, Location::new(0, 0), 1);
        fill(&mut board, Color::Red, Location::new(3, 3), 1);

        let chains = critical_chains(&board, Color::Red);
        assert_eq!(
            chains,
            vec![vec![Location::new(0, 0)], vec![Location::new(3, 3)]]
        );
    }

    #[test]
    fn test_adjacent_critical_cells_join() {
        let mut board = Board::new(4).unwrap();
        fill(&mut board, Color::Red, Location::new(0, 0), 1);
        fill(&mut board, Color::Red, Location::new(0, 1), 2);
        fill(&mut board, Color::Red, Location::new(1, 1), 3);

        let chains = critical_chains(&board, Color::Red);
        assert_eq!(chains.len(), 1);
        let mut cells = chains[0].clone();
        cells.sort();
        assert_eq!(
            cells,
            vec![Location::new(0, 0), Location::new(0, 1), Location::new(1, 1)]
        );
    }

    #[test]
    fn test_chain_ignores_other_color_and_non_critical() {
        let mut board = Board::new(4).unwrap();
        fill(&mut board, Color::Red, Location::new(0, 0), 1);
        // Blue critical edge next to the red corner.
        fill(&mut board, Color::Blue, Location::new(0, 1), 2);
        // Red edge that is not critical.
        fill(&mut board, Color::Red, Location::new(1, 0), 1);

        let red = critical_chains(&board, Color::Red);
        assert_eq!(red, vec![vec![Location::new(0, 0)]]);

        let blue = critical_chains(&board, Color::Blue);
        assert_eq!(blue, vec![vec![Location::new(0, 1)]]);
    }
}
