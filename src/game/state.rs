//! Game state management: turns, move validation and overflow cascades.

use std::collections::VecDeque;

use serde::Serialize;
use tracing::{debug, trace};

use crate::error::BoardResult;
use crate::game::{Board, Color, GameObserver, Location, Move, NullObserver, PieceId};

/// Minimum number of moves before a winner can be declared.
pub const MIN_MOVES_FOR_WINNER: usize = 3;

/// A piece queued to leave an overflowing cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PendingJump {
    /// The jumping piece.
    pub piece: PieceId,
    /// Cell the piece is leaving.
    pub from: Location,
    /// Neighbor it will land in.
    pub to: Location,
}

/// Complete game state plus the observer receiving its notifications.
///
/// Cascades run to completion inside [`Game::do_move`]; there is no
/// externally visible intermediate state.
#[derive(Debug, Clone)]
pub struct Game<O: GameObserver = NullObserver> {
    board: Board,
    /// Pieces waiting to jump, in the order they were dispatched.
    pending: VecDeque<PendingJump>,
    turn: Color,
    history: Vec<Move>,
    observer: O,
}

impl Game<NullObserver> {
    /// Create a headless game.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimension is out of range.
    pub fn new(dimension: u16) -> BoardResult<Self> {
        Self::with_observer(dimension, NullObserver)
    }
}

impl<O: GameObserver> Game<O> {
    /// Create a game that reports to `observer`.
    ///
    /// The observer immediately receives `turn_changed(Red)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimension is out of range.
    pub fn with_observer(dimension: u16, mut observer: O) -> BoardResult<Self> {
        let board = Board::new(dimension)?;
        observer.turn_changed(Color::Red);
        Ok(Self {
            board,
            pending: VecDeque::new(),
            turn: Color::Red,
            history: Vec::new(),
            observer,
        })
    }

    /// Get the board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get the board dimension.
    #[must_use]
    pub fn dimension(&self) -> u16 {
        self.board.dimension()
    }

    /// The color to move.
    #[must_use]
    pub const fn turn(&self) -> Color {
        self.turn
    }

    /// All accepted moves, oldest first.
    #[must_use]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Jumps still queued. Only non-empty after a cascade was cut short by
    /// a win.
    pub fn pending_jumps(&self) -> impl Iterator<Item = &PendingJump> {
        self.pending.iter()
    }

    /// Get the observer.
    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Get the observer mutably.
    #[must_use]
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Consume the game and return its observer.
    #[must_use]
    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Copy the game state into a game without an observer.
    #[must_use]
    pub fn headless(&self) -> Game<NullObserver> {
        Game {
            board: self.board.clone(),
            pending: self.pending.clone(),
            turn: self.turn,
            history: self.history.clone(),
            observer: NullObserver,
        }
    }

    /// Check whether the game has a winner.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.get_winner().is_some()
    }

    /// Locations the current color may play: empty cells followed by the
    /// cells it already owns, each in row-major order.
    #[must_use]
    pub fn get_possible_moves(&self) -> Vec<Location> {
        self.board
            .cells_empty()
            .chain(self.board.cells_owned_by(self.turn))
            .map(|cell| cell.location())
            .collect()
    }

    /// Check whether the current color may place at `location`.
    #[must_use]
    pub fn check_move(&self, location: Location) -> bool {
        if self.get_winner().is_some() {
            return false;
        }

        match self.board.cell(location) {
            Some(cell) => cell.color().is_none_or(|color| color == self.turn),
            None => false,
        }
    }

    /// Place a piece for the current color and resolve the cascade.
    ///
    /// Returns `false` without touching any state if the move is illegal.
    pub fn do_move(&mut self, location: Location) -> bool {
        if !self.check_move(location) {
            trace!(%location, turn = %self.turn, "rejected illegal move");
            return false;
        }

        let color = self.turn;
        let Some(piece) = self.board.place_piece(color, location) else {
            return false;
        };
        self.observer.piece_added(piece.id(), color, location);

        self.evaluate_cell(location);
        self.history.push(Move::new(color, location));
        debug!(
            move_number = self.history.len(),
            %color,
            %location,
            "move accepted"
        );

        self.transition();

        if let Some(winner) = self.get_winner() {
            debug!(%winner, moves = self.history.len(), abandoned = self.pending.len(), "game over");
            self.observer.winner_announced(winner);
        } else {
            self.turn = self.turn.opponent();
            self.observer.turn_changed(self.turn);
        }

        crate::game::assert_invariants(self);
        true
    }

    /// Dispatch the pieces of a full cell to its neighbors.
    ///
    /// A cell already part-way through dispatching is left alone until
    /// enough settled pieces accumulate again.
    fn evaluate_cell(&mut self, location: Location) {
        let Some(cell) = self.board.cell_mut(location) else {
            return;
        };

        if cell.settled_count() != cell.capacity() {
            return;
        }

        let mut neighbors = [Location::new(0, 0); 4];
        let capacity = cell.capacity();
        neighbors[..capacity].copy_from_slice(cell.neighbors());

        trace!(%location, capacity, "cell overflows");
        for (piece, &to) in cell.pieces_mut().iter_mut().zip(&neighbors[..capacity]) {
            piece.destination = Some(to);
            self.pending.push_back(PendingJump {
                piece: piece.id(),
                from: location,
                to,
            });
        }
    }

    /// Resolve queued jumps with a skip-and-retry scan.
    ///
    /// A jump into a full cell is skipped; after every successful jump the
    /// scan restarts from the front of the queue. The scan stops as soon as
    /// a winner exists, leaving any remaining jumps queued.
    fn transition(&mut self) {
        let mut cursor = 0;

        while !self.pending.is_empty() && self.get_winner().is_none() {
            let Some(&jump) = self.pending.get(cursor) else {
                unreachable!(
                    "every queued jump is blocked: {:?}",
                    self.pending.iter().collect::<Vec<_>>()
                );
            };

            let has_room = self
                .board
                .cell(jump.to)
                .is_some_and(|cell| cell.len() < cell.capacity());

            if has_room {
                self.pending.remove(cursor);
                self.make_jump(jump);
                cursor = 0;
            } else {
                cursor += 1;
            }
        }
    }

    /// Move one piece to its destination and report any capture.
    fn make_jump(&mut self, jump: PendingJump) {
        let Some(mut piece) = self
            .board
            .cell_mut(jump.from)
            .and_then(|cell| cell.remove_piece(jump.piece))
        else {
            unreachable!("queued piece {} missing from {}", jump.piece, jump.from);
        };
        piece.destination = None;

        let Some(destination) = self.board.cell_mut(jump.to) else {
            unreachable!("jump destination {} is off the board", jump.to);
        };
        let previous_color = destination.color();
        destination.add_piece(piece);
        trace!(piece = piece.id(), from = %jump.from, to = %jump.to, "piece jumped");
        self.observer.piece_moved(jump.from, jump.to);

        if previous_color != Some(piece.color) {
            for resident in destination.pieces() {
                if resident.id() != piece.id() {
                    self.observer.piece_recolored(resident.id(), piece.color);
                }
            }
        }

        self.evaluate_cell(jump.to);
    }

    /// The winning color, if any.
    ///
    /// No winner is possible before the third move. After that a color
    /// wins once its opponent owns no cells.
    #[must_use]
    pub fn get_winner(&self) -> Option<Color> {
        if self.history.len() < MIN_MOVES_FOR_WINNER {
            return None;
        }

        if self.board.count_cells(Color::Red) == 0 {
            return Some(Color::Blue);
        }
        if self.board.count_cells(Color::Blue) == 0 {
            return Some(Color::Red);
        }
        None
    }

    /// Start over on a fresh board of the same dimension.
    ///
    /// The observer receives `turn_changed(Red)`.
    pub fn reset(&mut self) {
        self.board = match Board::new(self.board.dimension()) {
            Ok(board) => board,
            Err(e) => unreachable!("existing dimension rejected: {e}"),
        };
        self.pending = VecDeque::new();
        self.turn = Color::Red;
        self.history = Vec::new();
        self.observer.turn_changed(self.turn);
    }

    #[cfg(test)]
    pub(crate) fn replace_board_for_test(&mut self, board: Board) {
        self.board = board;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{EventLog, GameEvent};

    fn play(game: &mut Game<impl GameObserver>, moves: &[(u16, u16)]) {
        for &(row, column) in moves {
            assert!(
                game.do_move(Location::new(row, column)),
                "move ({row}, {column}) rejected"
            );
        }
    }

    #[test]
    fn test_game_creation() {
        let game = Game::new(3).unwrap();
        assert_eq!(game.turn(), Color::Red);
        assert!(game.history().is_empty());
        assert_eq!(game.get_possible_moves().len(), 9);
        assert_eq!(game.get_winner(), None);
    }

    #[test]
    fn test_creation_announces_first_turn() {
        let game = Game::with_observer(3, EventLog::new()).unwrap();
        assert_eq!(
            game.observer().events(),
            &[GameEvent::TurnChanged { color: Color::Red }]
        );
    }

    #[test]
    fn test_cannot_play_into_opponent_cell() {
        let mut game = Game::new(3).unwrap();
        play(&mut game, &[(1, 1)]);
        assert!(!game.check_move(Location::new(1, 1)));
        assert!(!game.do_move(Location::new(1, 1)));
        assert_eq!(game.turn(), Color::Blue);
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_illegal_move_emits_nothing() {
        let mut game = Game::with_observer(3, EventLog::new()).unwrap();
        game.observer_mut().clear();
        assert!(!game.do_move(Location::new(3, 0)));
        assert!(game.observer().events().is_empty());
        assert_eq!(game.board().next_piece_id(), 0);
    }

    #[test]
    fn test_possible_moves_lists_empty_then_owned() {
        let mut game = Game::new(3).unwrap();
        play(&mut game, &[(2, 2), (0, 0)]);
        let moves = game.get_possible_moves();
        assert_eq!(moves.len(), 8);
        assert_eq!(moves.last(), Some(&Location::new(2, 2)));
        assert!(!moves.contains(&Location::new(0, 0)));
    }

    #[test]
    fn test_turn_alternates() {
        let mut game = Game::with_observer(3, EventLog::new()).unwrap();
        play(&mut game, &[(0, 0), (2, 2)]);
        assert_eq!(game.turn(), Color::Red);
        let turns: Vec<_> = game
            .observer()
            .events()
            .iter()
            .filter_map(|event| match event {
                GameEvent::TurnChanged { color } => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(turns, vec![Color::Red, Color::Blue, Color::Red]);
    }

    #[test]
    fn test_corner_overflow_follows_neighbor_order() {
        let mut game = Game::with_observer(3, EventLog::new()).unwrap();
        play(&mut game, &[(0, 0), (1, 1)]);
        game.observer_mut().clear();
        play(&mut game, &[(0, 0)]);

        assert_eq!(
            game.observer().events(),
            &[
                GameEvent::PieceAdded {
                    piece: 2,
                    color: Color::Red,
                    location: Location::new(0, 0),
                },
                GameEvent::PieceMoved {
                    from: Location::new(0, 0),
                    to: Location::new(1, 0),
                },
                GameEvent::PieceMoved {
                    from: Location::new(0, 0),
                    to: Location::new(0, 1),
                },
                GameEvent::TurnChanged { color: Color::Blue },
            ]
        );

        let board = game.board();
        assert!(board.cell(Location::new(0, 0)).unwrap().is_empty());
        assert_eq!(board.cell(Location::new(1, 0)).unwrap().pieces()[0].id(), 0);
        assert_eq!(board.cell(Location::new(0, 1)).unwrap().pieces()[0].id(), 2);
        assert_eq!(game.pending_jumps().count(), 0);
    }

    #[test]
    fn test_chain_overflow_conserves_pieces() {
        // (0,0) overflows into the critical edge (0,1), which overflows in turn.
        let mut game = Game::new(3).unwrap();
        play(&mut game, &[(0, 1), (2, 2), (0, 1), (2, 0), (0, 0), (2, 2), (0, 0)]);
        assert_eq!(game.board().piece_count(), 7);
        assert_eq!(game.pending_jumps().count(), 0);
        assert!(game.board().cell(Location::new(0, 1)).unwrap().is_empty());
        assert!(crate::game::check_invariants(&game).is_empty());
    }

    #[test]
    fn test_blocked_jump_is_retried_after_room_appears() {
        let mut game = Game::with_observer(3, EventLog::new()).unwrap();
        game.observer_mut().clear();

        let center = Location::new(1, 1);
        let edge = Location::new(0, 1);
        game.board.place_piece(Color::Red, center);
        for _ in 0..3 {
            game.board.place_piece(Color::Red, edge);
        }

        // The center piece targets the full edge cell, queued ahead of the
        // edge cell's own dispatch.
        game.board.cell_mut(center).unwrap().pieces_mut()[0].destination = Some(edge);
        game.pending.push_back(PendingJump { piece: 0, from: center, to: edge });
        let targets = [center, Location::new(0, 0), Location::new(0, 2)];
        for (i, to) in targets.into_iter().enumerate() {
            game.board.cell_mut(edge).unwrap().pieces_mut()[i].destination = Some(to);
            #[allow(clippy::cast_possible_truncation)]
            let piece = (i + 1) as PieceId;
            game.pending.push_back(PendingJump { piece, from: edge, to });
        }

        game.transition();

        assert_eq!(
            game.observer().events(),
            &[
                GameEvent::PieceMoved { from: edge, to: center },
                GameEvent::PieceMoved { from: center, to: edge },
                GameEvent::PieceMoved { from: edge, to: Location::new(0, 0) },
                GameEvent::PieceMoved { from: edge, to: Location::new(0, 2) },
            ]
        );
        assert_eq!(game.pending_jumps().count(), 0);
        assert_eq!(game.board().piece_count(), 4);
        assert_eq!(game.board().cell(edge).unwrap().pieces()[0].id(), 0);
        assert_eq!(game.board().cell(center).unwrap().pieces()[0].id(), 1);
    }

    #[test]
    fn test_winner_requires_three_moves() {
        let mut game = Game::new(3).unwrap();
        play(&mut game, &[(0, 0)]);
        // Blue owns nothing yet, but it is too early for a winner.
        assert_eq!(game.get_winner(), None);
        play(&mut game, &[(2, 2)]);
        assert_eq!(game.get_winner(), None);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut game = Game::with_observer(3, EventLog::new()).unwrap();
        play(&mut game, &[(0, 0), (2, 2), (0, 0)]);
        game.observer_mut().clear();

        game.reset();

        assert_eq!(game.turn(), Color::Red);
        assert!(game.history().is_empty());
        assert_eq!(game.board().piece_count(), 0);
        assert_eq!(game.board().next_piece_id(), 0);
        assert_eq!(
            game.observer().events(),
            &[GameEvent::TurnChanged { color: Color::Red }]
        );
    }

    #[test]
    fn test_headless_copy_is_independent() {
        let mut game = Game::with_observer(3, EventLog::new()).unwrap();
        play(&mut game, &[(0, 0), (2, 2)]);
        let events_before = game.observer().events().len();

        let mut copy = game.headless();
        assert!(copy.do_move(Location::new(0, 0)));

        assert_eq!(game.history().len(), 2);
        assert_eq!(game.board().cell(Location::new(0, 0)).unwrap().len(), 1);
        assert_eq!(game.observer().events().len(), events_before);
        assert_eq!(copy.history().len(), 3);
    }
}
