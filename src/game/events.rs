//! Notifications emitted by the engine while a move resolves.
//!
//! Observers are called synchronously from inside [`Game::do_move`]. An
//! observer must not feed moves back into the game it is observing.
//!
//! [`Game::do_move`]: crate::game::Game::do_move

use serde::Serialize;

use crate::game::{Color, Location, PieceId};

/// Receiver for engine notifications.
///
/// Every method has an empty default so consumers only implement the
/// events they care about.
pub trait GameObserver {
    /// The side to move changed.
    fn turn_changed(&mut self, _color: Color) {}

    /// A new piece was placed.
    fn piece_added(&mut self, _piece: PieceId, _color: Color, _location: Location) {}

    /// A piece jumped from one cell to a neighbor.
    fn piece_moved(&mut self, _from: Location, _to: Location) {}

    /// A piece changed owner because its cell was captured.
    fn piece_recolored(&mut self, _piece: PieceId, _color: Color) {}

    /// The game ended.
    fn winner_announced(&mut self, _color: Color) {}
}

/// Observer that ignores every notification.
///
/// Used for headless simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullObserver;

impl GameObserver for NullObserver {}

/// A single recorded notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// See [`GameObserver::turn_changed`].
    TurnChanged {
        /// The side now to move.
        color: Color,
    },
    /// See [`GameObserver::piece_added`].
    PieceAdded {
        /// The new piece.
        piece: PieceId,
        /// Its color.
        color: Color,
        /// Where it was placed.
        location: Location,
    },
    /// See [`GameObserver::piece_moved`].
    PieceMoved {
        /// Source cell.
        from: Location,
        /// Destination cell.
        to: Location,
    },
    /// See [`GameObserver::piece_recolored`].
    PieceRecolored {
        /// The recolored piece.
        piece: PieceId,
        /// Its new color.
        color: Color,
    },
    /// See [`GameObserver::winner_announced`].
    WinnerAnnounced {
        /// The winning color.
        color: Color,
    },
}

/// Observer that records every notification in order.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Remove and return all recorded events.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Forget all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl GameObserver for EventLog {
    fn turn_changed(&mut self, color: Color) {
        self.events.push(GameEvent::TurnChanged { color });
    }

    fn piece_added(&mut self, piece: PieceId, color: Color, location: Location) {
        self.events.push(GameEvent::PieceAdded {
            piece,
            color,
            location,
        });
    }

    fn piece_moved(&mut self, from: Location, to: Location) {
        self.events.push(GameEvent::PieceMoved { from, to });
    }

    fn piece_recolored(&mut self, piece: PieceId, color: Color) {
        self.events.push(GameEvent::PieceRecolored { piece, color });
    }

    fn winner_announced(&mut self, color: Color) {
        self.events.push(GameEvent::WinnerAnnounced { color });
    }
}

impl<T: GameObserver + ?Sized> GameObserver for &mut T {
    fn turn_changed(&mut self, color: Color) {
        (**self).turn_changed(color);
    }

    fn piece_added(&mut self, piece: PieceId, color: Color, location: Location) {
        (**self).piece_added(piece, color, location);
    }

    fn piece_moved(&mut self, from: Location, to: Location) {
        (**self).piece_moved(from, to);
    }

    fn piece_recolored(&mut self, piece: PieceId, color: Color) {
        (**self).piece_recolored(piece, color);
    }

    fn winner_announced(&mut self, color: Color) {
        (**self).winner_announced(color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_log_records_in_order() {
        let mut log = EventLog::new();
        log.turn_changed(Color::Red);
        log.piece_added(0, Color::Red, Location::new(0, 0));
        log.piece_moved(Location::new(0, 0), Location::new(1, 0));

        assert_eq!(
            log.events(),
            &[
                GameEvent::TurnChanged { color: Color::Red },
                GameEvent::PieceAdded {
                    piece: 0,
                    color: Color::Red,
                    location: Location::new(0, 0),
                },
                GameEvent::PieceMoved {
                    from: Location::new(0, 0),
                    to: Location::new(1, 0),
                },
            ]
        );

        let drained = log.drain();
        assert_eq!(drained.len(), 3);
        assert!(log.events().is_empty());
    }

    #[test]
    fn test_event_serializes_with_tag() {
        let event = GameEvent::WinnerAnnounced { color: Color::Blue };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"event":"winner_announced","color":"blue"}"#);
    }

    #[test]
    fn test_observer_through_mut_reference() {
        fn announce<O: GameObserver>(mut observer: O) {
            observer.winner_announced(Color::Red);
        }

        let mut log = EventLog::new();
        announce(&mut log);
        assert_eq!(log.events(), &[GameEvent::WinnerAnnounced { color: Color::Red }]);
    }
}
