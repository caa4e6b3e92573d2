//! Locations, colors and moves.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A player color. Red always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// The first player.
    Red,
    /// The second player.
    Blue,
}

impl Color {
    /// Get the other color.
    #[must_use]
    #[inline]
    pub const fn opponent(self) -> Color {
        match self {
            Color::Red => Color::Blue,
            Color::Blue => Color::Red,
        }
    }

    /// Lowercase name as used in move logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Error returned when parsing an unknown color name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError(String);

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown color {:?}", self.0)
    }
}

impl std::error::Error for ParseColorError {}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" => Ok(Color::Red),
            "blue" => Ok(Color::Blue),
            _ => Err(ParseColorError(s.to_string())),
        }
    }
}

/// A (row, column) position on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    /// Row, counted from the top.
    pub row: u16,
    /// Column, counted from the left.
    pub column: u16,
}

impl Location {
    /// Create a new location.
    #[must_use]
    pub const fn new(row: u16, column: u16) -> Self {
        Self { row, column }
    }

    /// Check whether this location lies on a board of the given dimension.
    #[must_use]
    pub const fn in_bounds(self, dimension: u16) -> bool {
        self.row < dimension && self.column < dimension
    }

    /// Get adjacent locations in the order up, down, left, right.
    ///
    /// Directions that fall off the board are skipped, so the array holds
    /// valid locations in indices `0..count`.
    #[must_use]
    #[inline]
    pub fn adjacent(self, dimension: u16) -> ([Location; 4], u8) {
        let mut result = [Location::new(0, 0); 4];
        let mut count = 0u8;

        if self.row > 0 {
            result[count as usize] = Location::new(self.row - 1, self.column); // up
            count += 1;
        }
        if self.row + 1 < dimension {
            result[count as usize] = Location::new(self.row + 1, self.column); // down
            count += 1;
        }
        if self.column > 0 {
            result[count as usize] = Location::new(self.row, self.column - 1); // left
            count += 1;
        }
        if self.column + 1 < dimension {
            result[count as usize] = Location::new(self.row, self.column + 1); // right
            count += 1;
        }

        (result, count)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// A placement made by one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// The color that moved.
    pub color: Color,
    /// Where the new piece was placed.
    pub location: Location,
}

impl Move {
    /// Create a new move.
    #[must_use]
    pub const fn new(color: Color, location: Location) -> Self {
        Self { color, location }
    }
}
