//! Error types for board construction.

use std::fmt;

/// Smallest supported board dimension.
///
/// A 1×1 board would hold a single cell with no neighbors and therefore
/// zero capacity.
pub const MIN_DIMENSION: u16 = 2;

/// Largest supported board dimension.
pub const MAX_DIMENSION: u16 = 64;

/// Errors raised while constructing a board or game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// Board dimension outside `MIN_DIMENSION..=MAX_DIMENSION`.
    InvalidDimension(u16),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidDimension(dimension) => write!(
                f,
                "invalid board dimension {dimension} (expected {MIN_DIMENSION}..={MAX_DIMENSION})"
            ),
        }
    }
}

impl std::error::Error for GameError {}

/// Result type for board and game construction.
pub type BoardResult<T> = Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_dimension_display() {
        let err = GameError::InvalidDimension(0);
        let text = err.to_string();
        assert!(text.contains("dimension 0"));
        assert!(text.contains("2..=64"));
    }
}
