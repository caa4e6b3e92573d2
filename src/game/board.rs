//! Board, cell and piece types.

use serde::Serialize;

use crate::error::{BoardResult, GameError, MAX_DIMENSION, MIN_DIMENSION};
use crate::game::{Color, Location};

/// Unique identifier for a piece. Never reused within one game.
pub type PieceId = u32;

/// A single piece on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Piece {
    /// Identity, assigned at placement.
    id: PieceId,
    /// Current owner.
    pub color: Color,
    /// Cell the piece currently sits in.
    pub location: Location,
    /// Where the piece is about to jump, if it is part of an overflow.
    pub destination: Option<Location>,
}

impl Piece {
    /// Create a settled piece.
    #[must_use]
    pub const fn new(id: PieceId, color: Color, location: Location) -> Self {
        Self {
            id,
            color,
            location,
            destination: None,
        }
    }

    /// Get the piece id.
    #[must_use]
    pub const fn id(&self) -> PieceId {
        self.id
    }

    /// Check whether the piece is waiting to jump.
    #[must_use]
    pub const fn is_jumping(&self) -> bool {
        self.destination.is_some()
    }
}

/// One grid position.
///
/// The neighbor list is fixed at construction and defines the capacity.
#[derive(Debug, Clone, Serialize)]
pub struct Cell {
    location: Location,
    neighbors: [Location; 4],
    neighbor_count: u8,
    pieces: Vec<Piece>,
}

impl Cell {
    fn new(location: Location, dimension: u16) -> Self {
        let (neighbors, neighbor_count) = location.adjacent(dimension);
        Self {
            location,
            neighbors,
            neighbor_count,
            pieces: Vec::with_capacity(usize::from(neighbor_count)),
        }
    }

    /// Get the cell location.
    #[must_use]
    pub const fn location(&self) -> Location {
        self.location
    }

    /// Neighbor locations in the order up, down, left, right.
    #[must_use]
    pub fn neighbors(&self) -> &[Location] {
        &self.neighbors[..usize::from(self.neighbor_count)]
    }

    /// Number of pieces this cell holds before it overflows.
    #[must_use]
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.neighbor_count as usize
    }

    /// Pieces currently in the cell, in arrival order.
    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Number of pieces in the cell.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Check whether the cell holds no pieces.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Check whether the cell is at capacity.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// Check whether one more piece would overflow the cell.
    #[must_use]
    #[inline]
    pub fn is_critical(&self) -> bool {
        self.len() + 1 == self.capacity()
    }

    /// Color of the first piece, or `None` when empty.
    #[must_use]
    #[inline]
    pub fn color(&self) -> Option<Color> {
        self.pieces.first().map(|piece| piece.color)
    }

    /// Number of pieces without a pending destination.
    #[must_use]
    pub fn settled_count(&self) -> usize {
        self.pieces.iter().filter(|piece| !piece.is_jumping()).count()
    }

    /// Append a piece, recoloring the pieces already here to its color.
    pub(crate) fn add_piece(&mut self, mut piece: Piece) {
        for resident in &mut self.pieces {
            resident.color = piece.color;
        }
        piece.location = self.location;
        self.pieces.push(piece);
    }

    /// Remove a piece by id.
    pub(crate) fn remove_piece(&mut self, id: PieceId) -> Option<Piece> {
        let index = self.pieces.iter().position(|piece| piece.id == id)?;
        Some(self.pieces.remove(index))
    }

    pub(crate) fn pieces_mut(&mut self) -> &mut [Piece] {
        &mut self.pieces
    }
}

/// The N×N game board.
#[derive(Debug, Clone, Serialize)]
pub struct Board {
    dimension: u16,
    /// Cells stored in row-major order.
    cells: Vec<Cell>,
    next_piece_id: PieceId,
}

impl Board {
    /// Create an empty board.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidDimension`] if the dimension is outside
    /// `MIN_DIMENSION..=MAX_DIMENSION`.
    pub fn new(dimension: u16) -> BoardResult<Self> {
        if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&dimension) {
            return Err(GameError::InvalidDimension(dimension));
        }

        let cells = (0..dimension)
            .flat_map(|row| (0..dimension).map(move |column| Location::new(row, column)))
            .map(|location| Cell::new(location, dimension))
            .collect();

        Ok(Self {
            dimension,
            cells,
            next_piece_id: 0,
        })
    }

    /// Get the board dimension.
    #[must_use]
    pub const fn dimension(&self) -> u16 {
        self.dimension
    }

    /// Id the next placed piece will receive.
    #[must_use]
    pub const fn next_piece_id(&self) -> PieceId {
        self.next_piece_id
    }

    /// All cells in row-major order.
    #[must_use]
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn index(&self, location: Location) -> Option<usize> {
        if location.in_bounds(self.dimension) {
            Some(usize::from(location.row) * usize::from(self.dimension) + usize::from(location.column))
        } else {
            None
        }
    }

    /// Get the cell at a location.
    #[must_use]
    pub fn cell(&self, location: Location) -> Option<&Cell> {
        self.index(location).map(|idx| &self.cells[idx])
    }

    pub(crate) fn cell_mut(&mut self, location: Location) -> Option<&mut Cell> {
        self.index(location).map(|idx| &mut self.cells[idx])
    }

    /// Cells holding no pieces.
    pub fn cells_empty(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|cell| cell.is_empty())
    }

    /// Cells whose color is `color`.
    pub fn cells_owned_by(&self, color: Color) -> impl Iterator<Item = &Cell> {
        self.cells
            .iter()
            .filter(move |cell| cell.color() == Some(color))
    }

    /// Count cells owned by a color.
    #[must_use]
    pub fn count_cells(&self, color: Color) -> usize {
        self.cells_owned_by(color).count()
    }

    /// Total pieces on the board, including pieces waiting to jump.
    #[must_use]
    pub fn piece_count(&self) -> usize {
        self.cells.iter().map(Cell::len).sum()
    }

    /// Place a new piece without any legality checks.
    ///
    /// Returns `None` if the location is off the board.
    pub fn place_piece(&mut self, color: Color, location: Location) -> Option<Piece> {
        let id = self.next_piece_id;
        let cell = self.cell_mut(location)?;
        let piece = Piece::new(id, color, location);
        cell.pieces.push(piece);
        self.next_piece_id += 1;
        Some(piece)
    }
}
