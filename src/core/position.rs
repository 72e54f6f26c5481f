//! Board coordinates and tile identity.
//!
//! The grid is a fixed 8×8; positions are validated at construction so the
//! rest of the engine can index the board without re-checking bounds.
//! Out-of-range coordinates are unrepresentable rather than defensively
//! re-validated at every call site.
//!
//! ## Usage
//!
//! ```
//! use pulse_grid::core::{Position, GRID_SIZE};
//!
//! let p = Position::new(3, 4).unwrap();
//! assert_eq!(p.to_string(), "3,4");
//! assert!(Position::new(GRID_SIZE as u8, 0).is_none());
//! ```

use serde::{Deserialize, Serialize};

/// Side length of the board. Fixed, not runtime-configurable.
pub const GRID_SIZE: usize = 8;

/// A validated board coordinate: `0 <= x, y < GRID_SIZE`.
///
/// Displays as `"x,y"`, the form recorded in the chain history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    x: u8,
    y: u8,
}

impl Position {
    /// Create a position, returning `None` if either coordinate is out of range.
    #[must_use]
    pub fn new(x: u8, y: u8) -> Option<Self> {
        if (x as usize) < GRID_SIZE && (y as usize) < GRID_SIZE {
            Some(Self { x, y })
        } else {
            None
        }
    }

    /// Column, `0..GRID_SIZE`.
    #[must_use]
    pub const fn x(self) -> u8 {
        self.x
    }

    /// Row, `0..GRID_SIZE`.
    #[must_use]
    pub const fn y(self) -> u8 {
        self.y
    }

    /// Stable tile id for this cell.
    #[must_use]
    pub const fn id(self) -> TileId {
        TileId(self.y * GRID_SIZE as u8 + self.x)
    }

    /// Row-major index into the board's tile vector.
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        self.y as usize * GRID_SIZE + self.x as usize
    }

    /// Iterate every position on the board in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..GRID_SIZE as u8).flat_map(|y| (0..GRID_SIZE as u8).map(move |x| Position { x, y }))
    }

    /// Chebyshev distance to another position.
    #[must_use]
    pub fn distance(self, other: Position) -> u8 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        dx.max(dy)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Stable identifier for a tile, derived from its position (`y * 8 + x`).
///
/// A tile's id never changes across the life of a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileId(pub u8);

impl TileId {
    /// Recover the position this id was derived from.
    #[must_use]
    pub fn position(self) -> Position {
        Position {
            x: self.0 % GRID_SIZE as u8,
            y: self.0 / GRID_SIZE as u8,
        }
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}
