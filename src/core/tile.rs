//! Tile entity: the unit of board state.
//!
//! Invariant maintained by `Board`'s mutators: an `Empty` tile carries
//! energy 0; `Pulse` and `Link` tiles carry energy >= 1 while active.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::position::{Position, TileId};

/// What currently occupies a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    /// Nothing; energy is always 0.
    Empty,
    /// An energy source. Accumulates charge from nearby reactions and can be
    /// triggered by the player.
    Pulse,
    /// A conductive link. Forwards reactions to its own neighborhood.
    Link,
}

/// Classification of a link tile.
///
/// Only `Normal` is currently produced; `Strong` and `Chain` are reserved
/// classification values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkKind {
    Normal,
    Strong,
    Chain,
}

/// A single board cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Stable id, derived from the position at board creation.
    pub id: TileId,

    /// Where this tile sits. Never changes.
    pub position: Position,

    /// Current occupancy.
    pub kind: TileKind,

    /// Charge level. 0 iff `kind` is `Empty`.
    pub energy: i64,

    /// Link classification, present iff `kind` is `Link`.
    pub link: Option<LinkKind>,

    /// Ids of explicitly linked neighbors. Part of the entity shape but
    /// unused by current rules.
    pub linked: SmallVec<[TileId; 8]>,
}

impl Tile {
    /// Create an empty tile at `position`.
    #[must_use]
    pub fn empty(position: Position) -> Self {
        Self {
            id: position.id(),
            position,
            kind: TileKind::Empty,
            energy: 0,
            link: None,
            linked: SmallVec::new(),
        }
    }

    /// Is this tile a pulse with at least one unit of charge?
    #[must_use]
    pub fn is_armed_pulse(&self) -> bool {
        self.kind == TileKind::Pulse && self.energy >= 1
    }

    /// Does this tile participate in energy totals (pulse or link)?
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.kind, TileKind::Pulse | TileKind::Link)
    }
}
