//! The 8×8 board and its sole neighbor-discovery primitive.
//!
//! Exactly one `Tile` per cell, always. The board is rebuilt from scratch
//! on every initialization; no tile persists across sessions.
//!
//! All mutation goes through the typed mutators (`set_pulse`, `set_link`,
//! `clear`, `add_energy`) so the tile-kind/energy invariant cannot drift.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::position::{Position, GRID_SIZE};
use super::tile::{LinkKind, Tile, TileKind};

/// Fixed 8×8 grid of tiles, row-major.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    tiles: Vec<Tile>,
}

impl Board {
    /// Create a fresh board of empty tiles with ids pre-assigned.
    ///
    /// Deterministic: two fresh boards are always equal.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tiles: Position::all().map(Tile::empty).collect(),
        }
    }

    /// Get the tile at a position.
    #[must_use]
    pub fn tile(&self, position: Position) -> &Tile {
        &self.tiles[position.index()]
    }

    fn tile_mut(&mut self, position: Position) -> &mut Tile {
        &mut self.tiles[position.index()]
    }

    /// Iterate all tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    // === Neighbor discovery ===

    /// In-bounds tiles within Chebyshev distance 1 of `position`, excluding
    /// the center itself. Up to 8 positions; 3 at corners, 5 at edges.
    #[must_use]
    pub fn adjacent(&self, position: Position) -> SmallVec<[Position; 8]> {
        self.adjacent_within(position, 1)
    }

    /// In-bounds tiles within Chebyshev distance `range`, excluding the
    /// center. This is the only neighbor primitive: both link placement and
    /// reaction propagation go through it.
    #[must_use]
    pub fn adjacent_within(&self, position: Position, range: u8) -> SmallVec<[Position; 8]> {
        let mut out = SmallVec::new();
        let r = i16::from(range);
        let (cx, cy) = (i16::from(position.x()), i16::from(position.y()));
        for dy in -r..=r {
            for dx in -r..=r {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let (x, y) = (cx + dx, cy + dy);
                if (0..GRID_SIZE as i16).contains(&x) && (0..GRID_SIZE as i16).contains(&y) {
                    if let Some(p) = Position::new(x as u8, y as u8) {
                        out.push(p);
                    }
                }
            }
        }
        out
    }

    // === Mutators ===

    /// Turn a cell into a pulse tile with the given charge (>= 1).
    pub fn set_pulse(&mut self, position: Position, energy: i64) {
        let tile = self.tile_mut(position);
        tile.kind = TileKind::Pulse;
        tile.energy = energy.max(1);
        tile.link = None;
    }

    /// Turn a cell into a link tile with energy 1.
    pub fn set_link(&mut self, position: Position, kind: LinkKind) {
        let tile = self.tile_mut(position);
        tile.kind = TileKind::Link;
        tile.energy = 1;
        tile.link = Some(kind);
    }

    /// Clear a cell back to empty / energy 0.
    pub fn clear(&mut self, position: Position) {
        let tile = self.tile_mut(position);
        tile.kind = TileKind::Empty;
        tile.energy = 0;
        tile.link = None;
        tile.linked.clear();
    }

    /// Add charge to an active tile. No-op on empty cells.
    pub fn add_energy(&mut self, position: Position, delta: i64) {
        let tile = self.tile_mut(position);
        if tile.is_active() {
            tile.energy += delta;
        }
    }

    // === Census ===

    /// Number of pulse tiles on the board.
    #[must_use]
    pub fn pulse_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.kind == TileKind::Pulse).count()
    }

    /// Number of link tiles on the board.
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.kind == TileKind::Link).count()
    }

    /// Positions of all empty cells.
    #[must_use]
    pub fn empty_positions(&self) -> Vec<Position> {
        self.tiles
            .iter()
            .filter(|t| t.kind == TileKind::Empty)
            .map(|t| t.position)
            .collect()
    }

    /// Total energy across all pulse and link tiles.
    #[must_use]
    pub fn active_energy(&self) -> i64 {
        self.tiles.iter().filter(|t| t.is_active()).map(|t| t.energy).sum()
    }

    /// Does any tile adjacent to `position` hold a link?
    #[must_use]
    pub fn has_adjacent_link(&self, position: Position) -> bool {
        self.adjacent(position)
            .iter()
            .any(|&p| self.tile(p).kind == TileKind::Link)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: u8, y: u8) -> Position {
        Position::new(x, y).unwrap()
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.tiles().count(), 64);
        for tile in board.tiles() {
            assert_eq!(tile.kind, TileKind::Empty);
            assert_eq!(tile.energy, 0);
        }
        assert_eq!(board.pulse_count(), 0);
        assert_eq!(board.link_count(), 0);
        assert_eq!(board.empty_positions().len(), 64);
    }

    #[test]
    fn test_new_board_is_deterministic() {
        assert_eq!(Board::new(), Board::new());
    }

    #[test]
    fn test_tile_ids_match_positions() {
        let board = Board::new();
        for p in Position::all() {
            assert_eq!(board.tile(p).id, p.id());
            assert_eq!(board.tile(p).position, p);
        }
    }

    #[test]
    fn test_adjacent_corner() {
        let board = Board::new();
        let n = board.adjacent(at(0, 0));
        assert_eq!(n.len(), 3);
        assert!(n.contains(&at(1, 0)));
        assert!(n.contains(&at(0, 1)));
        assert!(n.contains(&at(1, 1)));
    }

    #[test]
    fn test_adjacent_edge() {
        let board = Board::new();
        assert_eq!(board.adjacent(at(3, 0)).len(), 5);
        assert_eq!(board.adjacent(at(0, 4)).len(), 5);
        assert_eq!(board.adjacent(at(7, 3)).len(), 5);
    }

    #[test]
    fn test_adjacent_interior() {
        let board = Board::new();
        let n = board.adjacent(at(4, 4));
        assert_eq!(n.len(), 8);
        assert!(!n.contains(&at(4, 4)));
    }

    #[test]
    fn test_adjacent_within_range_two() {
        let board = Board::new();
        let n = board.adjacent_within(at(4, 4), 2);
        assert_eq!(n.len(), 24);
        assert!(n.contains(&at(2, 2)));
        assert!(n.contains(&at(6, 6)));
        assert!(!n.contains(&at(4, 4)));
        assert!(!n.contains(&at(1, 4)));
    }

    #[test]
    fn test_set_pulse_and_clear() {
        let mut board = Board::new();
        board.set_pulse(at(2, 2), 3);
        assert_eq!(board.tile(at(2, 2)).kind, TileKind::Pulse);
        assert_eq!(board.tile(at(2, 2)).energy, 3);
        assert_eq!(board.pulse_count(), 1);

        board.clear(at(2, 2));
        assert_eq!(board.tile(at(2, 2)).kind, TileKind::Empty);
        assert_eq!(board.tile(at(2, 2)).energy, 0);
    }

    #[test]
    fn test_set_pulse_floors_energy_at_one() {
        let mut board = Board::new();
        board.set_pulse(at(1, 1), 0);
        assert_eq!(board.tile(at(1, 1)).energy, 1);
    }

    #[test]
    fn test_set_link() {
        let mut board = Board::new();
        board.set_link(at(5, 5), LinkKind::Normal);
        let tile = board.tile(at(5, 5));
        assert_eq!(tile.kind, TileKind::Link);
        assert_eq!(tile.energy, 1);
        assert_eq!(tile.link, Some(LinkKind::Normal));
        assert_eq!(board.link_count(), 1);
    }

    #[test]
    fn test_add_energy_ignores_empty() {
        let mut board = Board::new();
        board.add_energy(at(3, 3), 5);
        assert_eq!(board.tile(at(3, 3)).energy, 0);

        board.set_pulse(at(3, 3), 1);
        board.add_energy(at(3, 3), 5);
        assert_eq!(board.tile(at(3, 3)).energy, 6);
    }

    #[test]
    fn test_active_energy_sums_pulses_and_links() {
        let mut board = Board::new();
        board.set_pulse(at(0, 0), 2);
        board.set_pulse(at(1, 0), 3);
        board.set_link(at(2, 0), LinkKind::Normal);
        assert_eq!(board.active_energy(), 6);
    }

    #[test]
    fn test_has_adjacent_link() {
        let mut board = Board::new();
        assert!(!board.has_adjacent_link(at(3, 3)));
        board.set_link(at(4, 4), LinkKind::Normal);
        assert!(board.has_adjacent_link(at(3, 3)));
        assert!(!board.has_adjacent_link(at(6, 6)));
    }
}
