//! Chain-reaction propagation.
//!
//! A triggered pulse clears itself and excites its neighborhood: adjacent
//! pulses accumulate +1 charge, adjacent links fire onward unconditionally.
//! Links are conduits — no energy check gates their propagation — which is
//! what makes link placement strategic: pulses store potential, links carry
//! the cascade.
//!
//! The cascade runs on an explicit LIFO work-list rather than recursion, so
//! a pathological fully-linked board cannot exhaust the stack. A tile is
//! cleared *before* it is queued for expansion; combined with re-reading
//! live tile state at each step, this reproduces the reference
//! read-then-mutate order (a tile cleared earlier in the same cascade is
//! seen as empty and skipped) and bounds the loop by the 64-tile board.

use serde::{Deserialize, Serialize};

use crate::core::board::Board;
use crate::core::position::Position;
use crate::core::tile::TileKind;

/// What a settled cascade did to the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainReport {
    /// Tiles cleared, the origin included.
    pub tiles_cleared: usize,
    /// Link tiles that forwarded the reaction.
    pub links_fired: usize,
    /// Pulse-energy increments applied.
    pub pulses_charged: usize,
}

/// Run a cascade from `origin`, which the caller has already verified to be
/// an armed pulse. Mutates the board in place and reports what happened.
pub fn cascade(board: &mut Board, origin: Position) -> ChainReport {
    let mut report = ChainReport::default();

    board.clear(origin);
    report.tiles_cleared += 1;

    let mut work: Vec<Position> = vec![origin];
    while let Some(position) = work.pop() {
        for neighbor in board.adjacent(position) {
            match board.tile(neighbor).kind {
                TileKind::Pulse => {
                    board.add_energy(neighbor, 1);
                    report.pulses_charged += 1;
                }
                TileKind::Link => {
                    // Clear before queueing: each link fires exactly once.
                    board.clear(neighbor);
                    report.tiles_cleared += 1;
                    report.links_fired += 1;
                    work.push(neighbor);
                }
                TileKind::Empty => {}
            }
        }
    }

    report
}
