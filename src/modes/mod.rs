//! Game modes and their objective types.
//!
//! - `modes` (this module): the mode/objective data model
//! - `controller`: per-mode initialization, post-chain evaluation, level-up

pub mod controller;

use serde::{Deserialize, Serialize};

/// The four game modes. Selected once at initialization; changed only by
/// re-initializing the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// No timer, no objectives; runs until manual reset.
    Endless,
    /// Fixed countdown; reaching zero ends the game.
    TimeAttack,
    /// One objective from a fixed pool; completing all objectives ends the
    /// game.
    Puzzle,
    /// Escalating targets; reaching a target levels up in place instead of
    /// ending the game. Reaching zero time still ends it.
    Challenge,
}

impl GameMode {
    /// Does this mode run a countdown timer?
    #[must_use]
    pub fn is_timed(self) -> bool {
        matches!(self, GameMode::TimeAttack | GameMode::Challenge)
    }
}

/// Which live metric an objective or challenge measures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetKind {
    /// Session score.
    Score,
    /// Total chains triggered.
    Chains,
    /// Link tiles currently on the board.
    Links,
}

/// A puzzle objective: a metric paired with a threshold.
///
/// Objectives are evaluated against live state; only the aggregate
/// completed-count is stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objective {
    pub kind: TargetKind,
    pub target: i64,
}

/// Escalating-challenge bookkeeping: the metric being chased and the current
/// target for this level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeState {
    pub kind: TargetKind,
    pub target: i64,
}

/// The fixed pool puzzle objectives are drawn from.
#[must_use]
pub fn objective_pool() -> [Objective; 3] {
    [
        Objective { kind: TargetKind::Score, target: 1000 },
        Objective { kind: TargetKind::Chains, target: 10 },
        Objective { kind: TargetKind::Links, target: 8 },
    ]
}
