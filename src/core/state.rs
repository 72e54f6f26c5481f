//! The authoritative game state.
//!
//! One `GameState` per session, mutated only through the engine's action
//! entry points and discarded wholesale on reset or mode change. The
//! rendering layer reads it as an immutable snapshot between transitions.
//!
//! Histories use `im` persistent vectors so snapshot clones are O(1).

use im::{HashSet as ImHashSet, Vector};
use serde::{Deserialize, Serialize};

use super::action::ActionRecord;
use super::board::Board;
use super::config::EngineConfig;
use crate::modes::{ChallengeState, GameMode, Objective};
use crate::progress::{default_achievements, default_upgrades, Achievement, Upgrade};
use crate::rules::scoring::ComboTracker;

/// Aggregate session state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// The 8×8 grid.
    pub board: Board,

    /// Active mode, fixed for the life of the session.
    pub mode: GameMode,

    // === Scoring ===
    pub score: i64,
    pub high_score: i64,
    pub combo: ComboTracker,

    /// Bounded energy pool, `0..=initial_energy`.
    pub energy: i64,

    // === Progression ===
    pub game_over: bool,
    /// Starts at 1; only challenge mode advances it.
    pub level: u32,
    pub total_chains: u32,
    pub streak: u32,
    pub best_streak: u32,
    /// Links placed over the whole session (cleared links still count).
    pub links_placed: u32,

    // === History ===
    /// `"x,y"` position of every triggered chain, in order.
    pub chain_history: Vector<String>,
    /// Every accepted action, in order, for replay.
    pub action_history: Vector<ActionRecord>,

    // === Progression registries ===
    pub achievements: Vec<Achievement>,
    pub upgrades: Vec<Upgrade>,
    /// Ids of upgrades driven to max level.
    pub unlocked: ImHashSet<String>,

    // === Mode-specific ===
    /// Present only in timed modes.
    pub time_remaining: Option<u64>,
    /// Puzzle objectives (empty outside puzzle mode).
    pub objectives: Vec<Objective>,
    pub completed_objectives: usize,
    /// Challenge bookkeeping (present only in challenge mode).
    pub challenge: Option<ChallengeState>,
}

impl GameState {
    /// Fresh state for a mode. Mode-specific fields (timer, objectives,
    /// challenge target) are filled in by `modes::controller::init_mode`;
    /// the board is seeded by the spawner.
    #[must_use]
    pub fn new(mode: GameMode, config: &EngineConfig) -> Self {
        Self {
            board: Board::new(),
            mode,
            score: 0,
            high_score: 0,
            combo: ComboTracker::default(),
            energy: config.initial_energy,
            game_over: false,
            level: 1,
            total_chains: 0,
            streak: 0,
            best_streak: 0,
            links_placed: 0,
            chain_history: Vector::new(),
            action_history: Vector::new(),
            achievements: default_achievements(),
            upgrades: default_upgrades(),
            unlocked: ImHashSet::new(),
            time_remaining: None,
            objectives: Vec::new(),
            completed_objectives: 0,
            challenge: None,
        }
    }

    /// Clamp-add to the energy pool.
    pub fn add_energy(&mut self, delta: i64, config: &EngineConfig) {
        self.energy = (self.energy + delta).clamp(0, config.initial_energy);
    }
}
