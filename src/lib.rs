//! # pulse-grid
//!
//! Deterministic rule engine for a grid-based energy-chain puzzle game.
//!
//! ## Design Principles
//!
//! 1. **One authoritative state**: a single `GameState` per session,
//!    mutated only through the engine's action entry points. Readers treat
//!    it as an immutable snapshot between transitions.
//!
//! 2. **Silent validation**: invalid actions are no-ops, never errors.
//!    `ActionOutcome` reports *why* an action did nothing; ignoring it
//!    reproduces the reference behavior exactly.
//!
//! 3. **Deterministic and replayable**: all randomness flows through one
//!    seeded RNG and all timing through a host-driven virtual clock, so a
//!    session replays exactly from `(seed, accepted actions, advances)`.
//!
//! ## Architecture
//!
//! An 8×8 board of pulse and link tiles. Triggering an armed pulse clears
//! it and excites its Chebyshev neighborhood: pulses accumulate charge,
//! links forward the cascade unconditionally. Settled cascades score the
//! whole board's remaining energy under a time-windowed combo multiplier.
//! Four modes govern termination: endless, time-attack, puzzle
//! (objectives), and challenge (escalating targets with in-place
//! level-ups). A spawner keeps the board stocked with pulses.
//!
//! ## Modules
//!
//! - `core`: positions, tiles, board, config, RNG, actions, state
//! - `rules`: the engine, reaction propagation, scoring, spawner
//! - `modes`: game modes, objectives, per-mode progression rules
//! - `progress`: achievements, upgrades, unlockable abilities
//! - `session`: session ids and session-scoped timers
//! - `highscore`: the persistence collaborator seam
//! - `snapshot`: whole-session checkpointing

pub mod core;
pub mod highscore;
pub mod modes;
pub mod progress;
pub mod rules;
pub mod session;
pub mod snapshot;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionOutcome, ActionRecord, Board, EngineConfig, GameRng, GameRngState, GameState,
    LinkKind, Position, RejectReason, Tile, TileId, TileKind, GRID_SIZE,
};

pub use crate::rules::{ChainReport, ComboTracker, GameEngine, GameEngineBuilder};

pub use crate::modes::{ChallengeState, GameMode, Objective, TargetKind};

pub use crate::progress::{
    Achievement, AchievementMetric, EffectKind, Upgrade, UpgradeEffect,
};

pub use crate::highscore::{HighScoreStore, MemoryHighScores};

pub use crate::session::{SessionId, Timers};

pub use crate::snapshot::SessionSnapshot;
