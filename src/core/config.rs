//! Engine tuning constants.
//!
//! Every number the rules reference lives here with its default. The grid
//! size itself is deliberately *not* configurable (see `core::position`).

use serde::{Deserialize, Serialize};

/// Tuning knobs for a game session.
///
/// Defaults reproduce the reference rules; tests override individual fields
/// via struct-update syntax.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Upper bound of the energy pool, and its starting value.
    pub initial_energy: i64,

    /// Base cost of placing a normal link.
    pub link_cost: i64,

    /// Percentage of the link cost refunded immediately on placement.
    pub link_refund_pct: i64,

    /// Base combo continuation window in milliseconds.
    pub combo_window_ms: u64,

    /// Points per unit of board energy when a chain settles.
    pub energy_point_value: i64,

    /// Energy restored to the pool after each successful chain.
    pub chain_energy_restore: i64,

    /// Spawner keeps at least this many pulse tiles on the board.
    pub min_pulse_tiles: usize,

    /// Spawner cadence.
    pub spawn_interval_ms: u64,

    /// Countdown cadence for timed modes.
    pub countdown_interval_ms: u64,

    /// Time-attack session length.
    pub time_attack_ms: u64,

    /// Challenge session starting time.
    pub challenge_ms: u64,

    /// Challenge target is `base + step * level`.
    pub challenge_base_target: i64,
    pub challenge_target_step: i64,

    /// Time added per level-up is `bonus * new_level`.
    pub challenge_time_bonus_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_energy: 100,
            link_cost: 10,
            link_refund_pct: 20,
            combo_window_ms: 2000,
            energy_point_value: 10,
            chain_energy_restore: 5,
            min_pulse_tiles: 5,
            spawn_interval_ms: 5000,
            countdown_interval_ms: 1000,
            time_attack_ms: 60_000,
            challenge_ms: 120_000,
            challenge_base_target: 500,
            challenge_target_step: 100,
            challenge_time_bonus_ms: 10_000,
        }
    }
}
