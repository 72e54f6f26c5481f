//! Combo tracking and point math.
//!
//! A chain within the combo window of the previous one extends the combo;
//! otherwise the combo resets to 1. The multiplier grows 0.1 per combo step
//! and saturates at 2× (combo >= 10).

use serde::{Deserialize, Serialize};

/// Time-windowed combo state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboTracker {
    /// Current combo counter. 0 until the first chain of a session.
    pub combo: u32,
    /// Virtual-clock timestamp of the last successful chain.
    pub last_chain_ms: Option<u64>,
}

impl ComboTracker {
    /// Advance the combo for a chain firing at `now_ms`.
    ///
    /// Elapsed time strictly below `window_ms` continues the combo; at or
    /// past the window (or on the first chain ever) it resets to 1. Returns
    /// the new combo value.
    pub fn advance(&mut self, now_ms: u64, window_ms: u64) -> u32 {
        self.combo = match self.last_chain_ms {
            Some(last) if now_ms.saturating_sub(last) < window_ms => self.combo + 1,
            _ => 1,
        };
        self.last_chain_ms = Some(now_ms);
        self.combo
    }
}

/// Combo multiplier: `min(2.0, 1 + 0.1 * combo)`.
#[must_use]
pub fn multiplier(combo: u32) -> f64 {
    (1.0 + 0.1 * f64::from(combo)).min(2.0)
}

/// Points for a settled chain: board energy × per-energy value × multiplier,
/// floored to an integer.
#[must_use]
pub fn chain_points(total_energy: i64, energy_point_value: i64, multiplier: f64) -> i64 {
    ((total_energy * energy_point_value) as f64 * multiplier).floor() as i64
}
