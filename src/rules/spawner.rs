//! Pulse spawner: keeps the board populated.
//!
//! Runs on its own cadence (driven by `GameEngine::advance`) and at
//! initialization, independent of player actions. Reads and mutates only
//! the board.

use crate::core::board::Board;
use crate::core::rng::GameRng;

/// Convert uniformly random empty cells to pulse tiles (energy 1) until at
/// least `min_pulses` exist or no empty cell remains.
///
/// Returns the number of pulses spawned. Terminates unconditionally: each
/// iteration either consumes an empty cell or exits.
pub fn refill(board: &mut Board, rng: &mut GameRng, min_pulses: usize) -> usize {
    let mut spawned = 0;
    while board.pulse_count() < min_pulses {
        let empties = board.empty_positions();
        let Some(&position) = rng.choose(&empties) else {
            break; // board is saturated
        };
        board.set_pulse(position, 1);
        spawned += 1;
    }
    spawned
}
