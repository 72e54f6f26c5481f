//! Per-mode progression rules.
//!
//! `init_mode` fills in the mode-specific state at session start;
//! `evaluate` runs after each settled chain and decides puzzle completion
//! and challenge level-ups; `tick_countdown` applies one countdown step for
//! timed modes.

use crate::core::config::EngineConfig;
use crate::core::rng::GameRng;
use crate::core::state::GameState;
use crate::modes::{objective_pool, ChallengeState, GameMode, TargetKind};

/// Current value of the metric a target measures.
#[must_use]
pub fn metric(state: &GameState, kind: TargetKind) -> i64 {
    match kind {
        TargetKind::Score => state.score,
        TargetKind::Chains => i64::from(state.total_chains),
        TargetKind::Links => state.board.link_count() as i64,
    }
}

/// Challenge target for a level: `base + step * level`.
#[must_use]
pub fn challenge_target(config: &EngineConfig, level: u32) -> i64 {
    config.challenge_base_target + config.challenge_target_step * i64::from(level)
}

/// Fill in mode-specific fields on a fresh state.
pub fn init_mode(state: &mut GameState, rng: &mut GameRng, config: &EngineConfig) {
    match state.mode {
        GameMode::Endless => {}
        GameMode::TimeAttack => {
            state.time_remaining = Some(config.time_attack_ms);
        }
        GameMode::Puzzle => {
            let pool = objective_pool();
            let pick = rng.gen_range_usize(0..pool.len());
            state.objectives = vec![pool[pick]];
        }
        GameMode::Challenge => {
            state.time_remaining = Some(config.challenge_ms);
            let kinds = [TargetKind::Score, TargetKind::Chains, TargetKind::Links];
            let kind = kinds[rng.gen_range_usize(0..kinds.len())];
            state.challenge = Some(ChallengeState {
                kind,
                target: challenge_target(config, state.level),
            });
        }
    }
}

/// Evaluate objectives and level-ups against the live state.
///
/// Called after each settled chain, once score and chain bookkeeping have
/// been applied.
pub fn evaluate(state: &mut GameState, config: &EngineConfig) {
    match state.mode {
        GameMode::Puzzle => {
            let done = state
                .objectives
                .iter()
                .filter(|o| metric(state, o.kind) >= o.target)
                .count();
            state.completed_objectives = done;
            if !state.objectives.is_empty() && done == state.objectives.len() {
                state.game_over = true;
            }
        }
        GameMode::Challenge => {
            let Some(challenge) = state.challenge else { return };
            if metric(state, challenge.kind) >= challenge.target {
                // Level up in place instead of ending the game.
                state.level += 1;
                let next_target = challenge_target(config, state.level);
                if let Some(c) = &mut state.challenge {
                    c.target = next_target;
                }
                let bonus = config.challenge_time_bonus_ms * u64::from(state.level);
                state.time_remaining = Some(state.time_remaining.unwrap_or(0) + bonus);
                state.game_over = false;
            }
        }
        GameMode::Endless | GameMode::TimeAttack => {}
    }
}

/// Apply one countdown step. Reaching zero ends the game in both timed
/// modes.
pub fn tick_countdown(state: &mut GameState, step_ms: u64) {
    if let Some(remaining) = state.time_remaining {
        let next = remaining.saturating_sub(step_ms);
        state.time_remaining = Some(next);
        if next == 0 {
            state.game_over = true;
        }
    }
}
