//! The game engine: action dispatch, timers, and session control.
//!
//! One `GameEngine` owns the authoritative `GameState`, the session RNG,
//! and the virtual clock. All mutation flows through `apply` (or its named
//! wrappers), each call a single atomic read-modify-write transition.
//! Invalid actions are silent no-ops; `ActionOutcome` reports why.
//!
//! ## Time
//!
//! The engine never reads a wall clock. The host drives time through
//! `advance(delta_ms)`, which moves the virtual clock and fires the two
//! periodic effects: the 1000 ms countdown tick (timed modes) and the
//! 5000 ms spawner tick. Both are scoped to the current session id and are
//! checked for liveness before firing, so a stale timer can never mutate a
//! superseded session's state.

use crate::core::action::{Action, ActionOutcome, ActionRecord, RejectReason};
use crate::core::config::EngineConfig;
use crate::core::position::Position;
use crate::core::rng::GameRng;
use crate::core::state::GameState;
use crate::core::tile::{LinkKind, TileKind};
use crate::highscore::{HighScoreStore, MemoryHighScores};
use crate::modes::controller;
use crate::modes::GameMode;
use crate::progress::{AchievementMetric, EffectKind, Upgrade};
use crate::rules::{reaction, scoring, spawner};
use crate::session::{SessionId, Timers};
use crate::snapshot::SessionSnapshot;

/// The rule engine. See module docs.
pub struct GameEngine {
    config: EngineConfig,
    state: GameState,
    rng: GameRng,
    session: SessionId,
    timers: Timers,
    now_ms: u64,
    store: Box<dyn HighScoreStore>,
}

/// Builder for a `GameEngine`.
///
/// Defaults: reference rules (`EngineConfig::default`) and an in-memory
/// high-score store.
pub struct GameEngineBuilder {
    mode: GameMode,
    seed: u64,
    config: EngineConfig,
    store: Box<dyn HighScoreStore>,
}

impl GameEngineBuilder {
    #[must_use]
    pub fn new(mode: GameMode, seed: u64) -> Self {
        Self {
            mode,
            seed,
            config: EngineConfig::default(),
            store: Box::new(MemoryHighScores::new()),
        }
    }

    #[must_use]
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn store(mut self, store: Box<dyn HighScoreStore>) -> Self {
        self.store = store;
        self
    }

    /// Build the engine and start its first session.
    #[must_use]
    pub fn build(self) -> GameEngine {
        let state = GameState::new(self.mode, &self.config);
        let mut engine = GameEngine {
            config: self.config,
            state,
            rng: GameRng::new(self.seed),
            session: SessionId::default(),
            timers: Timers::new(SessionId::default()),
            now_ms: 0,
            store: self.store,
        };
        engine.start_session(self.mode);
        engine
    }
}

impl GameEngine {
    /// Engine with default config and an in-memory high-score store.
    #[must_use]
    pub fn new(mode: GameMode, seed: u64) -> Self {
        Self::builder(mode, seed).build()
    }

    #[must_use]
    pub fn builder(mode: GameMode, seed: u64) -> GameEngineBuilder {
        GameEngineBuilder::new(mode, seed)
    }

    // === Read access ===

    /// The authoritative state snapshot. Callers must treat it as immutable
    /// between transitions.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current virtual-clock time.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    #[must_use]
    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Best score known to the high-score collaborator.
    #[must_use]
    pub fn store_best(&self) -> i64 {
        self.store.load()
    }

    // === Session control ===

    /// Discard the current session and start a fresh one in `mode`.
    pub fn initialize(&mut self, mode: GameMode) {
        self.start_session(mode);
    }

    fn start_session(&mut self, mode: GameMode) {
        // Supersede any timers scoped to the previous session.
        self.session = self.session.next();
        self.timers = Timers::new(self.session);

        let mut state = GameState::new(mode, &self.config);
        state.high_score = self.store.load();
        self.state = state;

        controller::init_mode(&mut self.state, &mut self.rng, &self.config);
        spawner::refill(&mut self.state.board, &mut self.rng, self.config.min_pulse_tiles);
    }

    /// Advance the virtual clock, firing any periodic effects that come due.
    pub fn advance(&mut self, delta_ms: u64) {
        self.now_ms += delta_ms;
        if !self.timers.is_live(self.session) || self.state.game_over {
            return;
        }

        if self.state.mode.is_timed() {
            self.timers.countdown_acc_ms += delta_ms;
            while self.timers.countdown_acc_ms >= self.config.countdown_interval_ms
                && !self.state.game_over
            {
                self.timers.countdown_acc_ms -= self.config.countdown_interval_ms;
                controller::tick_countdown(&mut self.state, self.config.countdown_interval_ms);
            }
        }

        self.timers.spawn_acc_ms += delta_ms;
        while self.timers.spawn_acc_ms >= self.config.spawn_interval_ms {
            self.timers.spawn_acc_ms -= self.config.spawn_interval_ms;
            if !self.state.game_over {
                spawner::refill(&mut self.state.board, &mut self.rng, self.config.min_pulse_tiles);
            }
        }
    }

    // === Action surface ===

    /// Apply an action. Accepted actions are recorded in the action
    /// history; rejected actions leave state byte-identical.
    pub fn apply(&mut self, action: Action) -> ActionOutcome {
        let outcome = match &action {
            Action::PlaceLink { from, to } => self.apply_place_link(*from, *to),
            Action::TriggerChain { at } => self.apply_trigger_chain(*at),
            Action::UpdateScore { points } => self.apply_update_score(*points),
            Action::GeneratePulses => self.apply_generate_pulses(),
            Action::UpgradeAbility { id } => self.apply_upgrade_ability(&id.clone()),
            Action::CheckAchievements => self.apply_check_achievements(),
            Action::UpdateTimeRemaining { ms } => self.apply_update_time(*ms),
            Action::Reset => {
                self.start_session(self.state.mode);
                ActionOutcome::Accepted
            }
        };

        // Reset replaces the history wholesale; everything else appends.
        if outcome.is_accepted() && !matches!(action, Action::Reset) {
            self.state
                .action_history
                .push_back(ActionRecord::new(action, self.now_ms));
        }
        outcome
    }

    pub fn place_link(&mut self, from: Position, to: Position) -> ActionOutcome {
        self.apply(Action::PlaceLink { from, to })
    }

    pub fn trigger_chain(&mut self, at: Position) -> ActionOutcome {
        self.apply(Action::TriggerChain { at })
    }

    pub fn update_score(&mut self, points: i64) -> ActionOutcome {
        self.apply(Action::UpdateScore { points })
    }

    /// Restart the current mode with a fresh board and session.
    pub fn reset(&mut self) -> ActionOutcome {
        self.apply(Action::Reset)
    }

    pub fn generate_pulses(&mut self) -> ActionOutcome {
        self.apply(Action::GeneratePulses)
    }

    pub fn upgrade_ability(&mut self, id: impl Into<String>) -> ActionOutcome {
        self.apply(Action::UpgradeAbility { id: id.into() })
    }

    pub fn check_achievements(&mut self) -> ActionOutcome {
        self.apply(Action::CheckAchievements)
    }

    pub fn update_time_remaining(&mut self, ms: u64) -> ActionOutcome {
        self.apply(Action::UpdateTimeRemaining { ms })
    }

    // === Rules ===

    fn apply_place_link(&mut self, from: Position, to: Position) -> ActionOutcome {
        if self.state.game_over {
            return ActionOutcome::Rejected(RejectReason::GameOver);
        }

        // The origin tile is advisory: consulted, never validated.
        // Placement validity depends only on the destination.
        let _origin = self.state.board.tile(from).kind;

        if self.state.board.tile(to).kind != TileKind::Empty {
            return ActionOutcome::Rejected(RejectReason::Occupied);
        }
        let cost = self.link_cost();
        if self.state.energy < cost {
            return ActionOutcome::Rejected(RejectReason::InsufficientEnergy);
        }
        // First link is free to place anywhere; later links must touch the
        // existing network.
        let connected =
            self.state.board.link_count() == 0 || self.state.board.has_adjacent_link(to);
        if !connected {
            return ActionOutcome::Rejected(RejectReason::Disconnected);
        }

        self.state.board.set_link(to, LinkKind::Normal);
        let refund = cost * self.config.link_refund_pct / 100;
        self.state.add_energy(refund - cost, &self.config);
        self.state.links_placed += 1;
        ActionOutcome::Accepted
    }

    fn apply_trigger_chain(&mut self, at: Position) -> ActionOutcome {
        if self.state.game_over {
            return ActionOutcome::Rejected(RejectReason::GameOver);
        }
        let tile = self.state.board.tile(at);
        match tile.kind {
            TileKind::Pulse if tile.energy >= 1 => {}
            TileKind::Pulse => return ActionOutcome::Rejected(RejectReason::Depleted),
            _ => return ActionOutcome::Rejected(RejectReason::NotAPulse),
        }

        // Combo continuation is decided before the cascade runs.
        let window = self.combo_window_ms();
        let combo = self.state.combo.advance(self.now_ms, window);
        let multiplier = scoring::multiplier(combo);

        reaction::cascade(&mut self.state.board, at);

        // Points are computed once, after the cascade settles, from the
        // energy remaining on the whole board.
        let points = scoring::chain_points(
            self.state.board.active_energy(),
            self.config.energy_point_value,
            multiplier,
        );
        self.add_score(points);

        self.state.total_chains += 1;
        self.state.chain_history.push_back(at.to_string());
        self.state.streak += 1;
        self.state.best_streak = self.state.best_streak.max(self.state.streak);
        let restore = self.chain_restore();
        self.state.add_energy(restore, &self.config);

        controller::evaluate(&mut self.state, &self.config);
        ActionOutcome::Accepted
    }

    fn apply_update_score(&mut self, points: i64) -> ActionOutcome {
        self.add_score(points);
        ActionOutcome::Accepted
    }

    fn apply_generate_pulses(&mut self) -> ActionOutcome {
        if self.state.game_over {
            return ActionOutcome::Rejected(RejectReason::GameOver);
        }
        spawner::refill(&mut self.state.board, &mut self.rng, self.config.min_pulse_tiles);
        ActionOutcome::Accepted
    }

    fn apply_upgrade_ability(&mut self, id: &str) -> ActionOutcome {
        let Some(index) = self.state.upgrades.iter().position(|u| u.id == id) else {
            return ActionOutcome::Rejected(RejectReason::UnknownUpgrade);
        };
        if self.state.upgrades[index].at_max() {
            return ActionOutcome::Rejected(RejectReason::UpgradeMaxed);
        }
        let cost = self.state.upgrades[index].cost;
        if self.state.score < cost {
            return ActionOutcome::Rejected(RejectReason::InsufficientScore);
        }

        self.state.score -= cost;
        let upgrade = &mut self.state.upgrades[index];
        upgrade.level += 1;
        if upgrade.at_max() {
            let unlocked_id = upgrade.id.clone();
            self.state.unlocked.insert(unlocked_id);
        }
        ActionOutcome::Accepted
    }

    fn apply_check_achievements(&mut self) -> ActionOutcome {
        let chains = i64::from(self.state.total_chains);
        let best_streak = i64::from(self.state.best_streak);
        let links_placed = i64::from(self.state.links_placed);
        let score = self.state.score;

        let mut reward = 0;
        for achievement in &mut self.state.achievements {
            let value = match achievement.metric {
                AchievementMetric::TotalChains => chains,
                AchievementMetric::BestStreak => best_streak,
                AchievementMetric::LinksPlaced => links_placed,
                AchievementMetric::Score => score,
            };
            if achievement.update(value) {
                reward += achievement.reward;
            }
        }
        if reward > 0 {
            self.add_score(reward);
        }
        ActionOutcome::Accepted
    }

    fn apply_update_time(&mut self, ms: u64) -> ActionOutcome {
        if self.state.time_remaining.is_none() {
            return ActionOutcome::Rejected(RejectReason::NoTimer);
        }
        self.state.time_remaining = Some(ms);
        if ms == 0 {
            self.state.game_over = true;
        }
        ActionOutcome::Accepted
    }

    // === Scoring ===

    fn add_score(&mut self, points: i64) {
        self.state.score += points;
        if self.state.score > self.state.high_score {
            self.state.high_score = self.state.score;
            self.store.save(self.state.high_score);
        }
    }

    // === Upgrade effects ===

    fn effect_bonus(&self, kind: EffectKind) -> i64 {
        self.state
            .upgrades
            .iter()
            .filter(|u| u.effect.kind == kind)
            .map(Upgrade::bonus)
            .sum()
    }

    fn link_cost(&self) -> i64 {
        (self.config.link_cost - self.effect_bonus(EffectKind::LinkDiscount)).max(1)
    }

    fn combo_window_ms(&self) -> u64 {
        self.config.combo_window_ms + self.effect_bonus(EffectKind::ComboWindow).max(0) as u64
    }

    fn chain_restore(&self) -> i64 {
        self.config.chain_energy_restore + self.effect_bonus(EffectKind::ChainRestore)
    }

    // === Snapshots ===

    /// Capture the whole session for checkpointing.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state.clone(),
            rng: self.rng.state(),
            timers: self.timers,
            session: self.session,
            now_ms: self.now_ms,
        }
    }

    /// Resume a session from a snapshot.
    #[must_use]
    pub fn from_snapshot(
        snapshot: SessionSnapshot,
        config: EngineConfig,
        store: Box<dyn HighScoreStore>,
    ) -> Self {
        Self {
            config,
            state: snapshot.state,
            rng: GameRng::from_state(&snapshot.rng),
            session: snapshot.session,
            timers: snapshot.timers,
            now_ms: snapshot.now_ms,
            store,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: u8, y: u8) -> Position {
        Position::new(x, y).unwrap()
    }

    /// Config with the spawner floor disabled, for board setups that need
    /// full control over tile placement.
    fn quiet_config() -> EngineConfig {
        EngineConfig {
            min_pulse_tiles: 0,
            ..EngineConfig::default()
        }
    }

    fn quiet_engine(mode: GameMode) -> GameEngine {
        GameEngine::builder(mode, 42).config(quiet_config()).build()
    }

    #[test]
    fn test_new_engine_seeds_pulse_floor() {
        let engine = GameEngine::new(GameMode::Endless, 42);
        assert_eq!(engine.state().board.pulse_count(), 5);
        assert_eq!(engine.state().energy, 100);
        assert!(!engine.state().game_over);
    }

    #[test]
    fn test_same_seed_same_session() {
        let a = GameEngine::new(GameMode::Endless, 7);
        let b = GameEngine::new(GameMode::Endless, 7);
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn test_first_link_placeable_anywhere() {
        let mut engine = quiet_engine(GameMode::Endless);
        let outcome = engine.place_link(at(0, 0), at(3, 3));
        assert_eq!(outcome, ActionOutcome::Accepted);

        let tile = engine.state().board.tile(at(3, 3));
        assert_eq!(tile.kind, TileKind::Link);
        assert_eq!(tile.link, Some(LinkKind::Normal));
        assert_eq!(tile.energy, 1);
        // 100 - 10 + 2
        assert_eq!(engine.state().energy, 92);
        assert_eq!(engine.state().links_placed, 1);
    }

    #[test]
    fn test_second_link_must_touch_network() {
        let mut engine = quiet_engine(GameMode::Endless);
        engine.place_link(at(0, 0), at(3, 3));

        let before = engine.state().clone();
        let outcome = engine.place_link(at(3, 3), at(6, 6));
        assert_eq!(outcome, ActionOutcome::Rejected(RejectReason::Disconnected));
        assert_eq!(engine.state(), &before);

        assert_eq!(engine.place_link(at(3, 3), at(4, 4)), ActionOutcome::Accepted);
    }

    #[test]
    fn test_place_link_on_occupied_is_noop() {
        let mut engine = quiet_engine(GameMode::Endless);
        engine.place_link(at(0, 0), at(3, 3));

        let before = engine.state().clone();
        let outcome = engine.place_link(at(0, 0), at(3, 3));
        assert_eq!(outcome, ActionOutcome::Rejected(RejectReason::Occupied));
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_trigger_on_empty_or_link_is_noop() {
        let mut engine = quiet_engine(GameMode::Endless);
        engine.place_link(at(0, 0), at(3, 3));

        let before = engine.state().clone();
        assert_eq!(
            engine.trigger_chain(at(5, 5)),
            ActionOutcome::Rejected(RejectReason::NotAPulse)
        );
        assert_eq!(
            engine.trigger_chain(at(3, 3)),
            ActionOutcome::Rejected(RejectReason::NotAPulse)
        );
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_trigger_chain_bookkeeping() {
        let mut engine = GameEngine::new(GameMode::Endless, 42);
        let pulse = engine
            .state()
            .board
            .tiles()
            .find(|t| t.kind == TileKind::Pulse)
            .map(|t| t.position)
            .unwrap();

        let outcome = engine.trigger_chain(pulse);
        assert_eq!(outcome, ActionOutcome::Accepted);
        assert_eq!(engine.state().total_chains, 1);
        assert_eq!(engine.state().streak, 1);
        assert_eq!(engine.state().best_streak, 1);
        assert_eq!(engine.state().combo.combo, 1);
        assert_eq!(engine.state().chain_history.len(), 1);
        assert_eq!(engine.state().chain_history[0], pulse.to_string());
    }

    #[test]
    fn test_accepted_actions_recorded_rejections_not() {
        let mut engine = quiet_engine(GameMode::Endless);
        engine.place_link(at(0, 0), at(3, 3)); // accepted
        engine.place_link(at(0, 0), at(3, 3)); // rejected: occupied

        assert_eq!(engine.state().action_history.len(), 1);
        assert_eq!(
            engine.state().action_history[0].action,
            Action::PlaceLink { from: at(0, 0), to: at(3, 3) }
        );
    }

    #[test]
    fn test_update_score_writes_through_high_score() {
        let mut engine = quiet_engine(GameMode::Endless);
        engine.update_score(300);
        assert_eq!(engine.state().score, 300);
        assert_eq!(engine.state().high_score, 300);
        assert_eq!(engine.store_best(), 300);

        engine.update_score(-100);
        assert_eq!(engine.state().score, 200);
        assert_eq!(engine.state().high_score, 300);
    }

    #[test]
    fn test_reset_starts_fresh_session_keeps_high_score() {
        let mut engine = GameEngine::new(GameMode::Endless, 42);
        engine.update_score(500);
        let old_session = engine.session();

        engine.reset();

        assert_ne!(engine.session(), old_session);
        assert_eq!(engine.state().score, 0);
        assert_eq!(engine.state().high_score, 500);
        assert!(engine.state().action_history.is_empty());
        assert_eq!(engine.state().board.pulse_count(), 5);
    }

    #[test]
    fn test_initialize_switches_mode() {
        let mut engine = GameEngine::new(GameMode::Endless, 42);
        engine.initialize(GameMode::TimeAttack);
        assert_eq!(engine.state().mode, GameMode::TimeAttack);
        assert_eq!(engine.state().time_remaining, Some(60_000));
    }

    #[test]
    fn test_upgrade_ability_gating() {
        let mut engine = quiet_engine(GameMode::Endless);

        assert_eq!(
            engine.upgrade_ability("no-such-upgrade"),
            ActionOutcome::Rejected(RejectReason::UnknownUpgrade)
        );
        assert_eq!(
            engine.upgrade_ability("efficient-links"),
            ActionOutcome::Rejected(RejectReason::InsufficientScore)
        );

        engine.update_score(1000);
        assert_eq!(engine.upgrade_ability("efficient-links"), ActionOutcome::Accepted);
        assert_eq!(engine.state().score, 800);
        assert_eq!(engine.state().upgrades[0].level, 1);
    }

    #[test]
    fn test_upgrade_discount_feeds_link_cost() {
        let mut engine = quiet_engine(GameMode::Endless);
        engine.update_score(1000);
        engine.upgrade_ability("efficient-links"); // -2 per level

        engine.place_link(at(0, 0), at(3, 3));
        // cost 8, refund 20% of 8 = 1; net 7
        assert_eq!(engine.state().energy, 93);
    }

    #[test]
    fn test_max_level_unlocks_ability() {
        let mut engine = quiet_engine(GameMode::Endless);
        engine.update_score(10_000);

        for _ in 0..3 {
            assert_eq!(engine.upgrade_ability("capacitors"), ActionOutcome::Accepted);
        }
        assert!(engine.state().unlocked.contains("capacitors"));
        assert_eq!(
            engine.upgrade_ability("capacitors"),
            ActionOutcome::Rejected(RejectReason::UpgradeMaxed)
        );
    }

    #[test]
    fn test_check_achievements_grants_reward_once() {
        let mut engine = GameEngine::new(GameMode::Endless, 42);
        let pulse = engine
            .state()
            .board
            .tiles()
            .find(|t| t.kind == TileKind::Pulse)
            .map(|t| t.position)
            .unwrap();
        engine.trigger_chain(pulse);

        let before = engine.state().score;
        engine.check_achievements();
        // "first-spark" reward
        assert_eq!(engine.state().score, before + 50);
        assert!(engine.state().achievements[0].completed);

        let after = engine.state().score;
        engine.check_achievements();
        assert_eq!(engine.state().score, after);
    }

    #[test]
    fn test_update_time_remaining() {
        let mut engine = GameEngine::new(GameMode::TimeAttack, 42);
        assert_eq!(engine.update_time_remaining(5000), ActionOutcome::Accepted);
        assert_eq!(engine.state().time_remaining, Some(5000));

        assert_eq!(engine.update_time_remaining(0), ActionOutcome::Accepted);
        assert!(engine.state().game_over);
    }

    #[test]
    fn test_update_time_rejected_for_untimed_mode() {
        let mut engine = GameEngine::new(GameMode::Endless, 42);
        assert_eq!(
            engine.update_time_remaining(5000),
            ActionOutcome::Rejected(RejectReason::NoTimer)
        );
    }

    #[test]
    fn test_actions_rejected_after_game_over() {
        let mut engine = GameEngine::new(GameMode::TimeAttack, 42);
        engine.update_time_remaining(0);
        assert!(engine.state().game_over);

        let before = engine.state().clone();
        assert_eq!(
            engine.place_link(at(0, 0), at(3, 3)),
            ActionOutcome::Rejected(RejectReason::GameOver)
        );
        assert_eq!(
            engine.generate_pulses(),
            ActionOutcome::Rejected(RejectReason::GameOver)
        );
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut engine = GameEngine::new(GameMode::Challenge, 42);
        engine.advance(3000);
        engine.update_score(123);

        let snapshot = engine.snapshot();
        let restored = GameEngine::from_snapshot(
            snapshot,
            engine.config().clone(),
            Box::new(MemoryHighScores::with_best(engine.store_best())),
        );

        assert_eq!(restored.state(), engine.state());
        assert_eq!(restored.now_ms(), engine.now_ms());
        assert_eq!(restored.session(), engine.session());
    }
}
