//! Achievement registry and progress rules.
//!
//! Progress is a 0–100 percentage recomputed from live metrics on demand
//! (`GameEngine::check_achievements`). An achievement completes once, when
//! progress reaches 100, and its reward is granted exactly once.

use serde::{Deserialize, Serialize};

/// Which live metric feeds an achievement's progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AchievementMetric {
    TotalChains,
    BestStreak,
    LinksPlaced,
    Score,
}

/// One achievement with display metadata and progress bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub metric: AchievementMetric,
    /// Metric value at which progress reaches 100.
    pub target: i64,
    /// 0–100.
    pub progress: u32,
    pub completed: bool,
    /// Score bonus granted on completion.
    pub reward: i64,
}

impl Achievement {
    fn new(
        id: &str,
        name: &str,
        description: &str,
        metric: AchievementMetric,
        target: i64,
        reward: i64,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            metric,
            target,
            progress: 0,
            completed: false,
            reward,
        }
    }

    /// Recompute progress from the metric's current value.
    ///
    /// Returns `true` exactly once: the call on which the achievement
    /// completes. Progress never decreases.
    pub fn update(&mut self, value: i64) -> bool {
        let pct = if self.target <= 0 {
            100
        } else {
            ((value.max(0).saturating_mul(100)) / self.target).min(100) as u32
        };
        self.progress = self.progress.max(pct);
        if self.progress >= 100 && !self.completed {
            self.completed = true;
            return true;
        }
        false
    }
}

/// The built-in achievement list for a fresh session.
#[must_use]
pub fn default_achievements() -> Vec<Achievement> {
    vec![
        Achievement::new(
            "first-spark",
            "First Spark",
            "Trigger your first chain reaction",
            AchievementMetric::TotalChains,
            1,
            50,
        ),
        Achievement::new(
            "chain-reactor",
            "Chain Reactor",
            "Trigger 25 chain reactions",
            AchievementMetric::TotalChains,
            25,
            250,
        ),
        Achievement::new(
            "streak-runner",
            "Streak Runner",
            "Reach a streak of 10",
            AchievementMetric::BestStreak,
            10,
            150,
        ),
        Achievement::new(
            "grid-architect",
            "Grid Architect",
            "Place 10 links",
            AchievementMetric::LinksPlaced,
            10,
            200,
        ),
        Achievement::new(
            "overcharged",
            "Overcharged",
            "Score 5000 points",
            AchievementMetric::Score,
            5000,
            500,
        ),
    ]
}
