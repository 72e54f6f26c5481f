//! Progression systems: achievements, upgrades, unlockable abilities.

pub mod achievements;
pub mod upgrades;

pub use achievements::{default_achievements, Achievement, AchievementMetric};
pub use upgrades::{default_upgrades, EffectKind, Upgrade, UpgradeEffect};
