//! Upgrade registry and effect descriptors.
//!
//! Upgrades are bought with score (`GameEngine::upgrade_ability`), one level
//! at a time up to `max_level`. Their effects feed back into engine math:
//! link cost, combo window, and post-chain energy restore. Reaching max
//! level adds the upgrade's id to the unlocked-ability set.

use serde::{Deserialize, Serialize};

/// What an upgrade modifies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    /// Reduces the link cost by `magnitude` per level.
    LinkDiscount,
    /// Extends the combo window by `magnitude` milliseconds per level.
    ComboWindow,
    /// Restores `magnitude` extra energy per chain per level.
    ChainRestore,
}

/// Effect descriptor: type plus per-level magnitude.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeEffect {
    pub kind: EffectKind,
    pub magnitude: i64,
}

/// One purchasable upgrade.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upgrade {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Score cost per level.
    pub cost: i64,
    pub level: u32,
    pub max_level: u32,
    pub effect: UpgradeEffect,
}

impl Upgrade {
    fn new(
        id: &str,
        name: &str,
        description: &str,
        cost: i64,
        max_level: u32,
        effect: UpgradeEffect,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            cost,
            level: 0,
            max_level,
            effect,
        }
    }

    /// Total effect contributed at the current level.
    #[must_use]
    pub fn bonus(&self) -> i64 {
        i64::from(self.level) * self.effect.magnitude
    }

    /// Can another level be bought?
    #[must_use]
    pub fn at_max(&self) -> bool {
        self.level >= self.max_level
    }
}

/// The built-in upgrade list for a fresh session.
#[must_use]
pub fn default_upgrades() -> Vec<Upgrade> {
    vec![
        Upgrade::new(
            "efficient-links",
            "Efficient Links",
            "Links cost less energy to place",
            200,
            3,
            UpgradeEffect { kind: EffectKind::LinkDiscount, magnitude: 2 },
        ),
        Upgrade::new(
            "steady-hands",
            "Steady Hands",
            "Combo window stays open longer",
            300,
            3,
            UpgradeEffect { kind: EffectKind::ComboWindow, magnitude: 500 },
        ),
        Upgrade::new(
            "capacitors",
            "Capacitors",
            "Chains restore more energy",
            250,
            3,
            UpgradeEffect { kind: EffectKind::ChainRestore, magnitude: 2 },
        ),
    ]
}
