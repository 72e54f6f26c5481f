//! The action surface and its value-based outcome signaling.
//!
//! There is no exception taxonomy: invalid actions are silent no-ops. The
//! engine additionally reports *why* an action was a no-op through
//! `ActionOutcome`, which callers are free to ignore — default observable
//! behavior is the unchanged state snapshot.

use serde::{Deserialize, Serialize};

use super::position::Position;

/// A player- or host-initiated action.
///
/// All actions are synchronous and complete within a single state
/// transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Place a conductive link at `to`. `from` is advisory: it names the
    /// tile the player dragged from, is consulted for the record, and plays
    /// no part in validation.
    PlaceLink { from: Position, to: Position },

    /// Trigger a chain reaction at a pulse tile.
    TriggerChain { at: Position },

    /// Apply a raw score delta (external collaborators, achievement rewards).
    UpdateScore { points: i64 },

    /// Refill the board's pulse floor immediately.
    GeneratePulses,

    /// Spend score to raise an upgrade one level.
    UpgradeAbility { id: String },

    /// Recompute achievement progress and grant new rewards.
    CheckAchievements,

    /// Overwrite the remaining time of a timed mode.
    UpdateTimeRemaining { ms: u64 },

    /// Restart the current mode with a fresh board.
    Reset,
}

/// Result of applying an action.
///
/// Rejection leaves the state byte-identical to before the call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    Accepted,
    Rejected(RejectReason),
}

impl ActionOutcome {
    /// Did the action mutate state?
    #[must_use]
    pub fn is_accepted(self) -> bool {
        matches!(self, ActionOutcome::Accepted)
    }
}

/// Why an action was a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// The session has already ended.
    GameOver,
    /// Link destination is not an empty tile.
    Occupied,
    /// Energy pool cannot cover the link cost.
    InsufficientEnergy,
    /// Destination is not adjacent to any existing link (and the board
    /// already has links).
    Disconnected,
    /// Chain trigger aimed at an empty or link tile.
    NotAPulse,
    /// Chain trigger aimed at a pulse with no charge.
    Depleted,
    /// No upgrade with that id exists.
    UnknownUpgrade,
    /// Upgrade already at max level.
    UpgradeMaxed,
    /// Score cannot cover the upgrade cost.
    InsufficientScore,
    /// The active mode has no timer.
    NoTimer,
}

/// An accepted action with the engine time at which it applied.
///
/// Rejected actions are never recorded: the history is a replay log, and a
/// rejection by definition changed nothing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub action: Action,
    /// Engine virtual clock at application time.
    pub at_ms: u64,
}

impl ActionRecord {
    #[must_use]
    pub fn new(action: Action, at_ms: u64) -> Self {
        Self { action, at_ms }
    }
}
