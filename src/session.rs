//! Session identity and timer scoping.
//!
//! Each initialization starts a new session. Periodic timers (countdown,
//! spawner) are tagged with the session they belong to; before a timer's
//! effect is applied, its tag is checked against the engine's current
//! session. A stale timer — one created for a session that has since been
//! reset or replaced — never mutates the successor session's state.

use serde::{Deserialize, Serialize};

/// Monotonically increasing session identifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub u64);

impl SessionId {
    /// The id of the session after this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Session({})", self.0)
    }
}

/// Accumulators for the two periodic effects, scoped to one session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timers {
    session: SessionId,
    /// Time accrued toward the next countdown tick.
    pub countdown_acc_ms: u64,
    /// Time accrued toward the next spawner tick.
    pub spawn_acc_ms: u64,
}

impl Timers {
    /// Fresh timers for a session.
    #[must_use]
    pub fn new(session: SessionId) -> Self {
        Self {
            session,
            countdown_acc_ms: 0,
            spawn_acc_ms: 0,
        }
    }

    /// May these timers act on the given session's state?
    #[must_use]
    pub fn is_live(&self, current: SessionId) -> bool {
        self.session == current
    }
}
