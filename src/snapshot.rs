//! Whole-session snapshots for the external shell.
//!
//! A snapshot captures everything needed to resume a session byte-exactly:
//! the state aggregate, the RNG position (O(1) via the ChaCha word
//! counter), the timer accumulators, the session id, and the virtual
//! clock. Encoded with bincode for compact storage.

use serde::{Deserialize, Serialize};

use crate::core::rng::GameRngState;
use crate::core::state::GameState;
use crate::session::{SessionId, Timers};

/// Everything a `GameEngine` needs to resume a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub state: GameState,
    pub rng: GameRngState,
    pub timers: Timers,
    pub session: SessionId,
    pub now_ms: u64,
}

/// Serialize a snapshot to bytes.
pub fn encode(snapshot: &SessionSnapshot) -> Result<Vec<u8>, bincode::Error> {
    bincode::serialize(snapshot)
}

/// Deserialize a snapshot from bytes.
pub fn decode(bytes: &[u8]) -> Result<SessionSnapshot, bincode::Error> {
    bincode::deserialize(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::EngineConfig;
    use crate::core::rng::GameRng;
    use crate::modes::GameMode;

    fn sample() -> SessionSnapshot {
        let config = EngineConfig::default();
        let mut rng = GameRng::new(42);
        rng.gen_range_usize(0..100);

        SessionSnapshot {
            state: GameState::new(GameMode::Challenge, &config),
            rng: rng.state(),
            timers: Timers::new(SessionId(3)),
            session: SessionId(3),
            now_ms: 12_500,
        }
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let snapshot = sample();
        let bytes = encode(&snapshot).unwrap();
        let back = decode(&bytes).unwrap();
        assert_eq!(snapshot, back);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(decode(&[0xFF, 0x00, 0x01]).is_err());
    }

    #[test]
    fn test_rng_resumes_from_snapshot() {
        let config = EngineConfig::default();
        let mut rng = GameRng::new(9);
        rng.gen_range_usize(0..1000);

        let snapshot = SessionSnapshot {
            state: GameState::new(GameMode::Endless, &config),
            rng: rng.state(),
            timers: Timers::new(SessionId(1)),
            session: SessionId(1),
            now_ms: 0,
        };
        let bytes = encode(&snapshot).unwrap();
        let back = decode(&bytes).unwrap();

        let mut resumed = GameRng::from_state(&back.rng);
        assert_eq!(rng.gen_range_usize(0..1000), resumed.gen_range_usize(0..1000));
    }
}
