//! High-score persistence seam.
//!
//! Cross-session retention belongs to an external collaborator with a
//! simple read / write-on-change contract. The engine writes through
//! whenever the session score exceeds the known best.

/// Collaborator contract for high-score retention.
pub trait HighScoreStore {
    /// Best score known to the store.
    fn load(&self) -> i64;

    /// Record a new best score.
    fn save(&mut self, score: i64);
}

/// In-process store; the default when no durable collaborator is wired in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryHighScores {
    best: i64,
}

impl MemoryHighScores {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the store, e.g. when restoring from a snapshot.
    #[must_use]
    pub fn with_best(best: i64) -> Self {
        Self { best }
    }
}

impl HighScoreStore for MemoryHighScores {
    fn load(&self) -> i64 {
        self.best
    }

    fn save(&mut self, score: i64) {
        if score > self.best {
            self.best = score;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_starts_empty() {
        let store = MemoryHighScores::new();
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_save_keeps_maximum() {
        let mut store = MemoryHighScores::new();
        store.save(100);
        assert_eq!(store.load(), 100);

        store.save(50);
        assert_eq!(store.load(), 100);

        store.save(250);
        assert_eq!(store.load(), 250);
    }

    #[test]
    fn test_with_best_seeds_store() {
        let store = MemoryHighScores::with_best(777);
        assert_eq!(store.load(), 777);
    }
}
