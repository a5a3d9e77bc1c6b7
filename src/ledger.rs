//! Points ledger
//!
//! Running points total and all-time high score, persisted to a key-value
//! store under fixed keys. Storage failures are logged and swallowed: the
//! in-memory values stay authoritative for the session.

use crate::consts::{HIGH_SCORE_KEY, POINTS_KEY, POINTS_PER_MATCH};
use crate::storage::{KeyValueStore, load_json, save_json};

/// Persisted points total and high score
#[derive(Debug)]
pub struct PointsLedger<S: KeyValueStore> {
    store: S,
    points: u64,
    high_score: u64,
}

impl<S: KeyValueStore> PointsLedger<S> {
    /// Load the ledger from `store` (missing or unreadable values start at 0)
    pub fn load(store: S) -> Self {
        let points = read_counter(&store, POINTS_KEY);
        let high_score = read_counter(&store, HIGH_SCORE_KEY);
        log::info!("Loaded points ledger: {} points, high score {}", points, high_score);
        Self {
            store,
            points,
            high_score,
        }
    }

    /// Current session points
    pub fn points(&self) -> u64 {
        self.points
    }

    /// All-time high score
    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    /// Whether the current total is (or ties) the high score
    pub fn is_new_high_score(&self) -> bool {
        self.points > 0 && self.points >= self.high_score
    }

    /// Award points for `correct_count` matches. Returns the points just earned.
    pub fn add_points(&mut self, correct_count: usize) -> u64 {
        let earned = POINTS_PER_MATCH.saturating_mul(correct_count as u64);
        self.points = self.points.saturating_add(earned);
        self.write_counter(POINTS_KEY, self.points);

        if self.points > self.high_score {
            self.high_score = self.points;
            self.write_counter(HIGH_SCORE_KEY, self.high_score);
            log::info!("New high score: {}", self.high_score);
        }

        earned
    }

    /// Zero the session total. The high score is kept.
    pub fn reset(&mut self) {
        self.points = 0;
        self.write_counter(POINTS_KEY, 0);
        log::info!("Points reset");
    }

    /// Access the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    fn write_counter(&mut self, key: &str, value: u64) {
        if let Err(e) = save_json(&mut self.store, key, &value) {
            log::warn!("Failed to save {}: {}", key, e);
        }
    }
}

fn read_counter<S: KeyValueStore>(store: &S, key: &str) -> u64 {
    match load_json::<u64, _>(store, key) {
        Ok(value) => value.unwrap_or(0),
        Err(e) => {
            log::warn!("Failed to load {}: {}", key, e);
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, StorageError};
    use proptest::prelude::*;

    /// Store whose writes always fail
    #[derive(Default)]
    struct ReadOnlyStore {
        inner: MemoryStore,
    }

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend("quota exceeded".to_string()))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend("quota exceeded".to_string()))
        }
    }

    #[test]
    fn test_load_defaults_to_zero() {
        let ledger = PointsLedger::load(MemoryStore::new());
        assert_eq!(ledger.points(), 0);
        assert_eq!(ledger.high_score(), 0);
        assert!(!ledger.is_new_high_score());
    }

    #[test]
    fn test_load_existing_values() {
        let mut store = MemoryStore::new();
        store.set(POINTS_KEY, "40").unwrap();
        store.set(HIGH_SCORE_KEY, "120").unwrap();
        let ledger = PointsLedger::load(store);
        assert_eq!(ledger.points(), 40);
        assert_eq!(ledger.high_score(), 120);
    }

    #[test]
    fn test_load_ignores_garbage() {
        let mut store = MemoryStore::new();
        store.set(POINTS_KEY, "lots").unwrap();
        store.set(HIGH_SCORE_KEY, "70").unwrap();
        let ledger = PointsLedger::load(store);
        assert_eq!(ledger.points(), 0);
        assert_eq!(ledger.high_score(), 70);
    }

    #[test]
    fn test_add_points_persists() {
        let mut ledger = PointsLedger::load(MemoryStore::new());
        assert_eq!(ledger.add_points(3), 30);
        assert_eq!(ledger.points(), 30);
        assert_eq!(ledger.high_score(), 30);
        assert!(ledger.is_new_high_score());

        let store = ledger.store();
        assert_eq!(store.get(POINTS_KEY).unwrap().as_deref(), Some("30"));
        assert_eq!(store.get(HIGH_SCORE_KEY).unwrap().as_deref(), Some("30"));
    }

    #[test]
    fn test_zero_correct_earns_nothing() {
        let mut ledger = PointsLedger::load(MemoryStore::new());
        assert_eq!(ledger.add_points(0), 0);
        assert_eq!(ledger.points(), 0);
    }

    #[test]
    fn test_reset_keeps_high_score() {
        let mut ledger = PointsLedger::load(MemoryStore::new());
        ledger.add_points(5);
        ledger.reset();
        assert_eq!(ledger.points(), 0);
        assert_eq!(ledger.high_score(), 50);

        // Climbing back below the old record leaves it alone
        ledger.add_points(2);
        assert_eq!(ledger.high_score(), 50);
        assert!(!ledger.is_new_high_score());
        assert_eq!(ledger.store().get(POINTS_KEY).unwrap().as_deref(), Some("20"));
    }

    #[test]
    fn test_write_failures_are_swallowed() {
        let mut ledger = PointsLedger::load(ReadOnlyStore::default());
        assert_eq!(ledger.add_points(2), 20);
        assert_eq!(ledger.points(), 20);
        assert_eq!(ledger.high_score(), 20);
        ledger.reset();
        assert_eq!(ledger.points(), 0);
        assert_eq!(ledger.high_score(), 20);
    }

    proptest! {
        #[test]
        fn prop_high_score_tracks_max(
            start_high in 0u64..500,
            ops in prop::collection::vec(prop::option::of(0usize..8), 0..40),
        ) {
            let mut store = MemoryStore::new();
            store.set(HIGH_SCORE_KEY, &start_high.to_string()).unwrap();
            let mut ledger = PointsLedger::load(store);

            for op in ops {
                let prev_points = ledger.points();
                let prev_high = ledger.high_score();
                match op {
                    Some(correct) => {
                        let earned = ledger.add_points(correct);
                        prop_assert_eq!(earned, correct as u64 * POINTS_PER_MATCH);
                        prop_assert!(ledger.points() >= prev_points);
                        prop_assert_eq!(ledger.high_score(), prev_high.max(ledger.points()));
                    }
                    None => {
                        ledger.reset();
                        prop_assert_eq!(ledger.points(), 0);
                        prop_assert_eq!(ledger.high_score(), prev_high);
                    }
                }
            }
        }
    }
}
