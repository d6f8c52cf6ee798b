//! Best-score persistence gateway
//!
//! The backing store is a swappable string key-value surface so hosts can
//! plug in whatever storage they have. Absence of a store is tolerated:
//! reads yield 0 and writes are no-ops. Malformed persisted data is
//! treated as absent rather than an error.

/// Key the best score is persisted under.
pub const BEST_SCORE_KEY: &str = "mole-rush.bestScore";

/// Minimal string key-value store a host can back with anything.
pub trait ScoreStore {
    /// Read the value stored under `key`, if any.
    fn get_item(&self, key: &str) -> Option<String>;
    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: &str);
}

/// In-memory store, used by the demo driver and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: std::collections::HashMap<String, String>,
}

impl ScoreStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        let _ = self.entries.insert(key.to_string(), value.to_string());
    }
}

/// Read the persisted best score. Missing store, missing key, or text
/// that does not parse to a non-negative integer all yield 0.
pub fn read_best_score(store: Option<&dyn ScoreStore>) -> u32 {
    let Some(store) = store else {
        return 0;
    };
    store
        .get_item(BEST_SCORE_KEY)
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .filter(|value| *value >= 0)
        .map(|value| value.min(u32::MAX as i64) as u32)
        .unwrap_or(0)
}

/// Persist a best score. Negative or non-finite inputs are clamped to 0
/// before writing; a missing store makes this a no-op.
pub fn write_best_score(store: Option<&mut (dyn ScoreStore + 'static)>, score: f64) {
    let Some(store) = store else {
        return;
    };
    let safe_score = if score.is_finite() { score.floor().max(0.0) } else { 0.0 };
    store.set_item(BEST_SCORE_KEY, &format!("{}", safe_score as u64));
    log::info!("Best score saved: {}", safe_score as u64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_without_store_yields_zero() {
        assert_eq!(read_best_score(None), 0);
    }

    #[test]
    fn test_write_without_store_is_noop() {
        write_best_score(None, 12.0);
    }

    #[test]
    fn test_round_trip() {
        let mut store = MemoryStore::default();
        write_best_score(Some(&mut store), 17.0);
        assert_eq!(store.get_item(BEST_SCORE_KEY).as_deref(), Some("17"));
        assert_eq!(read_best_score(Some(&store)), 17);
    }

    #[test]
    fn test_write_clamps_bad_input() {
        let mut store = MemoryStore::default();
        write_best_score(Some(&mut store), -5.0);
        assert_eq!(read_best_score(Some(&store)), 0);

        write_best_score(Some(&mut store), f64::NAN);
        assert_eq!(read_best_score(Some(&store)), 0);

        write_best_score(Some(&mut store), 9.7);
        assert_eq!(read_best_score(Some(&store)), 9);
    }

    #[test]
    fn test_read_tolerates_malformed_text() {
        let mut store = MemoryStore::default();
        store.set_item(BEST_SCORE_KEY, "not a number");
        assert_eq!(read_best_score(Some(&store)), 0);

        store.set_item(BEST_SCORE_KEY, "-3");
        assert_eq!(read_best_score(Some(&store)), 0);

        store.set_item(BEST_SCORE_KEY, " 42 ");
        assert_eq!(read_best_score(Some(&store)), 42);
    }
}
