//! Best score record
//!
//! A single integer persisted under a fixed key. Stored values that do not
//! parse as a non-negative integer are treated as zero.

use crate::persistence::KeyValueStore;

/// Persisted best score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BestScore {
    value: u64,
}

impl BestScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "neon-glide-best";

    pub fn new(value: u64) -> Self {
        Self { value }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    /// Check if a finished run beats the record
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.value
    }

    /// Read the record from a store
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let Some(raw) = store.get(Self::STORAGE_KEY) else {
            log::info!("No best score found, starting fresh");
            return Self::default();
        };

        let value = parse_stored(&raw).unwrap_or_else(|| {
            log::warn!("Ignoring invalid stored best score {raw:?}");
            0
        });
        log::info!("Loaded best score {value}");
        Self { value }
    }

    /// Record a finished run. Writes through to the store only when the
    /// record is raised; returns whether it was.
    pub fn record(&mut self, score: u64, store: &mut dyn KeyValueStore) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.value = score;
        if let Err(e) = store.set(Self::STORAGE_KEY, &score.to_string()) {
            log::warn!("Best score not saved: {e}");
        } else {
            log::info!("Best score saved ({score})");
        }
        true
    }
}

/// Parse a stored score. Floats ("12.0") are floored; negative or
/// non-finite values are rejected.
fn parse_stored(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Ok(v) = raw.parse::<u64>() {
        return Some(v);
    }
    let v = raw.parse::<f64>().ok()?;
    (v.is_finite() && v >= 0.0).then(|| v.floor() as u64)
}
