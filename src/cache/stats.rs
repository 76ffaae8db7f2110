//! Cache Statistics Module
//!
//! Tracks lookup outcomes, evictions and byte usage.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of cache counters and occupancy.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of successful `get` calls
    pub hits: u64,
    /// Number of `get` calls on absent keys
    pub misses: u64,
    /// Entries dropped to fit the byte budget (explicit deletes excluded)
    pub evictions: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
    /// Bytes charged by live entries
    pub current_size: usize,
    /// Configured byte budget
    pub max_size: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new(max_size: usize) -> Self {
        Self {
            max_size,
            ..Self::default()
        }
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Update Occupancy ==
    /// Refreshes entry count and byte usage.
    pub fn set_occupancy(&mut self, total_entries: usize, current_size: usize) {
        self.total_entries = total_entries;
        self.current_size = current_size;
    }
}
