//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, evictions and
//! queue compactions.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of successful lookups
    pub hits: u64,
    /// Number of lookups for absent keys
    pub misses: u64,
    /// Number of entries evicted to stay within capacity
    pub evictions: u64,
    /// Number of queue compactions, automatic and explicit
    pub compactions: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
    /// Physical size of the priority queue, invalidated entries included
    pub heap_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Invalidated queue entries awaiting removal.
    pub fn stale_entries(&self) -> usize {
        self.heap_entries.saturating_sub(self.total_entries)
    }

    // == Recorders ==
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Update Sizes ==
    /// Updates the entry and heap counts.
    pub fn set_sizes(&mut self, total_entries: usize, heap_entries: usize) {
        self.total_entries = total_entries;
        self.heap_entries = heap_entries;
    }
}
