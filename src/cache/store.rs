//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with a priority queue keyed by
//! a logical clock, giving least-recently-used eviction in O(log n).

use std::collections::HashMap;
use std::hash::Hash;

use tracing::debug;

use crate::cache::{CacheStats, PriorityQueue};
use crate::config::Config;
use crate::error::{CacheError, Result};

// == LRU Cache ==
/// Capacity-bounded key-value store with least-recently-used eviction.
///
/// Every key in `entries` has exactly one live entry in `queue`, whose
/// priority is the clock value of the key's last access. Each public
/// operation updates both structures before returning.
#[derive(Debug)]
pub struct LruCache<K, V> {
    /// Key-value storage
    entries: HashMap<K, V>,
    /// Recency order, lowest priority is evicted first
    queue: PriorityQueue<K, u64>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Logical clock, advanced on every recency-affecting access
    clock: u64,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// A zero capacity is rejected with [`CacheError::InvalidCapacity`].
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_queue(capacity, PriorityQueue::new())
    }

    /// Creates an empty cache from configuration, enabling automatic queue
    /// compaction when `compaction_factor` is non-zero.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Self::with_queue(
            config.capacity,
            PriorityQueue::with_compaction_factor(config.compaction_factor),
        )
    }

    fn with_queue(capacity: usize, queue: PriorityQueue<K, u64>) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }
        Ok(Self {
            entries: HashMap::with_capacity(capacity.min(1024)),
            queue,
            stats: CacheStats::new(),
            capacity,
            clock: 0,
        })
    }

    // == Get ==
    /// Retrieves a value by key and marks the key as most recently used.
    pub fn get(&mut self, key: &K) -> Result<&V> {
        if !self.entries.contains_key(key) {
            self.stats.record_miss();
            return Err(CacheError::NotFound);
        }
        let now = self.tick();
        self.queue.reprioritize(now, key)?;
        self.stats.record_hit();
        self.entries.get(key).ok_or(CacheError::NotFound)
    }

    // == Set ==
    /// Stores a key-value pair and marks the key as most recently used.
    ///
    /// Overwriting a present key never evicts. Inserting a new key into a
    /// full cache evicts the least recently used entry first.
    pub fn set(&mut self, key: K, value: V) -> Result<()> {
        let now = self.tick();

        if self.entries.contains_key(&key) {
            self.queue.reprioritize(now, &key)?;
            self.entries.insert(key, value);
            return Ok(());
        }

        self.evict_down_to(self.capacity.saturating_sub(1))?;
        self.queue.insert(now, key.clone());
        self.entries.insert(key, value);
        Ok(())
    }

    // == Get Or Insert ==
    /// Returns the value for `key`, storing `default()` first if absent.
    ///
    /// The key is marked as most recently used either way.
    pub fn get_or_insert_with<F>(&mut self, key: K, default: F) -> Result<&V>
    where
        F: FnOnce() -> V,
    {
        if self.entries.contains_key(&key) {
            return self.get(&key);
        }
        self.stats.record_miss();
        self.set(key.clone(), default())?;
        self.entries.get(&key).ok_or(CacheError::NotFound)
    }

    // == Delete ==
    /// Removes an entry by key, returning its value.
    pub fn delete(&mut self, key: &K) -> Result<V> {
        let value = self.entries.remove(key).ok_or(CacheError::NotFound)?;
        self.queue.delete(key)?;
        Ok(value)
    }

    // == Non-refreshing Lookups ==
    /// Checks for a key without touching its recency.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Reads a value without touching its recency.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// Returns the entry that the next eviction would remove.
    pub fn peek_lru(&mut self) -> Option<(&K, &V)> {
        let (key, _) = self.queue.peek_min()?;
        self.entries.get_key_value(key)
    }

    /// Iterates over keys in arbitrary order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    /// Iterates over entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter()
    }

    // == Capacity ==
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Changes the capacity, evicting least recently used entries when
    /// shrinking. Returns the number of entries evicted.
    pub fn resize(&mut self, capacity: usize) -> Result<usize> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }
        let previous = self.capacity;
        self.capacity = capacity;
        let evicted = self.evict_down_to(capacity)?;
        debug!(previous, capacity, evicted, "resized cache");
        Ok(evicted)
    }

    // == Maintenance ==
    /// Drops invalidated entries from the recency queue.
    ///
    /// Returns the number of entries dropped.
    pub fn compact(&mut self) -> usize {
        self.queue.compact()
    }

    /// Removes every entry. Statistics and the clock are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.queue.clear();
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_sizes(self.entries.len(), self.queue.heap_len());
        stats.compactions = self.queue.compactions();
        stats
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn evict_down_to(&mut self, limit: usize) -> Result<usize> {
        let mut evicted = 0;
        while self.entries.len() > limit {
            let victim = self.queue.extract_min()?;
            self.entries.remove(&victim);
            self.stats.record_eviction();
            evicted += 1;
        }
        if evicted > 0 {
            debug!(evicted, limit, "evicted least recently used entries");
        }
        Ok(evicted)
    }

    #[cfg(test)]
    pub(crate) fn debug_validate_invariants(&self) {
        assert!(self.entries.len() <= self.capacity);
        assert_eq!(self.entries.len(), self.queue.len());
        for key in self.entries.keys() {
            assert!(self.queue.contains(key), "cached key missing from queue");
        }
        self.queue.debug_validate_invariants();
    }
}
