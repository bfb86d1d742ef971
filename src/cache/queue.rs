//! Priority Queue Module
//!
//! Min-priority queue with lazy invalidation, used to find eviction victims.
//!
//! Entries live in a `BinaryHeap` that cannot drop arbitrary elements, so
//! deletion and reprioritization only update the index. Heap entries the
//! index no longer points at are invalidated and skipped when popped.
//!
//! | Operation      | Complexity          |
//! |----------------|---------------------|
//! | `insert`       | O(log n)            |
//! | `extract_min`  | amortized O(log n)  |
//! | `delete`       | O(1)                |
//! | `reprioritize` | O(log n)            |
//! | `compact`      | O(n)                |
//!
//! Without compaction the heap grows by one entry per reprioritization until
//! stale entries are popped. A queue built with a non-zero compaction factor
//! rebuilds itself once the heap outgrows that multiple of its live entries.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;

use tracing::debug;

use crate::cache::entry::{LiveSlot, QueueEntry};
use crate::error::{CacheError, Result};

/// Heaps smaller than this are never compacted automatically.
pub const MIN_COMPACTION_LEN: usize = 64;

/// Smallest non-zero compaction factor. With a factor of 1 a single stale
/// entry would trigger a full rebuild on every operation.
pub const MIN_COMPACTION_FACTOR: usize = 2;

// == Priority Queue ==
/// Min-priority queue over keys with O(1) deletion and O(log n) reprioritize.
#[derive(Debug)]
pub struct PriorityQueue<K, P> {
    /// Backing heap, may hold invalidated entries
    heap: BinaryHeap<Reverse<QueueEntry<K, P>>>,
    /// Key to live entry
    index: HashMap<K, LiveSlot<P>>,
    /// Next sequence number
    next_sequence: u64,
    /// Stale-to-live ratio that triggers compaction, 0 = never
    compaction_factor: usize,
    /// Completed compactions, automatic and explicit
    compactions: u64,
}

impl<K, P> PriorityQueue<K, P>
where
    K: Eq + Hash + Clone,
    P: Ord + Clone,
{
    // == Constructor ==
    /// Creates an empty queue that never compacts on its own.
    pub fn new() -> Self {
        Self::with_compaction_factor(0)
    }

    /// Creates an empty queue that compacts once `heap_len() > factor * len()`.
    ///
    /// Non-zero factors below [`MIN_COMPACTION_FACTOR`] are raised to it.
    pub fn with_compaction_factor(factor: usize) -> Self {
        let compaction_factor = if factor == 0 {
            0
        } else {
            factor.max(MIN_COMPACTION_FACTOR)
        };
        Self {
            heap: BinaryHeap::new(),
            index: HashMap::new(),
            next_sequence: 1,
            compaction_factor,
            compactions: 0,
        }
    }

    // == Insert ==
    /// Adds `key` at `priority`.
    ///
    /// Inserting a key that already has a live entry replaces it: the old
    /// entry is invalidated and the new one becomes live.
    pub fn insert(&mut self, priority: P, key: K) {
        let sequence = self.push_entry(priority.clone(), key.clone());
        let replaced = self.index.insert(key, LiveSlot { priority, sequence });
        if replaced.is_some() {
            self.maybe_compact();
        }
    }

    // == Extract Min ==
    /// Removes and returns the live key with the lowest priority.
    pub fn extract_min(&mut self) -> Result<K> {
        while let Some(Reverse(entry)) = self.heap.pop() {
            if self.is_live(&entry) {
                self.index.remove(&entry.key);
                return Ok(entry.key);
            }
        }
        Err(CacheError::Empty)
    }

    // == Peek Min ==
    /// Returns the live minimum without removing it.
    ///
    /// Invalidated entries sitting above it are discarded along the way.
    pub fn peek_min(&mut self) -> Option<(&K, &P)> {
        while let Some(Reverse(top)) = self.heap.peek() {
            if self.is_live(top) {
                break;
            }
            self.heap.pop();
        }
        self.heap
            .peek()
            .map(|Reverse(entry)| (&entry.key, &entry.priority))
    }

    // == Delete ==
    /// Invalidates the live entry for `key`.
    pub fn delete(&mut self, key: &K) -> Result<()> {
        self.index.remove(key).ok_or(CacheError::NotFound)?;
        self.maybe_compact();
        Ok(())
    }

    // == Reprioritize ==
    /// Moves `key` to `priority`.
    ///
    /// The index slot is rewritten in place, so the key stays indexed for the
    /// whole operation.
    pub fn reprioritize(&mut self, priority: P, key: &K) -> Result<()> {
        if !self.index.contains_key(key) {
            return Err(CacheError::NotFound);
        }
        let sequence = self.push_entry(priority.clone(), key.clone());
        if let Some(slot) = self.index.get_mut(key) {
            *slot = LiveSlot { priority, sequence };
        }
        self.maybe_compact();
        Ok(())
    }

    // == Lookups ==
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the live priority of `key`.
    pub fn priority_of(&self, key: &K) -> Option<&P> {
        self.index.get(key).map(|slot| &slot.priority)
    }

    // == Length ==
    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the physical heap size, invalidated entries included.
    pub fn heap_len(&self) -> usize {
        self.heap.len()
    }

    /// Returns the number of invalidated entries still in the heap.
    pub fn stale_len(&self) -> usize {
        self.heap.len() - self.index.len()
    }

    // == Compaction ==
    /// Drops every invalidated entry and rebuilds the heap.
    ///
    /// Returns the number of entries dropped.
    pub fn compact(&mut self) -> usize {
        let before = self.heap.len();
        let entries = std::mem::take(&mut self.heap).into_vec();
        let live: Vec<_> = entries
            .into_iter()
            .filter(|Reverse(entry)| self.is_live(entry))
            .collect();
        self.heap = BinaryHeap::from(live);
        self.compactions += 1;
        let dropped = before - self.heap.len();
        if dropped > 0 {
            debug!(dropped, live = self.heap.len(), "compacted priority queue");
        }
        dropped
    }

    fn maybe_compact(&mut self) {
        if self.compaction_factor == 0 || self.heap.len() < MIN_COMPACTION_LEN {
            return;
        }
        if self.heap.len() > self.index.len().saturating_mul(self.compaction_factor) {
            self.compact();
        }
    }

    /// Returns how many compactions have run, automatic ones included.
    pub fn compactions(&self) -> u64 {
        self.compactions
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.heap.clear();
        self.index.clear();
    }

    fn is_live(&self, entry: &QueueEntry<K, P>) -> bool {
        self.index
            .get(&entry.key)
            .is_some_and(|slot| slot.sequence == entry.sequence)
    }

    fn push_entry(&mut self, priority: P, key: K) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(Reverse(QueueEntry::new(priority, sequence, key)));
        sequence
    }

    #[cfg(test)]
    pub(crate) fn debug_validate_invariants(&self) {
        let live = self
            .heap
            .iter()
            .filter(|Reverse(entry)| self.is_live(entry))
            .count();
        assert_eq!(live, self.index.len(), "every indexed key has one live entry");
        assert!(self.heap.len() >= self.index.len());
    }
}

impl<K, P> Default for PriorityQueue<K, P>
where
    K: Eq + Hash + Clone,
    P: Ord + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
