//! Queue Entry Module
//!
//! Defines the heap entries ordered by the priority queue.

use std::cmp::Ordering;

// == Queue Entry ==
/// A single heap entry: a key at a given priority.
///
/// Entries are never mutated after creation. An entry is live only while the
/// queue's index still points at its `sequence`; otherwise it is invalidated
/// and gets discarded when it reaches the top of the heap.
#[derive(Debug, Clone)]
pub struct QueueEntry<K, P> {
    /// Ordering key, lower pops first
    pub priority: P,
    /// Unique creation counter, breaks priority ties in FIFO order
    pub sequence: u64,
    /// The key this entry orders
    pub key: K,
}

impl<K, P> QueueEntry<K, P> {
    // == Constructor ==
    pub fn new(priority: P, sequence: u64, key: K) -> Self {
        Self {
            priority,
            sequence,
            key,
        }
    }
}

// Sequences are unique, so (priority, sequence) identifies an entry and the
// key never takes part in the ordering.
impl<K, P: Ord> PartialEq for QueueEntry<K, P> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.sequence == other.sequence
    }
}

impl<K, P: Ord> Eq for QueueEntry<K, P> {}

impl<K, P: Ord> PartialOrd for QueueEntry<K, P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K, P: Ord> Ord for QueueEntry<K, P> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

// == Index Slot ==
/// The index's record of a key's live entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveSlot<P> {
    pub priority: P,
    pub sequence: u64,
}
