//! Shared Cache Module
//!
//! Thread-safe handle around [`LruCache`].
//!
//! A `get` refreshes recency, so it mutates both the map and the queue and
//! takes the same exclusive lock as `set` and `delete`. The lock is held for
//! the whole operation; nothing inside it blocks or awaits.

use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::cache::{CacheStats, LruCache};
use crate::config::Config;
use crate::error::Result;

// == Shared Cache ==
/// Cloneable, thread-safe LRU cache handle.
#[derive(Debug)]
pub struct SharedCache<K, V> {
    inner: Arc<Mutex<LruCache<K, V>>>,
}

impl<K, V> Clone for SharedCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> SharedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a shared cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Result<Self> {
        LruCache::new(capacity).map(Self::from_cache)
    }

    /// Creates a shared cache from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        LruCache::from_config(config).map(Self::from_cache)
    }

    /// Wraps an existing cache.
    pub fn from_cache(cache: LruCache<K, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    /// Retrieves a copy of the value and marks the key as most recently used.
    pub fn get(&self, key: &K) -> Result<V>
    where
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    pub fn set(&self, key: K, value: V) -> Result<()> {
        self.inner.lock().set(key, value)
    }

    pub fn delete(&self, key: &K) -> Result<V> {
        self.inner.lock().delete(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn resize(&self, capacity: usize) -> Result<usize> {
        self.inner.lock().resize(capacity)
    }

    pub fn compact(&self) -> usize {
        self.inner.lock().compact()
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    /// Runs `f` with the cache locked, for sequences of operations that must
    /// not interleave with other callers.
    pub fn with_lock<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut LruCache<K, V>) -> R,
    {
        f(&mut self.inner.lock())
    }
}
