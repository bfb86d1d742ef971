//! Recency Cache - A capacity-bounded in-memory LRU cache
//!
//! Evictions are found through a min-priority queue keyed by a logical
//! clock, with lazy invalidation and optional compaction of stale entries.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{CacheStats, LruCache, PriorityQueue, SharedCache};
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::spawn_compaction_task;
