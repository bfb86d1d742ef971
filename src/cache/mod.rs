//! Cache Module
//!
//! Provides an in-memory LRU cache whose recency order is kept in a lazily
//! invalidated priority queue.

mod entry;
pub mod queue;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use queue::PriorityQueue;
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::LruCache;
