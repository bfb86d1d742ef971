//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache and its priority queue.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key has no live entry
    #[error("Key not found")]
    NotFound,

    /// Queue holds no live entries
    #[error("Queue is empty")]
    Empty,

    /// Capacity must be at least one entry
    #[error("Invalid capacity: {0}")]
    InvalidCapacity(usize),

    /// Configuration value could not be parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
