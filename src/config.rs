//! Configuration Module
//!
//! Handles loading and validating cache configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::cache::queue::MIN_COMPACTION_FACTOR;
use crate::error::{CacheError, Result};

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// Compact the queue once its physical size exceeds this multiple of the
    /// live entry count. Zero disables automatic compaction.
    pub compaction_factor: usize,
    /// Background compaction task interval in seconds
    pub compaction_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 1000)
    /// - `COMPACTION_FACTOR` - Stale-to-live ratio that triggers compaction (default: 4)
    /// - `COMPACTION_INTERVAL` - Background compaction frequency in seconds (default: 5)
    ///
    /// Unset variables fall back to their defaults; set but unparseable ones
    /// are reported as [`CacheError::InvalidConfig`].
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            capacity: env_or("CACHE_CAPACITY", defaults.capacity)?,
            compaction_factor: env_or("COMPACTION_FACTOR", defaults.compaction_factor)?,
            compaction_interval: env_or("COMPACTION_INTERVAL", defaults.compaction_interval)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects a zero capacity, a compaction factor of 1 and a zero
    /// compaction interval.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(CacheError::InvalidCapacity(self.capacity));
        }
        if self.compaction_factor != 0 && self.compaction_factor < MIN_COMPACTION_FACTOR {
            return Err(CacheError::InvalidConfig(format!(
                "COMPACTION_FACTOR must be 0 or at least {}, got {}",
                MIN_COMPACTION_FACTOR, self.compaction_factor
            )));
        }
        if self.compaction_interval == 0 {
            return Err(CacheError::InvalidConfig(
                "COMPACTION_INTERVAL must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 1000,
            compaction_factor: 4,
            compaction_interval: 5,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| CacheError::InvalidConfig(format!("{}={}", name, raw))),
        Err(_) => Ok(default),
    }
}
