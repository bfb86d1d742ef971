//! Queue Compaction Task
//!
//! Background task that periodically drops invalidated entries from a shared
//! cache's recency queue.

use std::hash::Hash;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;

/// Spawns a background task that periodically compacts the cache's queue.
///
/// Useful when automatic compaction is disabled (`compaction_factor = 0`)
/// and reads dominate, since every `get` leaves an invalidated entry behind.
/// The lock is taken only for the compaction itself. An interval of zero is
/// treated as one second so the loop always yields between passes.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during shutdown.
///
/// # Example
/// ```ignore
/// let cache = SharedCache::new(1000)?;
/// let handle = spawn_compaction_task(cache.clone(), 5);
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_compaction_task<K, V>(
    cache: SharedCache<K, V>,
    interval_secs: u64,
) -> JoinHandle<()>
where
    K: Eq + Hash + Clone + Send + 'static,
    V: Send + 'static,
{
    let interval_secs = interval_secs.max(1);
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting queue compaction task with interval of {} seconds",
            interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let dropped = cache.compact();

            if dropped > 0 {
                info!("Queue compaction: dropped {} invalidated entries", dropped);
            } else {
                debug!("Queue compaction: no invalidated entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn uncompacted_cache() -> SharedCache<String, String> {
        let config = Config {
            capacity: 100,
            compaction_factor: 0,
            ..Config::default()
        };
        SharedCache::from_config(&config).unwrap()
    }

    #[tokio::test]
    async fn test_compaction_task_drops_stale_entries() {
        let cache = uncompacted_cache();
        let key = "hot".to_string();
        cache.set(key.clone(), "value".to_string()).unwrap();
        for _ in 0..50 {
            cache.get(&key).unwrap();
        }
        assert_eq!(cache.stats().stale_entries(), 50);

        let handle = spawn_compaction_task(cache.clone(), 1);

        tokio::time::sleep(Duration::from_millis(1500)).await;

        let stats = cache.stats();
        assert_eq!(stats.stale_entries(), 0);
        assert!(stats.compactions >= 1);
        assert_eq!(cache.get(&key), Ok("value".to_string()));

        handle.abort();
    }

    #[tokio::test]
    async fn test_compaction_task_preserves_entries() {
        let cache = uncompacted_cache();
        for i in 0..10 {
            cache.set(format!("key{}", i), format!("value{}", i)).unwrap();
        }

        let handle = spawn_compaction_task(cache.clone(), 1);

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(cache.len(), 10);
        assert_eq!(cache.get(&"key3".to_string()), Ok("value3".to_string()));

        handle.abort();
    }

    #[tokio::test]
    async fn test_compaction_task_zero_interval_waits_a_second() {
        let cache = uncompacted_cache();
        let key = "hot".to_string();
        cache.set(key.clone(), "value".to_string()).unwrap();
        cache.get(&key).unwrap();

        let handle = spawn_compaction_task(cache.clone(), 0);

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(cache.stats().compactions, 0);

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(cache.stats().compactions >= 1);
        assert_eq!(cache.stats().stale_entries(), 0);

        handle.abort();
    }

    #[tokio::test]
    async fn test_compaction_task_can_be_aborted() {
        let cache = uncompacted_cache();

        let handle = spawn_compaction_task(cache, 1);

        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
