//! Expired Entry Sweep
//!
//! Background task that periodically removes expired entries from every
//! domain cache. Reads enforce expiry on their own; the sweep only releases
//! memory held by entries nobody reads again.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::registry::CacheRegistry;

/// Spawns a background task that periodically sweeps expired cache entries.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between sweeps. Each cache is locked only while it is being swept.
///
/// # Arguments
/// * `registry` - The domain caches to sweep
/// * `cleanup_interval_secs` - Interval in seconds between sweeps (at least 1)
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let registry = CacheRegistry::default();
/// let cleanup_handle = spawn_cleanup_task(registry.clone(), 300);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(registry: CacheRegistry, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting cache sweep task with interval of {} seconds",
            cleanup_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed: usize = registry
                .cleanup_all()
                .await
                .into_iter()
                .map(|(_, count)| count)
                .sum();

            if removed > 0 {
                info!("Cache sweep: removed {} expired entries", removed);
            } else {
                debug!("Cache sweep: no expired entries found");
            }
        }
    })
}
