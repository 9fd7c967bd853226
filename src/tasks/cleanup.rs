//! Expired Entry Sweep Task
//!
//! Optional background task for the inspection server that periodically
//! removes expired and undecodable cache entries. The cache does not rely on
//! it: reads purge lazily and full media sweep on quota errors.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheService;

/// Spawns a background task that periodically sweeps expired cache entries.
///
/// # Arguments
/// * `cache` - Shared cache service
/// * `cleanup_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_cleanup_task(cache: Arc<CacheService>, cleanup_interval_secs: u64) -> JoinHandle<()> {
    spawn_cleanup_task_every(cache, Duration::from_secs(cleanup_interval_secs))
}

/// Same as [`spawn_cleanup_task`] with an arbitrary interval.
pub fn spawn_cleanup_task_every(cache: Arc<CacheService>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting expired entry sweep every {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.clean_expired();

            if removed > 0 {
                info!("Sweep: removed {} expired entries", removed);
            } else {
                debug!("Sweep: no expired entries found");
            }
        }
    })
}
