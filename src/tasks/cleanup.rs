//! Expired Entry Sweep
//!
//! Optional background task that drops stale responses even when nobody
//! reads them again. Reads already evict lazily; this only bounds memory.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;

/// Spawns a task that sweeps expired entries every `interval_secs`.
///
/// Abort the returned handle to stop it.
pub fn spawn_cleanup_task(cache: SharedCache, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(interval_secs, "starting cache sweep task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.write().await.cleanup_expired();
            if removed > 0 {
                info!(removed, "cache sweep removed expired entries");
            } else {
                debug!("cache sweep found no expired entries");
            }
        }
    })
}
