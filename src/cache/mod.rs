//! Cache Module
//!
//! In-memory key/value cache with per-entry expiration and lazy eviction.
//! An optional capacity bound evicts the least recently used entry.

mod clock;
mod entry;
mod key;
mod lru;
mod stats;
mod store;


use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use key::CacheKey;
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::ExpiringCache;

// == Public Constants ==
/// TTL applied when the caller does not pick one (5 minutes)
pub const DEFAULT_TTL: Duration = Duration::from_millis(300_000);

/// Cache of JSON responses shared between async tasks.
pub type SharedCache = Arc<RwLock<ExpiringCache<serde_json::Value>>>;

/// Wraps a cache for sharing between the client, handlers and sweeper.
pub fn shared(cache: ExpiringCache<serde_json::Value>) -> SharedCache {
    Arc::new(RwLock::new(cache))
}
