//! Cache Store Module
//!
//! `ExpiringCache` keeps values under string keys until their deadline
//! passes. Stale entries are dropped lazily when read; there is no
//! background expiry unless a caller runs `cleanup_expired`.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::cache::clock::duration_to_ms;
use crate::cache::{CacheEntry, CacheStats, Clock, LruTracker, SystemClock, DEFAULT_TTL};

// == Expiring Cache ==
/// Key/value store with per-entry expiration.
#[derive(Debug)]
pub struct ExpiringCache<T, C = SystemClock> {
    entries: HashMap<String, CacheEntry<T>>,
    lru: LruTracker,
    stats: CacheStats,
    /// None = unbounded
    max_entries: Option<usize>,
    default_ttl: Duration,
    /// Bumped by every explicit removal
    generation: u64,
    clock: C,
}

impl<T> ExpiringCache<T> {
    /// Creates an unbounded cache on wall-clock time with a five minute
    /// default TTL.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<T> Default for ExpiringCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Clock> ExpiringCache<T, C> {
    // == Constructors ==
    pub fn with_clock(clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries: None,
            default_ttl: DEFAULT_TTL,
            generation: 0,
            clock,
        }
    }

    /// Sets the TTL used by [`set`](Self::set).
    pub fn default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Bounds the number of entries. Zero means unbounded.
    pub fn max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = (max_entries > 0).then_some(max_entries);
        self
    }

    // == Set ==
    /// Stores `value` with the default TTL, replacing any prior entry.
    pub fn set(&mut self, key: impl Into<String>, value: T) {
        let ttl = self.default_ttl;
        self.set_with_ttl(key, value, ttl);
    }

    /// Stores `value` until `ttl` from now, replacing any prior entry and
    /// its deadline.
    pub fn set_with_ttl(&mut self, key: impl Into<String>, value: T, ttl: Duration) {
        let key = key.into();

        if !self.entries.contains_key(&key) {
            self.make_room();
        }

        let entry = CacheEntry::new(value, self.clock.now_ms(), duration_to_ms(ttl));
        if self.max_entries.is_some() {
            self.lru.touch(&key);
        }
        self.entries.insert(key, entry);
    }

    // == Get ==
    /// Returns the live value for `key`.
    ///
    /// A stale entry is removed and reported as a miss. The deadline
    /// millisecond itself is already stale, see [`CacheEntry::is_expired`].
    pub fn get(&mut self, key: &str) -> Option<&T> {
        let now = self.clock.now_ms();

        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(now),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            debug!(key, "dropping stale cache entry");
            self.drop_entry(key);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            return None;
        }

        self.stats.record_hit();
        if self.max_entries.is_some() {
            self.lru.touch(key);
        }
        self.entries.get(key).map(|entry| &entry.value)
    }

    // == Remove ==
    /// Removes the entry for `key`, if any.
    pub fn remove(&mut self, key: &str) {
        self.drop_entry(key);
        self.generation += 1;
    }

    /// Removes every entry whose key starts with `prefix`.
    ///
    /// Returns the number of entries removed.
    pub fn remove_prefix(&mut self, prefix: &str) -> usize {
        let keys: Vec<String> = self
            .entries
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect();

        for key in &keys {
            self.drop_entry(key);
        }
        self.generation += 1;
        keys.len()
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.generation += 1;
    }

    /// Counter bumped by `remove`, `remove_prefix` and `clear`, even when
    /// nothing matched.
    ///
    /// A writer that read a value from elsewhere can compare generations
    /// before and after to tell whether an invalidation ran in between.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    // == Cleanup Expired ==
    /// Removes every stale entry. Returns the number removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.drop_entry(key);
        }
        self.stats.record_expirations(expired.len());
        expired.len()
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            total_entries: self.entries.len(),
            ..self.stats.clone()
        }
    }

    /// Number of stored entries, including stale ones not yet read.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Makes space for one new key under the bound. Stale entries go
    /// first; live ones are evicted least recently used only if still full.
    fn make_room(&mut self) {
        let Some(max) = self.max_entries else {
            return;
        };

        if self.entries.len() >= max {
            self.cleanup_expired();
        }

        while self.entries.len() >= max {
            match self.lru.evict_oldest() {
                Some(key) => {
                    debug!(key = %key, "evicting least recently used cache entry");
                    self.entries.remove(&key);
                    self.stats.record_eviction();
                }
                None => break,
            }
        }
    }

    fn drop_entry(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.lru.remove(key);
        }
    }
}
