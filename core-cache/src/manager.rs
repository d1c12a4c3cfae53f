//! Cache admission manager.
//!
//! Sits between callers holding library records and the slot cache: a hit
//! refreshes recency and leaves the stored record alone, while a miss
//! clones the source polymorphically, prepares the clone (load + beatgrid
//! analysis), and hands its ownership to the cache.

use core_tracks::Track;
use tracing::{debug, warn};

use crate::cache::SlotCache;

/// Outcome of admitting a record into the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    /// The record was already cached; its recency was refreshed and no
    /// clone was made.
    Hit,
    /// The record was cloned, prepared, and installed.
    Admitted {
        /// Whether an occupied slot was evicted to make room.
        evicted: bool,
    },
    /// The polymorphic clone produced no record; nothing was modified.
    /// Recoverable — the caller logs, counts, and skips the record.
    CloneFailed,
}

/// Admission front-end owning the slot cache.
#[derive(Debug)]
pub struct CacheManager {
    cache: SlotCache,
}

impl CacheManager {
    /// Creates a manager over a cache with `capacity` slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: SlotCache::new(capacity),
        }
    }

    /// Admits `source` into the cache, cloning and preparing it on a miss.
    pub fn admit(&mut self, source: &dyn Track) -> CacheOutcome {
        if self.cache.contains(source.title()) {
            self.cache.get(source.title());
            debug!(title = %source.title(), "cache hit");
            return CacheOutcome::Hit;
        }

        let mut clone = source.clone_track();
        let Ok(record) = clone.get_mut() else {
            warn!(title = %source.title(), "failed to clone track, skipping");
            return CacheOutcome::CloneFailed;
        };
        record.load();
        record.analyze_beatgrid();

        let evicted = self.cache.put(clone);
        debug!(title = %source.title(), evicted, "cache miss, record admitted");
        CacheOutcome::Admitted { evicted }
    }

    /// Looks up a cached record by title, refreshing its recency.
    pub fn lookup(&mut self, title: &str) -> Option<&dyn Track> {
        self.cache.get(title)
    }

    /// Returns `true` if a record with this title is cached.
    pub fn contains(&self, title: &str) -> bool {
        self.cache.contains(title)
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns `true` if no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Current slot count.
    pub fn capacity(&self) -> usize {
        self.cache.capacity()
    }

    /// Resizes the underlying slot array (shrink truncates by index).
    pub fn set_capacity(&mut self, capacity: usize) {
        self.cache.set_capacity(capacity);
    }

    /// Empties the cache.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Renders the underlying cache occupancy.
    pub fn status(&self) -> String {
        self.cache.status()
    }
}
