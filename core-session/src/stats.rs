//! Session statistics accumulator.

use std::fmt::Write as _;

use core_cache::CacheOutcome;
use serde::{Deserialize, Serialize};

/// Mutable counter bag threaded through the orchestration call chain.
///
/// Owned by the session and passed by `&mut` into each phase; no component
/// keeps its own copy and no global state exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Tracks attempted, regardless of success.
    pub tracks_processed: u64,
    /// Cache lookups answered from an occupied slot.
    pub cache_hits: u64,
    /// Cache admissions that required cloning (with or without eviction).
    pub cache_misses: u64,
    /// Cache misses that also evicted an occupied slot.
    pub cache_evictions: u64,
    /// Tracks installed on deck 0.
    pub deck_a_loads: u64,
    /// Tracks installed on deck 1.
    pub deck_b_loads: u64,
    /// Successful track transfers onto either deck.
    pub transitions: u64,
    /// Failures at any stage: library lookup, cache access, clone failures,
    /// deck loading.
    pub errors: u64,
}

impl SessionStats {
    /// Resets every counter to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Folds a cache admission outcome into the counters.
    ///
    /// A miss with eviction increments both the miss and eviction counters.
    /// A clone failure counts as a miss and as an error.
    pub fn record_cache_outcome(&mut self, outcome: CacheOutcome) {
        match outcome {
            CacheOutcome::Hit => self.cache_hits += 1,
            CacheOutcome::Admitted { evicted } => {
                self.cache_misses += 1;
                if evicted {
                    self.cache_evictions += 1;
                }
            }
            CacheOutcome::CloneFailed => {
                self.cache_misses += 1;
                self.errors += 1;
            }
        }
    }

    /// Records a successful transfer onto the given deck.
    pub fn record_deck_load(&mut self, deck: usize) {
        self.transitions += 1;
        if deck == 0 {
            self.deck_a_loads += 1;
        } else {
            self.deck_b_loads += 1;
        }
    }

    /// Cache hit rate over all lookups, as a percentage.
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.cache_hits + self.cache_misses;
        if lookups == 0 {
            return 0.0;
        }
        self.cache_hits as f64 / lookups as f64 * 100.0
    }

    /// Renders the session summary block.
    pub fn summary(&self, session_name: &str) -> String {
        let mut out = format!(
            "session summary for '{}' at {}",
            session_name,
            chrono::Utc::now().to_rfc3339()
        );
        let _ = write!(out, "\n  tracks processed: {}", self.tracks_processed);
        let _ = write!(out, "\n  cache hits: {}", self.cache_hits);
        let _ = write!(out, "\n  cache misses: {}", self.cache_misses);
        let _ = write!(out, "\n  cache evictions: {}", self.cache_evictions);
        let _ = write!(out, "\n  deck A loads: {}", self.deck_a_loads);
        let _ = write!(out, "\n  deck B loads: {}", self.deck_b_loads);
        let _ = write!(out, "\n  transitions: {}", self.transitions);
        let _ = write!(out, "\n  errors: {}", self.errors);
        let _ = write!(out, "\n  hit rate: {:.1}%", self.hit_rate());
        out
    }
}
