//! Fixed-capacity slot cache with least-recent-use eviction.

use std::fmt::Write as _;

use core_tracks::{BoxedTrack, Track};
use tracing::debug;

/// One cache cell: an optionally occupied owning handle plus the recency
/// stamp of its last access.
///
/// Invariant: an unoccupied slot owns no record.
#[derive(Debug, Default)]
pub struct Slot {
    record: BoxedTrack,
    last_access: u64,
}

impl Slot {
    /// Returns `true` if the slot currently owns a record.
    pub fn is_occupied(&self) -> bool {
        self.record.is_loaded()
    }

    /// Recency stamp of the slot's last access.
    pub fn last_access(&self) -> u64 {
        self.last_access
    }

    /// Borrows the stored record, if any.
    pub fn record(&self) -> Option<&dyn Track> {
        self.record.as_ref()
    }

    fn title_matches(&self, key: &str) -> bool {
        self.record.as_ref().is_some_and(|t| t.title() == key)
    }

    fn touch(&mut self, stamp: u64) {
        self.last_access = stamp;
    }

    fn store(&mut self, record: BoxedTrack, stamp: u64) {
        // assigning the handle destroys any previous occupant exactly once
        self.record = record;
        self.last_access = stamp;
    }

    fn clear(&mut self) {
        self.record.clear();
        self.last_access = 0;
    }
}

/// Ordered array of slots with a session-wide monotonic access counter.
///
/// Invariants: no two occupied slots share a title; the occupied-slot count
/// never exceeds the current capacity.
#[derive(Debug)]
pub struct SlotCache {
    slots: Vec<Slot>,
    access_counter: u64,
}

impl SlotCache {
    /// Creates a cache with `capacity` empty slots.
    pub fn new(capacity: usize) -> Self {
        let mut slots = Vec::new();
        slots.resize_with(capacity, Slot::default);
        Self {
            slots,
            access_counter: 0,
        }
    }

    /// Current number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_occupied()).count()
    }

    /// Returns `true` if no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| !s.is_occupied())
    }

    /// Returns `true` if an occupied slot stores a record with this title.
    pub fn contains(&self, title: &str) -> bool {
        self.find_slot(title).is_some()
    }

    /// Looks up a record by title.
    ///
    /// A match advances the session counter and refreshes the slot's
    /// recency before handing out a non-owning borrow. A miss is a normal
    /// negative result, not an error.
    pub fn get(&mut self, title: &str) -> Option<&dyn Track> {
        let index = self.find_slot(title)?;
        self.access_counter += 1;
        self.slots[index].touch(self.access_counter);
        self.slots[index].record()
    }

    /// Installs a record, taking ownership of it.
    ///
    /// Returns `true` exactly when an occupied slot had to be evicted to
    /// make room. An empty handle is rejected outright. If an occupied slot
    /// already stores the same title, that slot's recency is refreshed and
    /// the incoming record is discarded — the stored instance stays.
    pub fn put(&mut self, record: BoxedTrack) -> bool {
        let Some(title) = record.as_ref().map(|t| t.title().to_string()) else {
            debug!("rejected empty handle");
            return false;
        };

        self.access_counter += 1;

        if let Some(index) = self.find_slot(&title) {
            self.slots[index].touch(self.access_counter);
            debug!(title = %title, slot = index, "duplicate title, refreshed recency");
            // `record` is dropped here; the clone it owned is destroyed
            return false;
        }

        if let Some(index) = self.find_free_slot() {
            self.slots[index].store(record, self.access_counter);
            debug!(title = %title, slot = index, "installed record into free slot");
            false
        } else if let Some(index) = self.find_lru_slot() {
            if let Some(victim) = self.slots[index].record() {
                debug!(
                    evicted = %victim.title(),
                    slot = index,
                    "evicting least recently used record"
                );
            }
            self.slots[index].store(record, self.access_counter);
            debug!(title = %title, slot = index, "installed record into evicted slot");
            true
        } else {
            // a zero-capacity cache has nowhere to install
            debug!(title = %title, "cache has no slots, dropping record");
            false
        }
    }

    /// Resizes the slot array.
    ///
    /// Shrinking truncates by index: slots beyond the new bound are dropped
    /// together with any records they own.
    pub fn set_capacity(&mut self, capacity: usize) {
        if capacity == self.slots.len() {
            return;
        }
        if capacity < self.slots.len() {
            let dropped = self.slots[capacity..]
                .iter()
                .filter(|s| s.is_occupied())
                .count();
            if dropped > 0 {
                debug!(dropped, capacity, "capacity shrink dropped occupied slots");
            }
        }
        self.slots.resize_with(capacity, Slot::default);
    }

    /// Empties every slot. The session access counter keeps running.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.clear();
        }
    }

    /// Renders the per-slot occupancy for status logging.
    pub fn status(&self) -> String {
        let mut out = format!("cache {}/{} slots occupied", self.len(), self.capacity());
        for (index, slot) in self.slots.iter().enumerate() {
            match slot.record() {
                Some(track) => {
                    let _ = write!(
                        out,
                        "\n  slot {index}: {} (last access {})",
                        track.title(),
                        slot.last_access()
                    );
                }
                None => {
                    let _ = write!(out, "\n  slot {index}: [empty]");
                }
            }
        }
        out
    }

    fn find_slot(&self, title: &str) -> Option<usize> {
        self.slots.iter().position(|s| s.title_matches(title))
    }

    fn find_free_slot(&self) -> Option<usize> {
        self.slots.iter().position(|s| !s.is_occupied())
    }

    /// Occupied slot with the minimum recency stamp; ties resolve to the
    /// lowest index because only a strictly smaller stamp displaces the
    /// candidate during the left-to-right scan.
    fn find_lru_slot(&self) -> Option<usize> {
        let mut best: Option<(usize, u64)> = None;
        for (index, slot) in self.slots.iter().enumerate() {
            if !slot.is_occupied() {
                continue;
            }
            match best {
                Some((_, min)) if slot.last_access() >= min => {}
                _ => best = Some((index, slot.last_access())),
            }
        }
        best.map(|(index, _)| index)
    }
}
