//! Two-deck mixer engine with BPM synchronization.

use std::fmt::Write as _;

use core_tracks::{BoxedTrack, Track};
use tracing::{debug, info};

use crate::error::{MixerError, Result};

/// Number of deck cells on the mixer.
pub const DECK_COUNT: usize = 2;

/// Two deck cells holding owned records, plus the active-deck marker.
///
/// Invariant: `active_deck` always refers to the most recently loaded deck.
#[derive(Debug)]
pub struct MixerEngine {
    decks: [BoxedTrack; DECK_COUNT],
    active_deck: usize,
    auto_sync: bool,
    bpm_tolerance: u32,
}

impl MixerEngine {
    /// Creates an engine with two empty decks.
    pub fn new() -> Self {
        Self {
            decks: [BoxedTrack::empty(), BoxedTrack::empty()],
            active_deck: 0,
            auto_sync: false,
            bpm_tolerance: 0,
        }
    }

    /// Enables or disables automatic BPM synchronization on load.
    pub fn set_auto_sync(&mut self, enabled: bool) {
        self.auto_sync = enabled;
    }

    /// Sets the maximum BPM difference considered mixable.
    pub fn set_bpm_tolerance(&mut self, tolerance: u32) {
        self.bpm_tolerance = tolerance;
    }

    /// Index of the most recently loaded deck.
    pub fn active_deck(&self) -> usize {
        self.active_deck
    }

    /// Borrows the record on deck `index`, if the deck is occupied.
    pub fn deck(&self, index: usize) -> Option<&dyn Track> {
        self.decks.get(index)?.as_ref()
    }

    /// Clones `source`, prepares the clone, and installs it on a deck.
    ///
    /// The target is deck 0 when both decks are empty, otherwise the deck
    /// that is not active. Any previous occupant of the target deck is
    /// destroyed before the prepared clone takes its place. With auto-sync
    /// enabled, a clone whose tempo differs from the active deck's by more
    /// than the tolerance is pulled to the floored mean of the two.
    ///
    /// Returns the target deck index, which also becomes the active deck.
    pub fn load_track_to_deck(&mut self, source: &dyn Track) -> Result<usize> {
        let mut clone = source.clone_track();
        if !clone.is_loaded() {
            return Err(MixerError::CloneFailed {
                title: source.title().to_string(),
            });
        }

        let target = if !self.decks[0].is_loaded() && !self.decks[1].is_loaded() {
            0
        } else {
            1 - self.active_deck
        };
        debug!(deck = target, "selected target deck");

        if let Ok(old) = self.decks[target].release() {
            debug!(title = %old.title(), deck = target, "unloading deck occupant");
            // `old` is destroyed here, before the replacement is prepared
        }

        if let Ok(record) = clone.get_mut() {
            record.load();
            record.analyze_beatgrid();
        }

        if self.auto_sync
            && self.decks[self.active_deck].is_loaded()
            && !self.can_mix_tracks(&clone)
        {
            self.sync_bpm(&mut clone);
        }

        self.decks[target] = clone;
        self.active_deck = target;
        if let Some(track) = self.decks[target].as_ref() {
            info!(title = %track.title(), deck = target, "track loaded to deck");
        }
        Ok(target)
    }

    /// Returns `true` when the candidate can be mixed against the active
    /// deck: both present and within the BPM tolerance.
    pub fn can_mix_tracks(&self, candidate: &BoxedTrack) -> bool {
        let (Some(active), Some(candidate)) = (
            self.decks[self.active_deck].as_ref(),
            candidate.as_ref(),
        ) else {
            return false;
        };
        active.bpm().abs_diff(candidate.bpm()) <= self.bpm_tolerance
    }

    /// Pulls the candidate's tempo to the floored mean of its own and the
    /// active deck's. No-op when either side is empty.
    pub fn sync_bpm(&self, candidate: &mut BoxedTrack) {
        let Some(active) = self.decks[self.active_deck].as_ref() else {
            return;
        };
        let Some(candidate) = candidate.as_mut() else {
            return;
        };
        let old = candidate.bpm();
        let synced = (old + active.bpm()) / 2;
        candidate.set_bpm(synced);
        debug!(from = old, to = synced, "synchronized bpm with active deck");
    }

    /// Renders per-deck occupancy for status logging.
    pub fn deck_status(&self) -> String {
        let mut out = String::from("deck status");
        for (index, deck) in self.decks.iter().enumerate() {
            match deck.as_ref() {
                Some(track) => {
                    let _ = write!(out, "\n  deck {index}: {} ({} bpm)", track.title(), track.bpm());
                }
                None => {
                    let _ = write!(out, "\n  deck {index}: [empty]");
                }
            }
        }
        let _ = write!(out, "\n  active deck: {}", self.active_deck);
        out
    }
}

impl Default for MixerEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_tracks::{Mp3Track, OwningHandle};
    use mockall::mock;
    use mockall::predicate::eq;
    use std::cell::Cell;
    use std::rc::Rc;

    mock! {
        pub DeckTrack {}

        impl Track for DeckTrack {
            fn title(&self) -> &str;
            fn artists(&self) -> &[String];
            fn duration_seconds(&self) -> u32;
            fn bpm(&self) -> u32;
            fn set_bpm(&mut self, bpm: u32);
            fn load(&mut self);
            fn analyze_beatgrid(&mut self);
            fn clone_track(&self) -> BoxedTrack;
            fn quality_score(&self) -> f64;
        }
    }

    fn mp3(title: &str, bpm: u32) -> Mp3Track {
        Mp3Track::new(title, vec![], 240, bpm, 320, true)
    }

    /// Variant whose clone always fails, for the recoverable-failure path.
    #[derive(Debug)]
    struct UncloneableTrack;

    impl Track for UncloneableTrack {
        fn title(&self) -> &str {
            "Uncloneable"
        }
        fn artists(&self) -> &[String] {
            &[]
        }
        fn duration_seconds(&self) -> u32 {
            0
        }
        fn bpm(&self) -> u32 {
            0
        }
        fn set_bpm(&mut self, _bpm: u32) {}
        fn load(&mut self) {}
        fn analyze_beatgrid(&mut self) {}
        fn clone_track(&self) -> BoxedTrack {
            BoxedTrack::empty()
        }
        fn quality_score(&self) -> f64 {
            0.0
        }
    }

    /// Variant that reports its drop, for the replacement-destroys path.
    #[derive(Debug, Clone)]
    struct DropReportingTrack {
        title: String,
        bpm: u32,
        drops: Rc<Cell<u32>>,
    }

    impl Drop for DropReportingTrack {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    impl Track for DropReportingTrack {
        fn title(&self) -> &str {
            &self.title
        }
        fn artists(&self) -> &[String] {
            &[]
        }
        fn duration_seconds(&self) -> u32 {
            0
        }
        fn bpm(&self) -> u32 {
            self.bpm
        }
        fn set_bpm(&mut self, bpm: u32) {
            self.bpm = bpm;
        }
        fn load(&mut self) {}
        fn analyze_beatgrid(&mut self) {}
        fn clone_track(&self) -> BoxedTrack {
            BoxedTrack::from_boxed(Box::new(self.clone()))
        }
        fn quality_score(&self) -> f64 {
            0.0
        }
    }

    #[test]
    fn test_first_load_targets_deck_zero() {
        let mut engine = MixerEngine::new();
        let deck = engine.load_track_to_deck(&mp3("First", 120)).unwrap();
        assert_eq!(deck, 0);
        assert_eq!(engine.active_deck(), 0);
        assert_eq!(engine.deck(0).map(|t| t.title()), Some("First"));
        assert!(engine.deck(1).is_none());
    }

    #[test]
    fn test_deck_alternation() {
        let mut engine = MixerEngine::new();
        assert_eq!(engine.load_track_to_deck(&mp3("One", 120)).unwrap(), 0);
        assert_eq!(engine.load_track_to_deck(&mp3("Two", 122)).unwrap(), 1);
        assert_eq!(engine.active_deck(), 1);

        // third load swings back to deck 0, replacing its occupant
        assert_eq!(engine.load_track_to_deck(&mp3("Three", 124)).unwrap(), 0);
        assert_eq!(engine.active_deck(), 0);
        assert_eq!(engine.deck(0).map(|t| t.title()), Some("Three"));
        assert_eq!(engine.deck(1).map(|t| t.title()), Some("Two"));
    }

    #[test]
    fn test_replacement_destroys_previous_occupant_once() {
        let drops = Rc::new(Cell::new(0));
        let seed = DropReportingTrack {
            title: "Replaced".to_string(),
            bpm: 120,
            drops: Rc::clone(&drops),
        };

        let mut engine = MixerEngine::new();
        engine.load_track_to_deck(&seed).unwrap();
        engine.load_track_to_deck(&mp3("Other", 121)).unwrap();
        // the clone on deck 0 is still alive; only transient clones died
        let occupied_drops = drops.get();

        engine.load_track_to_deck(&mp3("Back to zero", 122)).unwrap();
        assert_eq!(drops.get(), occupied_drops + 1);

        drop(engine);
        assert_eq!(drops.get(), occupied_drops + 1);
    }

    #[test]
    fn test_clone_failure_leaves_decks_untouched() {
        let mut engine = MixerEngine::new();
        engine.load_track_to_deck(&mp3("Stable", 120)).unwrap();

        let err = engine.load_track_to_deck(&UncloneableTrack).unwrap_err();
        assert!(matches!(err, MixerError::CloneFailed { .. }));
        assert_eq!(engine.active_deck(), 0);
        assert_eq!(engine.deck(0).map(|t| t.title()), Some("Stable"));
        assert!(engine.deck(1).is_none());
    }

    #[test]
    fn test_auto_sync_pulls_bpm_to_floored_mean() {
        let mut engine = MixerEngine::new();
        engine.set_auto_sync(true);
        engine.set_bpm_tolerance(5);

        engine.load_track_to_deck(&mp3("Anchor", 120)).unwrap();
        let deck = engine.load_track_to_deck(&mp3("Fast", 140)).unwrap();

        // |140 - 120| = 20 > 5, so the clone lands at (140 + 120) / 2
        assert_eq!(engine.deck(deck).map(|t| t.bpm()), Some(130));
        // the anchor is untouched
        assert_eq!(engine.deck(0).map(|t| t.bpm()), Some(120));
    }

    #[test]
    fn test_auto_sync_floors_odd_means() {
        let mut engine = MixerEngine::new();
        engine.set_auto_sync(true);
        engine.set_bpm_tolerance(0);

        engine.load_track_to_deck(&mp3("Anchor", 121)).unwrap();
        let deck = engine.load_track_to_deck(&mp3("Next", 126)).unwrap();
        // (126 + 121) / 2 = 123.5, floored
        assert_eq!(engine.deck(deck).map(|t| t.bpm()), Some(123));
    }

    #[test]
    fn test_within_tolerance_skips_sync() {
        let mut engine = MixerEngine::new();
        engine.set_auto_sync(true);
        engine.set_bpm_tolerance(5);

        engine.load_track_to_deck(&mp3("Anchor", 120)).unwrap();
        let deck = engine.load_track_to_deck(&mp3("Close", 123)).unwrap();
        assert_eq!(engine.deck(deck).map(|t| t.bpm()), Some(123));
    }

    #[test]
    fn test_sync_disabled_keeps_clone_bpm() {
        let mut engine = MixerEngine::new();
        engine.set_bpm_tolerance(5);

        engine.load_track_to_deck(&mp3("Anchor", 120)).unwrap();
        let deck = engine.load_track_to_deck(&mp3("Fast", 140)).unwrap();
        assert_eq!(engine.deck(deck).map(|t| t.bpm()), Some(140));
    }

    #[test]
    fn test_can_mix_tracks() {
        let mut engine = MixerEngine::new();
        engine.set_bpm_tolerance(5);

        let candidate = mp3("Candidate", 124).clone_track();
        // active deck empty
        assert!(!engine.can_mix_tracks(&candidate));

        engine.load_track_to_deck(&mp3("Anchor", 120)).unwrap();
        assert!(engine.can_mix_tracks(&candidate));

        // empty candidate
        assert!(!engine.can_mix_tracks(&BoxedTrack::empty()));

        let too_fast = mp3("Too Fast", 140).clone_track();
        assert!(!engine.can_mix_tracks(&too_fast));
    }

    #[test]
    fn test_clone_is_prepared_and_synced_not_the_source() {
        let mut engine = MixerEngine::new();
        engine.set_auto_sync(true);
        engine.set_bpm_tolerance(5);
        engine.load_track_to_deck(&mp3("Anchor", 120)).unwrap();

        let mut prepared = MockDeckTrack::new();
        prepared.expect_title().return_const("Fast".to_string());
        prepared.expect_load().times(1).return_const(());
        prepared
            .expect_analyze_beatgrid()
            .times(1)
            .return_const(());
        prepared.expect_bpm().return_const(140u32);
        prepared
            .expect_set_bpm()
            .with(eq(130u32))
            .times(1)
            .return_const(());

        let mut source = MockDeckTrack::new();
        source.expect_title().return_const("Fast".to_string());
        // the source itself must never be prepared or retimed
        source.expect_load().times(0);
        source.expect_analyze_beatgrid().times(0);
        source.expect_set_bpm().times(0);
        source
            .expect_clone_track()
            .times(1)
            .return_once(move || OwningHandle::from_boxed(Box::new(prepared)));

        let deck = engine.load_track_to_deck(&source).unwrap();
        assert_eq!(deck, 1);
    }

    #[test]
    fn test_sync_bpm_noop_when_active_deck_empty() {
        let engine = MixerEngine::new();
        let mut candidate = mp3("Candidate", 140).clone_track();
        engine.sync_bpm(&mut candidate);
        assert_eq!(candidate.get().unwrap().bpm(), 140);
    }

    #[test]
    fn test_deck_status_rendering() {
        let mut engine = MixerEngine::new();
        engine.load_track_to_deck(&mp3("Visible", 120)).unwrap();
        let status = engine.deck_status();
        assert!(status.contains("deck 0: Visible (120 bpm)"));
        assert!(status.contains("deck 1: [empty]"));
        assert!(status.contains("active deck: 0"));
    }
}
