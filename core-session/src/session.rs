//! DJ session orchestration.
//!
//! Drives the full flow for each configured playlist: library lookup,
//! cache admission, and deck transfer, updating the statistics accumulator
//! at every step. Per-track failures are absorbed and counted; the session
//! keeps processing subsequent tracks.

use core_cache::{CacheManager, CacheOutcome};
use core_mixer::MixerEngine;
use tracing::{error, info, instrument};

use crate::config::SessionConfig;
use crate::error::{Result, SessionError};
use crate::library::LibraryService;
use crate::stats::SessionStats;

/// Orchestrates the library → cache → deck flow for configured playlists.
#[derive(Debug)]
pub struct DjSession {
    name: String,
    config: SessionConfig,
    library: LibraryService,
    controller: CacheManager,
    mixer: MixerEngine,
    track_titles: Vec<String>,
    stats: SessionStats,
}

impl DjSession {
    /// Creates a session from a validated configuration.
    ///
    /// The configuration parametrizes the controller cache (capacity) and
    /// the mixer (tolerance, auto-sync), and its library specs become the
    /// session-lived originals.
    pub fn new(name: impl Into<String>, config: SessionConfig) -> Result<Self> {
        config.validate()?;

        let mut mixer = MixerEngine::new();
        mixer.set_auto_sync(config.auto_sync);
        mixer.set_bpm_tolerance(config.bpm_tolerance);

        let controller = CacheManager::new(config.cache_capacity);

        let mut library = LibraryService::new();
        library.build_library(&config.library);

        let name = name.into();
        info!(
            session = %name,
            cache_capacity = config.cache_capacity,
            bpm_tolerance = config.bpm_tolerance,
            auto_sync = config.auto_sync,
            "session initialized"
        );

        Ok(Self {
            name,
            config,
            library,
            controller,
            mixer,
            track_titles: Vec::new(),
            stats: SessionStats::default(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn mixer(&self) -> &MixerEngine {
        &self.mixer
    }

    pub fn controller(&self) -> &CacheManager {
        &self.controller
    }

    /// Loads a configured playlist, returning the number of tracks it
    /// materialized.
    pub fn load_playlist(&mut self, playlist_name: &str) -> Result<usize> {
        let Some(indices) = self.config.playlists.get(playlist_name) else {
            return Err(SessionError::PlaylistNotFound(playlist_name.to_string()));
        };
        self.library
            .load_playlist_from_indices(playlist_name, indices);
        self.track_titles = self.library.track_titles();
        Ok(self.track_titles.len())
    }

    /// Cache phase for one track: library lookup plus cache admission.
    ///
    /// Returns `None` when the track is not in the current playlist (a
    /// counted error), otherwise the admission outcome.
    pub fn load_track_to_controller(&mut self, title: &str) -> Option<CacheOutcome> {
        let Some(track) = self.library.find_track(title) else {
            error!(title, "track not found in library");
            self.stats.errors += 1;
            return None;
        };

        info!(title, "loading track to controller cache");
        let outcome = self.controller.admit(track);
        self.stats.record_cache_outcome(outcome);
        Some(outcome)
    }

    /// Deck phase for one track: cache lookup plus mixer transfer.
    ///
    /// Returns `true` when the track landed on a deck.
    pub fn load_track_to_mixer_deck(&mut self, title: &str) -> bool {
        info!(title, "delegating track transfer to the mixer");
        let Some(track) = self.controller.lookup(title) else {
            error!(title, "track not found in cache");
            self.stats.errors += 1;
            return false;
        };

        match self.mixer.load_track_to_deck(track) {
            Ok(deck) => {
                self.stats.record_deck_load(deck);
                true
            }
            Err(err) => {
                error!(title, %err, "failed to load track to a mixer deck");
                self.stats.errors += 1;
                false
            }
        }
    }

    /// Processes one playlist end to end, then emits the summary and
    /// resets the statistics for the next playlist.
    ///
    /// Returns `false` when the playlist could not be loaded at all;
    /// individual track failures are absorbed and counted.
    #[instrument(skip(self))]
    pub fn process_playlist(&mut self, playlist_name: &str) -> bool {
        if let Err(err) = self.load_playlist(playlist_name) {
            error!(playlist = playlist_name, %err, "failed to load playlist");
            self.stats.errors += 1;
            return false;
        }

        let titles = self.track_titles.clone();
        for title in &titles {
            info!(title = %title, "processing track");
            self.stats.tracks_processed += 1;
            self.load_track_to_controller(title);
            self.load_track_to_mixer_deck(title);
        }

        info!("{}", self.stats.summary(&self.name));
        self.stats.reset();
        true
    }

    /// Runs the whole session: every configured playlist, in sorted name
    /// order.
    #[instrument(skip(self), fields(session = %self.name))]
    pub fn run(&mut self) -> Result<()> {
        if self.config.playlists.is_empty() {
            return Err(SessionError::Config(
                "no playlists configured".to_string(),
            ));
        }

        info!("starting dj performance simulation");
        let names: Vec<String> = self.config.playlists.keys().cloned().collect();
        for name in names {
            self.process_playlist(&name);
        }
        Ok(())
    }

    /// Logs the cache and deck status blocks.
    pub fn log_status(&self) {
        info!("{}", self.controller.status());
        info!("{}", self.mixer.deck_status());
    }
}
