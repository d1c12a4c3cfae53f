//! Session configuration.
//!
//! Loaded once at session setup from a JSON document and validated
//! fail-fast with actionable messages. The configuration parametrizes the
//! controller cache and the mixer, and describes the track library plus the
//! playlists that reference it by 1-based index.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use core_tracks::{Mp3Track, Track, WavTrack};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SessionError};

/// Format-specific track parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum TrackFormat {
    /// MPEG-1 Layer 3.
    Mp3 {
        bitrate_kbps: u32,
        #[serde(default)]
        has_id3_tags: bool,
    },
    /// Uncompressed PCM.
    Wav { sample_rate_hz: u32, bit_depth: u16 },
}

/// Specification of one library track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackSpec {
    pub title: String,
    #[serde(default)]
    pub artists: Vec<String>,
    pub duration_seconds: u32,
    pub bpm: u32,
    #[serde(flatten)]
    pub format: TrackFormat,
}

impl TrackSpec {
    /// Constructs the concrete variant this spec describes.
    pub fn build(&self) -> Box<dyn Track> {
        match self.format {
            TrackFormat::Mp3 {
                bitrate_kbps,
                has_id3_tags,
            } => Box::new(Mp3Track::new(
                self.title.clone(),
                self.artists.clone(),
                self.duration_seconds,
                self.bpm,
                bitrate_kbps,
                has_id3_tags,
            )),
            TrackFormat::Wav {
                sample_rate_hz,
                bit_depth,
            } => Box::new(WavTrack::new(
                self.title.clone(),
                self.artists.clone(),
                self.duration_seconds,
                self.bpm,
                sample_rate_hz,
                bit_depth,
            )),
        }
    }
}

/// Session-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Number of slots in the controller cache (must be at least 1).
    pub cache_capacity: usize,

    /// Maximum BPM difference for mixing without synchronization.
    #[serde(default)]
    pub bpm_tolerance: u32,

    /// Synchronize BPM automatically when a loaded track is outside the
    /// tolerance.
    #[serde(default)]
    pub auto_sync: bool,

    /// Track library available to playlists.
    #[serde(default)]
    pub library: Vec<TrackSpec>,

    /// Named playlists of 1-based library indices. A `BTreeMap` so that
    /// playlists are processed in sorted name order.
    #[serde(default)]
    pub playlists: BTreeMap<String, Vec<usize>>,
}

impl SessionConfig {
    /// Creates a configuration with an empty library and no playlists.
    pub fn new(cache_capacity: usize) -> Self {
        Self {
            cache_capacity,
            bpm_tolerance: 0,
            auto_sync: false,
            library: Vec::new(),
            playlists: BTreeMap::new(),
        }
    }

    /// Sets the BPM tolerance.
    pub fn with_bpm_tolerance(mut self, tolerance: u32) -> Self {
        self.bpm_tolerance = tolerance;
        self
    }

    /// Enables or disables automatic BPM synchronization.
    pub fn with_auto_sync(mut self, enabled: bool) -> Self {
        self.auto_sync = enabled;
        self
    }

    /// Sets the track library.
    pub fn with_library(mut self, library: Vec<TrackSpec>) -> Self {
        self.library = library;
        self
    }

    /// Adds a named playlist of 1-based library indices.
    pub fn with_playlist(mut self, name: impl Into<String>, indices: Vec<usize>) -> Self {
        self.playlists.insert(name.into(), indices);
        self
    }

    /// Loads and validates a configuration from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Parses and validates a configuration from a JSON document.
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks the cache capacity is positive and library titles are unique
    /// (the cache and the deck flow key records by title). Playlist indices
    /// are not validated here: an out-of-range index is skipped with a
    /// warning at playlist load time.
    pub fn validate(&self) -> Result<()> {
        if self.cache_capacity == 0 {
            return Err(SessionError::Config(
                "cache_capacity must be at least 1".to_string(),
            ));
        }

        let mut seen = BTreeSet::new();
        for spec in &self.library {
            if spec.title.is_empty() {
                return Err(SessionError::Config(
                    "library tracks must have a non-empty title".to_string(),
                ));
            }
            if !seen.insert(spec.title.as_str()) {
                return Err(SessionError::Config(format!(
                    "duplicate track title in library: {}",
                    spec.title
                )));
            }
        }

        Ok(())
    }
}
