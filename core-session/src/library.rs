//! Track library and playlist management.
//!
//! The library owns the original records for the whole session. Playlists
//! never reference originals directly: materializing a playlist clones each
//! referenced original, prepares the clone (load + beatgrid analysis), and
//! stores the prepared clone under the playlist's exclusive ownership.

use core_tracks::{BoxedTrack, OwningHandle, Track};
use tracing::{debug, info, warn};

use crate::config::TrackSpec;

/// Named ordered collection of owned, prepared track clones.
#[derive(Debug, Default)]
pub struct Playlist {
    name: String,
    tracks: Vec<BoxedTrack>,
}

impl Playlist {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tracks: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Takes ownership of a track. Empty handles are rejected.
    pub fn add_track(&mut self, track: BoxedTrack) {
        if !track.is_loaded() {
            warn!(playlist = %self.name, "refusing to add an empty handle");
            return;
        }
        self.tracks.push(track);
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Finds a track by title.
    pub fn find_track(&self, title: &str) -> Option<&dyn Track> {
        self.tracks
            .iter()
            .filter_map(|t| t.as_ref())
            .find(|t| t.title() == title)
    }

    /// Track titles in insertion order.
    pub fn track_titles(&self) -> Vec<String> {
        self.tracks
            .iter()
            .filter_map(|t| t.as_ref())
            .map(|t| t.title().to_string())
            .collect()
    }

    /// Combined duration of all tracks, in seconds.
    pub fn total_duration_seconds(&self) -> u64 {
        self.tracks
            .iter()
            .filter_map(|t| t.as_ref())
            .map(|t| u64::from(t.duration_seconds()))
            .sum()
    }
}

/// Owns the library originals and the currently loaded playlist.
#[derive(Debug, Default)]
pub struct LibraryService {
    library: Vec<BoxedTrack>,
    playlist: Playlist,
}

impl LibraryService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the library of owned originals from track specs.
    pub fn build_library(&mut self, specs: &[TrackSpec]) {
        self.library.clear();
        for spec in specs {
            self.library.push(OwningHandle::from_boxed(spec.build()));
        }
        info!(tracks = self.library.len(), "track library built");
    }

    /// Number of originals in the library.
    pub fn library_len(&self) -> usize {
        self.library.len()
    }

    /// Materializes a playlist from 1-based library indices.
    ///
    /// Invalid indices are skipped with a warning. Each referenced original
    /// is cloned, the clone prepared, and the prepared clone added to the
    /// playlist. Clone failures are logged and skipped.
    pub fn load_playlist_from_indices(&mut self, name: &str, indices: &[usize]) {
        info!(playlist = name, "loading playlist");
        self.playlist = Playlist::new(name);

        for &index in indices {
            if index == 0 || index > self.library.len() {
                warn!(index, playlist = name, "invalid track index, skipping");
                continue;
            }
            let Some(original) = self.library[index - 1].as_ref() else {
                warn!(index, playlist = name, "library slot is empty, skipping");
                continue;
            };

            let mut clone = original.clone_track();
            let Ok(record) = clone.get_mut() else {
                warn!(title = %original.title(), "failed to clone track, skipping");
                continue;
            };
            record.load();
            record.analyze_beatgrid();
            debug!(
                title = %record.title(),
                quality = record.quality_score(),
                "track prepared for playlist"
            );

            self.playlist.add_track(clone);
        }

        info!(
            playlist = name,
            tracks = self.playlist.len(),
            "playlist loaded"
        );
    }

    /// Finds a track in the current playlist by title.
    pub fn find_track(&self, title: &str) -> Option<&dyn Track> {
        self.playlist.find_track(title)
    }

    /// The currently loaded playlist.
    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// Titles of the current playlist, in insertion order.
    pub fn track_titles(&self) -> Vec<String> {
        self.playlist.track_titles()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrackFormat;

    fn spec(title: &str, bpm: u32) -> TrackSpec {
        TrackSpec {
            title: title.to_string(),
            artists: vec![],
            duration_seconds: 180,
            bpm,
            format: TrackFormat::Mp3 {
                bitrate_kbps: 320,
                has_id3_tags: false,
            },
        }
    }

    fn service_with(titles: &[&str]) -> LibraryService {
        let specs: Vec<TrackSpec> = titles
            .iter()
            .enumerate()
            .map(|(i, t)| spec(t, 120 + i as u32))
            .collect();
        let mut service = LibraryService::new();
        service.build_library(&specs);
        service
    }

    #[test]
    fn test_build_library_owns_originals() {
        let service = service_with(&["A", "B", "C"]);
        assert_eq!(service.library_len(), 3);
    }

    #[test]
    fn test_playlist_indices_are_one_based() {
        let mut service = service_with(&["A", "B", "C"]);
        service.load_playlist_from_indices("set", &[3, 1]);
        assert_eq!(service.track_titles(), vec!["C", "A"]);
    }

    #[test]
    fn test_invalid_indices_are_skipped() {
        let mut service = service_with(&["A", "B"]);
        service.load_playlist_from_indices("set", &[0, 1, 7, 2]);
        assert_eq!(service.track_titles(), vec!["A", "B"]);
    }

    #[test]
    fn test_playlist_holds_independent_clones() {
        let mut service = service_with(&["A"]);
        service.load_playlist_from_indices("set", &[1, 1]);

        // the same original can appear twice, as two separate clones
        assert_eq!(service.playlist().len(), 2);
        assert_eq!(service.find_track("A").map(|t| t.bpm()), Some(120));
    }

    #[test]
    fn test_find_track_misses_cleanly() {
        let mut service = service_with(&["A"]);
        service.load_playlist_from_indices("set", &[1]);
        assert!(service.find_track("missing").is_none());
    }

    #[test]
    fn test_reloading_replaces_playlist() {
        let mut service = service_with(&["A", "B"]);
        service.load_playlist_from_indices("first", &[1]);
        service.load_playlist_from_indices("second", &[2]);
        assert_eq!(service.playlist().name(), "second");
        assert_eq!(service.track_titles(), vec!["B"]);
    }

    #[test]
    fn test_total_duration() {
        let mut service = service_with(&["A", "B"]);
        service.load_playlist_from_indices("set", &[1, 2]);
        assert_eq!(service.playlist().total_duration_seconds(), 360);
    }

    #[test]
    fn test_empty_handle_rejected_by_playlist() {
        let mut playlist = Playlist::new("set");
        playlist.add_track(BoxedTrack::empty());
        assert!(playlist.is_empty());
    }
}
