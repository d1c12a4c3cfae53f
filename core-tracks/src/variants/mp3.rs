//! MPEG-1 Layer 3 track variant.

use tracing::debug;

use crate::handle::OwningHandle;
use crate::track::{BoxedTrack, Track, TrackCore};

/// Reference bitrate for quality scoring, in kbps.
const REFERENCE_BITRATE_KBPS: u32 = 320;

/// An MP3 track record.
#[derive(Debug, Clone)]
pub struct Mp3Track {
    core: TrackCore,
    bitrate_kbps: u32,
    has_id3_tags: bool,
}

impl Mp3Track {
    pub fn new(
        title: impl Into<String>,
        artists: Vec<String>,
        duration_seconds: u32,
        bpm: u32,
        bitrate_kbps: u32,
        has_id3_tags: bool,
    ) -> Self {
        Self {
            core: TrackCore::new(title, artists, duration_seconds, bpm),
            bitrate_kbps,
            has_id3_tags,
        }
    }

    pub fn bitrate_kbps(&self) -> u32 {
        self.bitrate_kbps
    }

    pub fn has_id3_tags(&self) -> bool {
        self.has_id3_tags
    }

    /// Whether format preparation already ran.
    pub fn is_prepared(&self) -> bool {
        self.core.is_prepared()
    }

    /// Estimated beat count stamped by the last beatgrid analysis.
    pub fn estimated_beats(&self) -> Option<u32> {
        self.core.estimated_beats()
    }
}

impl Track for Mp3Track {
    fn title(&self) -> &str {
        self.core.title()
    }

    fn artists(&self) -> &[String] {
        self.core.artists()
    }

    fn duration_seconds(&self) -> u32 {
        self.core.duration_seconds()
    }

    fn bpm(&self) -> u32 {
        self.core.bpm()
    }

    fn set_bpm(&mut self, bpm: u32) {
        self.core.set_bpm(bpm);
    }

    fn load(&mut self) {
        if !self.core.mark_prepared() {
            debug!(title = %self.core.title(), "mp3 already prepared, skipping load");
            return;
        }
        debug!(
            title = %self.core.title(),
            bitrate_kbps = self.bitrate_kbps,
            "loading mp3"
        );
        if self.has_id3_tags {
            debug!(title = %self.core.title(), "processing ID3 metadata");
        } else {
            debug!(title = %self.core.title(), "no ID3 tags present");
        }
        debug!(title = %self.core.title(), "decoding mp3 frames");
    }

    fn analyze_beatgrid(&mut self) {
        let beats = self.core.stamp_beatgrid();
        let precision = f64::from(self.bitrate_kbps) / f64::from(REFERENCE_BITRATE_KBPS);
        debug!(
            title = %self.core.title(),
            estimated_beats = beats,
            precision_factor = precision,
            samples = self.core.waveform().len(),
            "analyzed mp3 beatgrid"
        );
    }

    fn clone_track(&self) -> BoxedTrack {
        OwningHandle::from_boxed(Box::new(self.clone()))
    }

    fn quality_score(&self) -> f64 {
        let mut quality =
            f64::from(self.bitrate_kbps) / f64::from(REFERENCE_BITRATE_KBPS) * 100.0;
        if self.has_id3_tags {
            quality += 5.0;
        }
        if self.bitrate_kbps < 128 {
            quality -= 10.0;
        }
        quality.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_track() -> Mp3Track {
        Mp3Track::new(
            "Around the World",
            vec!["Daft Punk".to_string()],
            428,
            121,
            320,
            true,
        )
    }

    #[test]
    fn test_clone_preserves_fields_independently() {
        let source = sample_track();
        let mut clone = source.clone_track();

        let record = clone.get_mut().unwrap();
        assert_eq!(record.title(), "Around the World");
        assert_eq!(record.bpm(), 121);

        record.set_bpm(130);
        assert_eq!(record.bpm(), 130);
        // the source is untouched by mutating the clone
        assert_eq!(source.bpm(), 121);
    }

    #[test]
    fn test_load_is_idempotent() {
        let mut track = sample_track();
        track.load();
        assert!(track.is_prepared());
        track.load();
        assert!(track.is_prepared());
    }

    #[test]
    fn test_analyze_stamps_estimated_beats() {
        let mut track = sample_track();
        assert_eq!(track.estimated_beats(), None);
        track.analyze_beatgrid();
        // 428 s at 121 bpm = 863 beats
        assert_eq!(track.estimated_beats(), Some(863));
    }

    #[test]
    fn test_quality_score_rewards_bitrate_and_tags() {
        let full = sample_track();
        assert_eq!(full.quality_score(), 100.0);

        let low = Mp3Track::new("Demo Rip", vec![], 180, 120, 96, false);
        // 96/320 * 100 - 10 (low bitrate penalty)
        assert!((low.quality_score() - 20.0).abs() < 1e-9);
    }
}
