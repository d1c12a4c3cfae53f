//! Uncompressed PCM (WAV) track variant.

use tracing::debug;

use crate::handle::OwningHandle;
use crate::track::{BoxedTrack, Track, TrackCore};

/// Baseline sample rate for analysis resolution, in Hz.
const BASELINE_SAMPLE_RATE_HZ: u32 = 44_100;

/// A WAV track record.
#[derive(Debug, Clone)]
pub struct WavTrack {
    core: TrackCore,
    sample_rate_hz: u32,
    bit_depth: u16,
}

impl WavTrack {
    pub fn new(
        title: impl Into<String>,
        artists: Vec<String>,
        duration_seconds: u32,
        bpm: u32,
        sample_rate_hz: u32,
        bit_depth: u16,
    ) -> Self {
        Self {
            core: TrackCore::new(title, artists, duration_seconds, bpm),
            sample_rate_hz,
            bit_depth,
        }
    }

    pub fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }

    pub fn bit_depth(&self) -> u16 {
        self.bit_depth
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

impl Track for WavTrack {
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
            debug!(title = %self.core.title(), "wav already prepared, skipping load");
            return;
        }
        debug!(
            title = %self.core.title(),
            sample_rate_hz = self.sample_rate_hz,
            bit_depth = self.bit_depth,
            "loading wav"
        );
        debug!(title = %self.core.title(), "parsing RIFF header");
        debug!(title = %self.core.title(), "mapping PCM samples");
    }

    fn analyze_beatgrid(&mut self) {
        let beats = self.core.stamp_beatgrid();
        let resolution = f64::from(self.sample_rate_hz) / f64::from(BASELINE_SAMPLE_RATE_HZ);
        debug!(
            title = %self.core.title(),
            estimated_beats = beats,
            resolution_factor = resolution,
            samples = self.core.waveform().len(),
            "analyzed wav beatgrid"
        );
    }

    fn clone_track(&self) -> BoxedTrack {
        OwningHandle::from_boxed(Box::new(self.clone()))
    }

    fn quality_score(&self) -> f64 {
        // lossless baseline, with headroom for high-resolution masters
        let mut quality: f64 = 90.0;
        if self.bit_depth >= 24 {
            quality += 5.0;
        }
        if self.sample_rate_hz >= 48_000 {
            quality += 5.0;
        }
        quality.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_preserves_runtime_variant_fields() {
        let source = WavTrack::new("Xtal", vec!["Aphex Twin".to_string()], 294, 115, 48_000, 24);
        let clone = source.clone_track();

        let record = clone.get().unwrap();
        assert_eq!(record.title(), "Xtal");
        assert_eq!(record.duration_seconds(), 294);
        assert_eq!(record.quality_score(), 100.0);
    }

    #[test]
    fn test_quality_score_baseline() {
        let cd = WavTrack::new("Windowlicker", vec![], 366, 127, 44_100, 16);
        assert_eq!(cd.quality_score(), 90.0);
    }

    #[test]
    fn test_mutating_clone_leaves_source_unchanged() {
        let source = WavTrack::new("Alberto Balsalm", vec![], 310, 100, 44_100, 16);
        let mut clone = source.clone_track();

        clone.get_mut().unwrap().set_bpm(140);
        assert_eq!(source.bpm(), 100);
        assert_eq!(clone.get().unwrap().bpm(), 140);
    }
}
