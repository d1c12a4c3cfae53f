//! Track capability contract and shared field bundle.

use crate::handle::OwningHandle;

/// Owned, heap-allocated track record behind the capability contract.
pub type BoxedTrack = OwningHandle<dyn Track>;

/// Capability set every track variant provides.
///
/// Cache slots, mixer decks, and playlists consume this contract opaquely:
/// they invoke it but never inspect the concrete variant. The title is the
/// identity key and is immutable once the record is created.
pub trait Track {
    /// Identity key.
    fn title(&self) -> &str;

    /// Credited artists.
    fn artists(&self) -> &[String];

    /// Track length in seconds.
    fn duration_seconds(&self) -> u32;

    /// Current tempo in beats per minute.
    fn bpm(&self) -> u32;

    /// Adjusts the tempo (used by deck BPM synchronization).
    fn set_bpm(&mut self, bpm: u32);

    /// Format-specific preparation. Idempotent: preparing an
    /// already-prepared record is a no-op.
    fn load(&mut self);

    /// Derived-timing computation over the prepared data; stamps the
    /// estimated beat count on the record.
    fn analyze_beatgrid(&mut self);

    /// Deep, independently owned copy preserving the runtime variant.
    ///
    /// An empty handle reports clone failure. That is a recoverable
    /// condition: callers log it and skip the record.
    fn clone_track(&self) -> BoxedTrack;

    /// Heuristic quality score in `[0, 100]`.
    fn quality_score(&self) -> f64;
}

/// Number of waveform samples synthesized per record.
///
/// Real decoding is out of scope; the placeholder waveform exists so clones
/// carry an independently owned buffer.
const WAVEFORM_SAMPLES: usize = 256;

/// Fields shared by every track variant.
#[derive(Debug, Clone)]
pub struct TrackCore {
    title: String,
    artists: Vec<String>,
    duration_seconds: u32,
    bpm: u32,
    waveform: Vec<f32>,
    estimated_beats: Option<u32>,
    prepared: bool,
}

impl TrackCore {
    /// Creates the shared field bundle with a synthesized waveform buffer.
    pub fn new(
        title: impl Into<String>,
        artists: Vec<String>,
        duration_seconds: u32,
        bpm: u32,
    ) -> Self {
        let waveform = (0..WAVEFORM_SAMPLES)
            .map(|i| (i as f32 * 0.1).sin())
            .collect();
        Self {
            title: title.into(),
            artists,
            duration_seconds,
            bpm,
            waveform,
            estimated_beats: None,
            prepared: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artists(&self) -> &[String] {
        &self.artists
    }

    pub fn duration_seconds(&self) -> u32 {
        self.duration_seconds
    }

    pub fn bpm(&self) -> u32 {
        self.bpm
    }

    pub fn set_bpm(&mut self, bpm: u32) {
        self.bpm = bpm;
    }

    /// Waveform sample buffer (deep-copied with the record).
    pub fn waveform(&self) -> &[f32] {
        &self.waveform
    }

    /// Whether format preparation already ran.
    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// Estimated beat count stamped by the last beatgrid analysis.
    pub fn estimated_beats(&self) -> Option<u32> {
        self.estimated_beats
    }

    /// Marks the record prepared. Returns `false` when it already was, so
    /// variants can make `load` idempotent.
    pub(crate) fn mark_prepared(&mut self) -> bool {
        if self.prepared {
            return false;
        }
        self.prepared = true;
        true
    }

    /// Computes and stamps the estimated beat count.
    pub(crate) fn stamp_beatgrid(&mut self) -> u32 {
        let beats = (f64::from(self.duration_seconds) / 60.0 * f64::from(self.bpm)) as u32;
        self.estimated_beats = Some(beats);
        beats
    }
}
