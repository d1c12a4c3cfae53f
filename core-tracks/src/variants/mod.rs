//! Concrete track variants.

mod mp3;
mod wav;

pub use mp3::Mp3Track;
pub use wav::WavTrack;
