//! Error types for deck operations.

use thiserror::Error;

/// Errors that can occur while operating the mixer decks.
#[derive(Error, Debug)]
pub enum MixerError {
    /// Cloning the source record yielded no allocation; no deck was
    /// modified. Recoverable — callers log, count, and skip the track.
    #[error("failed to clone track for deck load: {title}")]
    CloneFailed {
        /// Title of the track that failed to clone.
        title: String,
    },
}

/// Result type for mixer operations.
pub type Result<T> = std::result::Result<T, MixerError>;
