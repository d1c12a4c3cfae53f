//! # Mixer Engine
//!
//! Two deck cells, an active-deck marker, and BPM compatibility logic.
//! Loading a track clones it from its source, prepares the clone, optionally
//! synchronizes its tempo with the active deck, and installs it into the
//! non-active deck — the deck takes exclusive ownership of the clone and
//! destroys any previous occupant.

pub mod engine;
pub mod error;

pub use engine::{MixerEngine, DECK_COUNT};
pub use error::{MixerError, Result};
