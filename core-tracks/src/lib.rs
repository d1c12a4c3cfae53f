//! # Track Records & Ownership
//!
//! Defines the currency the rest of the workspace trades in:
//!
//! - [`OwningHandle`] — a move-only wrapper holding exclusive ownership of
//!   one heap-allocated value. Cache slots, mixer decks, and playlists all
//!   hold their records through it, and ownership moves between containers
//!   by moving the handle itself.
//! - [`Track`] — the capability contract every track variant provides.
//!   Containers consume it opaquely and never inspect the concrete variant.
//! - [`Mp3Track`] / [`WavTrack`] — the concrete variants, with
//!   format-specific preparation and beatgrid analysis.

pub mod error;
pub mod handle;
pub mod track;
pub mod variants;

pub use error::{Result, TrackError};
pub use handle::OwningHandle;
pub use track::{BoxedTrack, Track, TrackCore};
pub use variants::{Mp3Track, WavTrack};
