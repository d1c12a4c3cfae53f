//! Workspace placeholder crate.
//!
//! This crate exists to expose shared feature flags that map to the individual
//! workspace crates (e.g., `core-tracks`, `core-cache`, `core-mixer`,
//! `core-session`). Host applications can depend on `djs-workspace` and enable
//! the documented features without needing to wire each crate individually.

#[cfg(feature = "cache")]
pub use core_cache as cache;
#[cfg(feature = "mixer")]
pub use core_mixer as mixer;
#[cfg(feature = "session")]
pub use core_session as session;
#[cfg(feature = "tracks")]
pub use core_tracks as tracks;
