//! # DJ Session Orchestration
//!
//! Ties the workspace together: loads the session configuration, builds the
//! track library, and drives each configured playlist through the cache and
//! deck phases while threading a statistics accumulator through the call
//! chain.
//!
//! ## Overview
//!
//! A session run is fully synchronous and single-threaded:
//!
//! 1. [`SessionConfig`] is loaded (JSON) and validated fail-fast.
//! 2. [`LibraryService`] builds the owned library originals and materializes
//!    playlists as prepared clones.
//! 3. For each playlist track, [`DjSession`] admits the record into the
//!    controller cache and then transfers it onto a mixer deck, updating
//!    [`SessionStats`] at every step.
//! 4. After each playlist a summary is emitted and the counters reset.

pub mod config;
pub mod error;
pub mod library;
pub mod logging;
pub mod session;
pub mod stats;

pub use config::{SessionConfig, TrackFormat, TrackSpec};
pub use error::{Result, SessionError};
pub use library::{LibraryService, Playlist};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use session::DjSession;
pub use stats::SessionStats;
