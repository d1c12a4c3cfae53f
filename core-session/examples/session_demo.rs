//! End-to-end session demo.
//!
//! Builds a small library, two playlists, and runs the full session flow
//! with debug logging enabled:
//!
//! ```bash
//! cargo run --example session_demo
//! ```

use anyhow::Result;
use core_session::{init_logging, DjSession, LogFormat, LoggingConfig, SessionConfig};

const CONFIG: &str = r#"{
    "cache_capacity": 2,
    "bpm_tolerance": 5,
    "auto_sync": true,
    "library": [
        {
            "title": "Galvanize",
            "artists": ["The Chemical Brothers"],
            "duration_seconds": 274,
            "bpm": 105,
            "format": "mp3",
            "bitrate_kbps": 320,
            "has_id3_tags": true
        },
        {
            "title": "Strobe",
            "artists": ["deadmau5"],
            "duration_seconds": 637,
            "bpm": 128,
            "format": "mp3",
            "bitrate_kbps": 256,
            "has_id3_tags": true
        },
        {
            "title": "Flim",
            "artists": ["Aphex Twin"],
            "duration_seconds": 177,
            "bpm": 153,
            "format": "wav",
            "sample_rate_hz": 44100,
            "bit_depth": 16
        }
    ],
    "playlists": {
        "warmup": [1, 2],
        "peak": [2, 3, 1]
    }
}"#;

fn main() -> Result<()> {
    init_logging(
        LoggingConfig::default()
            .with_format(LogFormat::Compact)
            .with_filter("debug")
            .with_display_target(true),
    )?;

    let config = SessionConfig::from_json(CONFIG)?;
    let mut session = DjSession::new("demo", config)?;
    session.run()?;
    session.log_status();

    Ok(())
}
