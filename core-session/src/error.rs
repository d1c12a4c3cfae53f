//! Error types for session setup and orchestration.

use thiserror::Error;

/// Errors that can occur while configuring or running a session.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Configuration value failed validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Referenced playlist does not exist in the configuration.
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(String),

    /// Configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed.
    #[error("Configuration parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The global tracing subscriber could not be installed.
    #[error("Logging initialisation failed: {0}")]
    Logging(String),
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
