//! Logging initialisation helpers.
//!
//! Thin wrapper over `tracing-subscriber`: sessions and demos call
//! [`init_logging`] once at startup; library code only ever emits through
//! the `tracing` macros.

use tracing_subscriber::EnvFilter;

use crate::error::{Result, SessionError};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable format with colors.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// Structured JSON for machine parsing.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    /// Output format.
    pub format: LogFormat,
    /// Custom filter directive (e.g., `"core_cache=debug,info"`). Falls
    /// back to the `RUST_LOG` environment variable, then to `info`.
    pub filter: Option<String>,
    /// Display the emitting module target in log lines.
    pub display_target: bool,
}

impl LoggingConfig {
    /// Sets the output format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets a custom filter directive.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Enables or disables the module target in log lines.
    pub fn with_display_target(mut self, enabled: bool) -> Self {
        self.display_target = enabled;
        self
    }
}

/// Installs the global tracing subscriber.
///
/// Fails when a subscriber is already installed or the filter directive
/// does not parse.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let filter = match &config.filter {
        Some(custom) => {
            EnvFilter::try_new(custom).map_err(|e| SessionError::Logging(e.to_string()))?
        }
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.display_target);

    let result = match config.format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    result.map_err(|e| SessionError::Logging(e.to_string()))
}
