//! Diagnostic logging setup
//!
//! Reports go to stdout; log events always go to stderr so they never mix
//! with JSON output.

use std::fmt;

use tracing_subscriber::{EnvFilter, fmt as subscriber};

use crate::constants::output::DEFAULT_LOG_LEVEL;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.into(),
            format: LogFormat::Pretty,
        }
    }
}

impl LoggingConfig {
    pub fn new(level: Option<String>, format: LogFormat) -> Self {
        Self {
            level: level.unwrap_or_else(|| DEFAULT_LOG_LEVEL.into()),
            format,
        }
    }

    /// `RUST_LOG` wins over the configured level when it is set and valid
    pub fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
    }

    /// Install the global tracing subscriber
    ///
    /// Does nothing if a subscriber is already installed.
    pub fn init(&self) {
        let filter = self.filter();

        let _ = match self.format {
            LogFormat::Json => subscriber()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
            LogFormat::Pretty => subscriber()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init(),
        };
    }
}
