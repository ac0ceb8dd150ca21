//! Configuration constants for barter-wheel
//!
//! This module contains all configurable constants used throughout the
//! application. Most of them are defaults that command-line flags or
//! environment variables can override.

use std::time::Duration;

/// Progress bar configuration
pub mod progress {
    use super::*;

    /// Duration between progress bar updates
    pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

    /// Spinner frames for the exchange ring animation
    pub const SPINNER_FRAMES: &[&str] = &["◴ ", "◷ ", "◶ ", "◵ "];

    /// Frame shown once a spinner finishes
    pub const FINISHED_FRAME: &str = "✓";
}

/// Output formatting configuration
pub mod output {
    /// Default output format when not specified
    pub const DEFAULT_FORMAT: &str = "human";

    /// Default log filter when neither `--log-level` nor `RUST_LOG` is set
    pub const DEFAULT_LOG_LEVEL: &str = "warn";
}

/// Cycle matching configuration
pub mod matching {
    /// Smallest ring the engine will ever report; 2-party swaps and self
    /// loops are not exchanges
    pub const MIN_CYCLE_PARTICIPANTS: usize = 3;

    /// Default upper bound on participants per cycle
    pub const DEFAULT_MAX_CYCLE_LEN: usize = 10;
}

/// Participant store configuration
pub mod store {
    /// File extensions recognised as participant record files
    pub const RECORD_EXTENSIONS: &[&str] = &["json", "toml"];
}
