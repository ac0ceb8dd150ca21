//! Match command configuration

use std::path::PathBuf;

use super::missing_field;
use crate::cli::OutputFormat;
use crate::matcher::{MatchingOptions, Strategy};

/// Configuration for the match command
///
/// This struct contains all options for selecting exchange cycles and
/// reporting them.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Record files, directories or glob patterns to load
    pub paths: Vec<PathBuf>,
    /// Output format for the report
    pub format: OutputFormat,
    /// Cycle selection strategy
    pub strategy: Strategy,
    /// Enumeration bounds
    pub options: MatchingOptions,
    /// Maximum number of cycles to report (None = all)
    pub max_cycles: Option<usize>,
    /// Whether to list rejected candidates
    pub show_rejected: bool,
    /// Whether to exit with error code if no cycle is accepted
    pub error_on_empty: bool,
}

impl MatchConfig {
    pub fn builder() -> MatchConfigBuilder {
        MatchConfigBuilder::new()
    }
}

/// Builder for [`MatchConfig`]
///
/// `paths` and `format` are required; everything else has a default.
#[derive(Default)]
pub struct MatchConfigBuilder {
    paths: Option<Vec<PathBuf>>,
    format: Option<OutputFormat>,
    strategy: Strategy,
    options: MatchingOptions,
    max_cycles: Option<usize>,
    show_rejected: bool,
    error_on_empty: bool,
}

impl MatchConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.paths = Some(paths);
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_max_len(mut self, max_len: Option<usize>) -> Self {
        self.options.max_len = max_len;
        self
    }

    pub fn with_cycle_limit(mut self, cycle_limit: Option<usize>) -> Self {
        self.options.cycle_limit = cycle_limit;
        self
    }

    pub fn with_max_cycles(mut self, max_cycles: Option<usize>) -> Self {
        self.max_cycles = max_cycles;
        self
    }

    pub fn with_show_rejected(mut self, show_rejected: bool) -> Self {
        self.show_rejected = show_rejected;
        self
    }

    pub fn with_error_on_empty(mut self, error_on_empty: bool) -> Self {
        self.error_on_empty = error_on_empty;
        self
    }
}

impl crate::common::ConfigBuilder for MatchConfigBuilder {
    type Config = MatchConfig;

    fn build(self) -> Result<Self::Config, crate::error::BarterWheelError> {
        Ok(MatchConfig {
            paths: self.paths.ok_or_else(|| missing_field("paths"))?,
            format: self.format.ok_or_else(|| missing_field("format"))?,
            strategy: self.strategy,
            options: self.options,
            max_cycles: self.max_cycles,
            show_rejected: self.show_rejected,
            error_on_empty: self.error_on_empty,
        })
    }
}
