//! Audit command configuration

use std::path::PathBuf;

use super::missing_field;
use crate::cli::OutputFormat;
use crate::matcher::MatchingOptions;

/// Configuration for the audit command
#[derive(Debug, Clone)]
pub struct AuditConfig {
    pub paths: Vec<PathBuf>,
    pub format: OutputFormat,
    pub options: MatchingOptions,
    pub max_cycles: Option<usize>,
    /// Whether to exit with error code if greedy selection skipped cycles
    pub error_on_skipped: bool,
}

impl AuditConfig {
    pub fn builder() -> AuditConfigBuilder {
        AuditConfigBuilder::new()
    }
}

#[derive(Default)]
pub struct AuditConfigBuilder {
    paths: Option<Vec<PathBuf>>,
    format: Option<OutputFormat>,
    options: MatchingOptions,
    max_cycles: Option<usize>,
    error_on_skipped: bool,
}

impl AuditConfigBuilder {
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

    pub fn with_error_on_skipped(mut self, error_on_skipped: bool) -> Self {
        self.error_on_skipped = error_on_skipped;
        self
    }
}

impl crate::common::ConfigBuilder for AuditConfigBuilder {
    type Config = AuditConfig;

    fn build(self) -> Result<Self::Config, crate::error::BarterWheelError> {
        Ok(AuditConfig {
            paths: self.paths.ok_or_else(|| missing_field("paths"))?,
            format: self.format.ok_or_else(|| missing_field("format"))?,
            options: self.options,
            max_cycles: self.max_cycles,
            error_on_skipped: self.error_on_skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ConfigBuilder;

    #[test]
    fn test_builder() {
        let config = AuditConfig::builder()
            .with_paths(vec![PathBuf::from("rounds")])
            .with_format(OutputFormat::Json)
            .with_max_len(Some(4))
            .with_error_on_skipped(true)
            .build()
            .unwrap();

        assert_eq!(config.options.max_len, Some(4));
        assert_eq!(config.options.cycle_limit, None);
        assert!(config.error_on_skipped);
    }

    #[test]
    fn test_builder_requires_paths() {
        let result = AuditConfig::builder()
            .with_format(OutputFormat::Human)
            .build();

        assert!(result.is_err());
    }
}
