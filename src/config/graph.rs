//! Graph command configuration

use std::path::PathBuf;

use super::missing_field;
use crate::cli::GraphFormat;
use crate::matcher::{MatchingOptions, Strategy};

#[derive(Debug, Clone)]
pub struct GraphOptions {
    pub paths: Vec<PathBuf>,
    pub format: GraphFormat,
    pub output: Option<PathBuf>,
    pub strategy: Strategy,
    pub options: MatchingOptions,
    pub highlight_cycles: bool,
    pub show_items: bool,
}

impl GraphOptions {
    pub fn builder() -> GraphOptionsBuilder {
        GraphOptionsBuilder::new()
    }
}

#[derive(Default)]
pub struct GraphOptionsBuilder {
    paths: Option<Vec<PathBuf>>,
    format: Option<GraphFormat>,
    output: Option<PathBuf>,
    strategy: Strategy,
    options: MatchingOptions,
    highlight_cycles: Option<bool>,
    show_items: bool,
}

impl GraphOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.paths = Some(paths);
        self
    }

    pub fn with_format(mut self, format: GraphFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
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

    pub fn with_highlight_cycles(mut self, highlight_cycles: bool) -> Self {
        self.highlight_cycles = Some(highlight_cycles);
        self
    }

    pub fn with_show_items(mut self, show_items: bool) -> Self {
        self.show_items = show_items;
        self
    }
}

impl crate::common::ConfigBuilder for GraphOptionsBuilder {
    type Config = GraphOptions;

    fn build(self) -> Result<Self::Config, crate::error::BarterWheelError> {
        Ok(GraphOptions {
            paths: self.paths.ok_or_else(|| missing_field("paths"))?,
            format: self.format.ok_or_else(|| missing_field("format"))?,
            output: self.output,
            strategy: self.strategy,
            options: self.options,
            highlight_cycles: self.highlight_cycles.unwrap_or(true),
            show_items: self.show_items,
        })
    }
}
