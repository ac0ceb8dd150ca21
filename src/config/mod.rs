//! # Configuration Module
//!
//! This module provides configuration structures for all barter-wheel
//! commands. Each command has its own config module with a builder for easy
//! construction.
//!
//! ## Command Configurations
//!
//! - **MatchConfig**: Configuration for the `match` command
//! - **AuditConfig**: Configuration for the `audit` command comparing both
//!   strategies
//! - **GraphOptions**: Configuration for the `graph` command
//!
//! ## Example
//!
//! ```
//! use barter_wheel::cli::{GraphFormat, OutputFormat};
//! use barter_wheel::common::ConfigBuilder;
//! use barter_wheel::config::{GraphOptions, MatchConfig};
//! use barter_wheel::matcher::Strategy;
//!
//! let config = MatchConfig::builder()
//!     .with_paths(vec!["rounds/".into()])
//!     .with_format(OutputFormat::Human)
//!     .with_strategy(Strategy::Exhaustive)
//!     .with_max_len(Some(6))
//!     .build()
//!     .unwrap();
//! assert_eq!(config.options.max_len, Some(6));
//!
//! let graph = GraphOptions::builder()
//!     .with_paths(vec!["rounds/".into()])
//!     .with_format(GraphFormat::Dot)
//!     .with_highlight_cycles(true)
//!     .build()
//!     .unwrap();
//! assert!(graph.highlight_cycles);
//! ```

pub mod audit;
pub mod graph;
pub mod matching;

pub use audit::AuditConfig;
pub use graph::GraphOptions;
pub use matching::MatchConfig;

use crate::error::BarterWheelError;

pub(crate) fn missing_field(field: &str) -> BarterWheelError {
    BarterWheelError::ConfigurationError {
        message: format!("Missing required field: {field}"),
    }
}
