//! Command implementations for barter-wheel CLI
//!
//! This module contains the implementations for each CLI command:
//! - match: Select exchange cycles with one strategy
//! - audit: Compare greedy and exhaustive selection
//! - graph: Render the compatibility graph

pub mod audit;
pub mod graph;
pub mod matching;

use miette::Result;

use crate::cli::Commands;

/// Execute a command based on CLI input
pub fn execute_command(command: Commands) -> Result<()> {
    match &command {
        Commands::Match { .. } => matching::execute_match_command(command),
        Commands::Audit { .. } => audit::execute_audit_command(command),
        Commands::Graph { .. } => graph::execute_graph_command(command),
    }
}
