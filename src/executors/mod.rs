//! Command executors that handle the actual logic for each command

pub mod audit;
pub mod graph;
pub mod matching;

use std::path::PathBuf;

use console::style;
use miette::{Result, WrapErr};

use crate::graph::{CompatibilityGraph, build_graph};
use crate::progress::ProgressReporter;
use crate::store::{LoadedParticipants, load_participants};

/// Trait for command executors
pub trait CommandExecutor {
    type Config;

    /// Execute the command with the given configuration
    fn execute(config: Self::Config) -> Result<()>;
}

/// Load the round's participants and build their compatibility graph
pub(crate) fn load_round(
    paths: &[PathBuf],
    progress: &mut Option<ProgressReporter>,
) -> Result<(LoadedParticipants, CompatibilityGraph)> {
    if let Some(p) = progress.as_mut() {
        p.start_loading();
    }

    let loaded = load_participants(paths, progress.as_ref())
        .wrap_err("Failed to load participant records")?;

    if let Some(p) = progress.as_mut() {
        p.finish_loading(loaded.participants.len(), loaded.files.len());
    }

    let graph = build_graph(loaded.participants.as_slice());
    eprintln!(
        "{} Compatibility graph: {} participants, {} edges",
        style("🔨").blue(),
        style(graph.node_count()).bold(),
        style(graph.edge_count()).bold()
    );

    Ok((loaded, graph))
}
