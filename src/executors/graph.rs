//! Graph command executor

use std::fs::File;
use std::io::{self, BufWriter, Write};

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};

use super::load_round;
use crate::cli::GraphFormat;
use crate::config::GraphOptions;
use crate::executors::CommandExecutor;
use crate::graph::GraphRenderer;
use crate::matcher::CycleSelector;

pub struct GraphExecutor;

impl CommandExecutor for GraphExecutor {
    type Config = GraphOptions;

    fn execute(config: Self::Config) -> Result<()> {
        eprintln!(
            "{} Generating {} compatibility graph...",
            style("📊").cyan(),
            format!("{:?}", config.format).to_lowercase()
        );

        let (loaded, graph) = load_round(&config.paths, &mut None)?;

        if graph.is_empty() {
            eprintln!("{} No participants found to visualize", style("ℹ").blue());
            return Ok(());
        }

        // Select cycles only if highlighting is requested
        let cycles = if config.highlight_cycles {
            CycleSelector::new(config.strategy)
                .with_options(config.options)
                .select(&graph, &loaded.participants)
                .into_accepted()
        } else {
            Vec::new()
        };

        let renderer = GraphRenderer::new(config.highlight_cycles, config.show_items);

        // Determine output destination
        let mut output_writer: Box<dyn Write> =
            if let Some(output_path) = config.output.as_ref() {
                Box::new(BufWriter::new(
                    File::create(output_path)
                        .into_diagnostic()
                        .wrap_err_with(|| {
                            format!("Failed to create output file '{}'", output_path.display())
                        })?,
                ))
            } else {
                Box::new(io::stdout())
            };

        match config.format {
            GraphFormat::Ascii => renderer
                .render_ascii(&graph, &loaded.participants, &cycles, output_writer.as_mut())
                .wrap_err("Failed to render ASCII graph")?,
            GraphFormat::Mermaid => renderer
                .render_mermaid(&graph, &loaded.participants, &cycles, output_writer.as_mut())
                .wrap_err("Failed to render Mermaid graph")?,
            GraphFormat::Dot => renderer
                .render_dot(&graph, &loaded.participants, &cycles, output_writer.as_mut())
                .wrap_err("Failed to render DOT graph")?,
        }

        output_writer
            .flush()
            .into_diagnostic()
            .wrap_err("Failed to write graph output")?;

        if let Some(output_path) = config.output {
            eprintln!(
                "{} Graph written to {}",
                style("✓").green(),
                style(output_path.display()).bold()
            );
        }

        Ok(())
    }
}
