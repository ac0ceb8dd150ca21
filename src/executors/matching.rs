//! Match command executor

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};

use super::load_round;
use crate::cli::OutputFormat;
use crate::config::MatchConfig;
use crate::executors::CommandExecutor;
use crate::matcher::CycleSelector;
use crate::progress::ProgressReporter;
use crate::reports::{HumanReportGenerator, JsonReportGenerator, ReportGenerator};

pub struct MatchExecutor;

impl CommandExecutor for MatchExecutor {
    type Config = MatchConfig;

    fn execute(config: Self::Config) -> Result<()> {
        eprintln!(
            "{} Matching exchange cycles ({} selection)...\n",
            style("🎡").cyan(),
            config.strategy
        );

        // Create progress reporter if we're in an interactive terminal
        let mut progress = ProgressReporter::for_terminal();

        let (loaded, graph) = load_round(&config.paths, &mut progress)?;

        if loaded.participants.is_empty() {
            eprintln!("{} No participants found to match", style("ℹ").blue());
        }

        if let Some(p) = progress.as_mut() {
            p.start_matching(&format!("Selecting cycles ({} strategy)...", config.strategy));
        }

        let selection = CycleSelector::new(config.strategy)
            .with_options(config.options)
            .select(&graph, &loaded.participants);

        if let Some(p) = progress.as_mut() {
            p.finish_matching(selection.accepted_count());
        }

        let report_result = match config.format {
            OutputFormat::Human => HumanReportGenerator::new(config.max_cycles)
                .with_rejected(config.show_rejected)
                .generate_report(&selection, &loaded.participants),
            OutputFormat::Json => {
                JsonReportGenerator::new().generate_report(&selection, &loaded.participants)
            }
        };

        match report_result {
            Ok(report) => print!("{report}"),
            Err(e) => {
                return Err(e)
                    .into_diagnostic()
                    .wrap_err("Failed to generate report");
            }
        }

        // Exit with error code if nothing matched and requested
        if config.error_on_empty && selection.is_empty() {
            std::process::exit(1);
        }

        Ok(())
    }
}
