//! Audit command executor

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};

use super::load_round;
use crate::cli::OutputFormat;
use crate::config::AuditConfig;
use crate::executors::CommandExecutor;
use crate::matcher::audit_cycles;
use crate::progress::ProgressReporter;
use crate::reports::{HumanReportGenerator, JsonReportGenerator, ReportGenerator};

pub struct AuditExecutor;

impl CommandExecutor for AuditExecutor {
    type Config = AuditConfig;

    fn execute(config: Self::Config) -> Result<()> {
        eprintln!(
            "{} Auditing greedy selection against exhaustive selection...\n",
            style("🎡").cyan()
        );

        let mut progress = ProgressReporter::for_terminal();

        let (loaded, graph) = load_round(&config.paths, &mut progress)?;

        if let Some(p) = progress.as_mut() {
            p.start_matching("Running both strategies...");
        }

        let audit = audit_cycles(&graph, &loaded.participants, &config.options);

        if let Some(p) = progress.as_mut() {
            p.finish_matching(audit.exhaustive().accepted_count());
        }

        let report = match config.format {
            OutputFormat::Human => HumanReportGenerator::new(config.max_cycles)
                .generate_audit_report(&audit, &loaded.participants),
            OutputFormat::Json => {
                JsonReportGenerator::new().generate_audit_report(&audit, &loaded.participants)
            }
        }
        .into_diagnostic()
        .wrap_err("Failed to generate audit report")?;

        print!("{report}");

        // Exit with error code if greedy selection left cycles behind and requested
        if config.error_on_skipped && audit.has_skipped() {
            std::process::exit(1);
        }

        Ok(())
    }
}
