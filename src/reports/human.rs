//! Human-readable console report generation

use std::fmt::Write;

use console::style;

use super::ReportGenerator;
use super::describe::describe;
use crate::core::{Cycle, ParticipantMap};
use crate::error::BarterWheelError;
use crate::matcher::{CycleAudit, Selection};
use crate::utils::string::pluralize;

pub struct HumanReportGenerator {
    max_cycles: Option<usize>,
    show_rejected: bool,
}

impl HumanReportGenerator {
    pub fn new(max_cycles: Option<usize>) -> Self {
        Self {
            max_cycles,
            show_rejected: false,
        }
    }

    pub fn with_rejected(mut self, show_rejected: bool) -> Self {
        self.show_rejected = show_rejected;
        self
    }

    fn write_cycles(
        &self,
        output: &mut String,
        cycles: &[Cycle],
        participants: &ParticipantMap,
    ) -> Result<(), BarterWheelError> {
        let shown = self.max_cycles.unwrap_or(cycles.len()).min(cycles.len());

        for (description, cycle) in describe(&cycles[..shown], participants)
            .iter()
            .zip(cycles)
        {
            writeln!(
                output,
                "{} Cycle #{} ({} {})",
                style("🔄").yellow(),
                description.cycle_id + 1,
                cycle.participant_count(),
                pluralize("participant", cycle.participant_count())
            )?;
            writeln!(output, "  {} {}", style("👥").blue(), style(cycle).bold())?;
            for line in description.lines() {
                writeln!(output, "    {} {}", style("→").dim(), line)?;
            }
            writeln!(output)?;
        }

        if shown < cycles.len() {
            writeln!(
                output,
                "{} Showing {} of {} cycles. Use --max-cycles to see more.",
                style("ℹ️").blue(),
                style(shown).yellow(),
                style(cycles.len()).yellow()
            )?;
        }

        Ok(())
    }

    fn write_truncation_note(&self, output: &mut String) -> Result<(), BarterWheelError> {
        writeln!(
            output,
            "{} Enumeration stopped at the cycle limit, so more cycles may exist. Raise \
             --cycle-limit to search further.",
            style("⚠").yellow()
        )?;
        Ok(())
    }
}

impl ReportGenerator for HumanReportGenerator {
    fn generate_report(
        &self,
        selection: &Selection,
        participants: &ParticipantMap,
    ) -> Result<String, BarterWheelError> {
        let mut output = String::new();

        if selection.is_empty() {
            write!(
                output,
                "\n{} No exchange cycles found among {} {} ({} selection).\n",
                style("❌").red().bold(),
                style(participants.len()).bold(),
                pluralize("participant", participants.len()),
                selection.strategy()
            )?;
        } else {
            let matched = selection.matched_participants().len();
            write!(
                output,
                "\n{} Matched {} exchange {} covering {} {} ({} selection, {} {}):\n\n",
                style("✅").green().bold(),
                style(selection.accepted_count()).green().bold(),
                pluralize("cycle", selection.accepted_count()),
                style(matched).bold(),
                pluralize("participant", matched),
                selection.strategy(),
                selection.candidate_count(),
                pluralize("candidate", selection.candidate_count())
            )?;

            self.write_cycles(&mut output, selection.accepted(), participants)?;
        }

        if self.show_rejected && !selection.rejected().is_empty() {
            writeln!(
                output,
                "\n{} {} rejected {}:",
                style("🚫").red(),
                selection.rejected().len(),
                pluralize("candidate", selection.rejected().len())
            )?;
            for rejected in selection.rejected() {
                writeln!(
                    output,
                    "  {} {} {}",
                    style("•").dim(),
                    style(&rejected.cycle).bold(),
                    style(format!("({})", rejected.reason)).dim()
                )?;
            }
        }

        if selection.is_truncated() {
            writeln!(output)?;
            self.write_truncation_note(&mut output)?;
        }

        Ok(output)
    }

    fn generate_audit_report(
        &self,
        audit: &CycleAudit,
        participants: &ParticipantMap,
    ) -> Result<String, BarterWheelError> {
        let mut output = String::new();

        writeln!(output, "\n{} Strategy comparison\n", style("📊").blue())?;
        for selection in [audit.greedy(), audit.exhaustive()] {
            let matched = selection.matched_participants().len();
            writeln!(
                output,
                "  {:<12} {} {}, {} {} matched",
                style(selection.strategy()).bold(),
                style(selection.accepted_count()).yellow(),
                pluralize("cycle", selection.accepted_count()),
                matched,
                pluralize("participant", matched)
            )?;
        }
        writeln!(output)?;

        if audit.has_skipped() {
            writeln!(
                output,
                "{} Greedy selection skipped {} {} that exhaustive selection accepted:\n",
                style("❌").red().bold(),
                style(audit.skipped().len()).red().bold(),
                pluralize("cycle", audit.skipped().len())
            )?;
            self.write_cycles(&mut output, audit.skipped(), participants)?;
        } else {
            writeln!(
                output,
                "{} Greedy selection kept every cycle exhaustive selection accepted.",
                style("✅").green().bold()
            )?;
        }

        if audit.is_truncated() {
            writeln!(output)?;
            self.write_truncation_note(&mut output)?;
        }

        Ok(output)
    }
}
