//! JSON format report generation

use serde_json::{Value, json};

use super::ReportGenerator;
use super::describe::describe;
use crate::core::{Cycle, ParticipantMap};
use crate::error::BarterWheelError;
use crate::matcher::{CycleAudit, Selection};

pub struct JsonReportGenerator;

impl Default for JsonReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReportGenerator {
    pub fn new() -> Self {
        Self
    }
}

fn selection_value(selection: &Selection, participants: &ParticipantMap) -> Value {
    let descriptions = describe(selection.accepted(), participants);

    let cycles: Vec<Value> = selection
        .accepted_with_claims()
        .zip(descriptions)
        .map(|((cycle, claim), description)| {
            json!({
                "cycle_id": description.cycle_id,
                "participants": cycle.participants(),
                "exchanges": claim.exchanges(),
                "exchange_path": description.exchange_path,
            })
        })
        .collect();

    let mut matched: Vec<&str> = selection.matched_participants().into_iter().collect();
    matched.sort_unstable();

    json!({
        "strategy": selection.strategy(),
        "candidate_count": selection.candidate_count(),
        "cycle_count": selection.accepted_count(),
        "truncated": selection.is_truncated(),
        "matched_participants": matched,
        "cycles": cycles,
        "rejected": selection.rejected(),
    })
}

fn skipped_value(skipped: &[Cycle], participants: &ParticipantMap) -> Vec<Value> {
    skipped
        .iter()
        .zip(describe(skipped, participants))
        .map(|(cycle, description)| {
            json!({
                "participants": cycle.participants(),
                "exchange_path": description.exchange_path,
            })
        })
        .collect()
}

impl ReportGenerator for JsonReportGenerator {
    fn generate_report(
        &self,
        selection: &Selection,
        participants: &ParticipantMap,
    ) -> Result<String, BarterWheelError> {
        let mut report = selection_value(selection, participants);
        report["participant_count"] = json!(participants.len());
        report["has_cycles"] = json!(!selection.is_empty());

        serde_json::to_string_pretty(&report).map_err(BarterWheelError::Json)
    }

    fn generate_audit_report(
        &self,
        audit: &CycleAudit,
        participants: &ParticipantMap,
    ) -> Result<String, BarterWheelError> {
        let report = json!({
            "participant_count": participants.len(),
            "greedy": selection_value(audit.greedy(), participants),
            "exhaustive": selection_value(audit.exhaustive(), participants),
            "skipped_count": audit.skipped().len(),
            "skipped": skipped_value(audit.skipped(), participants),
        });

        serde_json::to_string_pretty(&report).map_err(BarterWheelError::Json)
    }
}
