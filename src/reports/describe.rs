//! Plain-text descriptions of accepted cycles

use serde::Serialize;

use crate::core::{Cycle, ParticipantMap};

/// One accepted cycle, rendered as the hand-overs it performs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleDescription {
    /// Zero-based position of the cycle in the input list
    pub cycle_id: usize,
    /// One line per hand-over, joined by newlines
    pub exchange_path: String,
}

impl CycleDescription {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.exchange_path.lines()
    }
}

/// Describe each cycle as `"{giver} offers '{item}' → to {receiver}"` lines
///
/// The item shown is the giver's first offer the receiver wants. Hand-overs
/// whose participants are unknown or no longer match are left out rather
/// than failing the whole description.
pub fn describe(cycles: &[Cycle], participants: &ParticipantMap) -> Vec<CycleDescription> {
    cycles
        .iter()
        .enumerate()
        .map(|(cycle_id, cycle)| {
            let lines: Vec<String> = cycle
                .exchanges()
                .filter_map(|(giver_id, receiver_id)| {
                    let giver = participants.get(giver_id)?;
                    let receiver = participants.get(receiver_id)?;
                    let item = giver.first_offer_for(receiver)?;
                    Some(format!(
                        "{} offers '{}' → to {}",
                        giver.name(),
                        item.label(),
                        receiver.name()
                    ))
                })
                .collect();

            CycleDescription {
                cycle_id,
                exchange_path: lines.join("\n"),
            }
        })
        .collect()
}
