use std::collections::HashSet;

use tracing::info;

use super::selector::{CycleSelector, MatchingOptions, Selection, Strategy};
use crate::core::{Cycle, ParticipantMap};
use crate::graph::CompatibilityGraph;

/// Side-by-side outcome of both strategies on the same round
#[derive(Debug, Clone)]
pub struct CycleAudit {
    greedy: Selection,
    exhaustive: Selection,
    skipped: Vec<Cycle>,
}

impl CycleAudit {
    /// Compare two selections; `skipped` lists the exhaustive cycles the
    /// greedy run did not accept, in exhaustive order
    pub fn from_selections(greedy: Selection, exhaustive: Selection) -> Self {
        let chosen: HashSet<&Cycle> = greedy.accepted().iter().collect();
        let skipped = exhaustive
            .accepted()
            .iter()
            .filter(|cycle| !chosen.contains(cycle))
            .cloned()
            .collect();

        Self {
            greedy,
            exhaustive,
            skipped,
        }
    }

    pub fn greedy(&self) -> &Selection {
        &self.greedy
    }

    pub fn exhaustive(&self) -> &Selection {
        &self.exhaustive
    }

    pub fn skipped(&self) -> &[Cycle] {
        &self.skipped
    }

    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }

    /// Whether either run stopped at its cycle limit
    pub fn is_truncated(&self) -> bool {
        self.greedy.is_truncated() || self.exhaustive.is_truncated()
    }
}

/// Run greedy and exhaustive selection side by side
///
/// The two runs share the read-only graph and participants but nothing else;
/// each starts from its own consumed-offer state.
pub fn audit_cycles(
    graph: &CompatibilityGraph,
    participants: &ParticipantMap,
    options: &MatchingOptions,
) -> CycleAudit {
    let (greedy, exhaustive) = rayon::join(
        || {
            CycleSelector::new(Strategy::Greedy)
                .with_options(*options)
                .select(graph, participants)
        },
        || {
            CycleSelector::new(Strategy::Exhaustive)
                .with_options(*options)
                .select(graph, participants)
        },
    );

    let audit = CycleAudit::from_selections(greedy, exhaustive);
    info!(
        greedy = audit.greedy.accepted_count(),
        exhaustive = audit.exhaustive.accepted_count(),
        skipped = audit.skipped.len(),
        "audit finished"
    );
    audit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ConfigBuilder;
    use crate::core::Participant;
    use crate::graph::build_graph;

    fn participant(id: &str, offers: &[&str], wants: &[&str]) -> Participant {
        Participant::builder()
            .with_id(id)
            .with_offers(offers)
            .with_wants(wants)
            .build()
            .unwrap()
    }

    fn audit(participants: Vec<Participant>) -> CycleAudit {
        let graph = build_graph(&participants);
        let participants = ParticipantMap::new(participants).unwrap();
        audit_cycles(&graph, &participants, &MatchingOptions::default())
    }

    #[test]
    fn test_audit_reports_cycles_greedy_skipped() {
        let audit = audit(vec![
            participant("a", &["a"], &["c"]),
            participant("b", &["b1", "b2"], &["a", "d"]),
            participant("c", &["c"], &["b1"]),
            participant("d", &["d"], &["e"]),
            participant("e", &["e"], &["b2"]),
        ]);

        assert_eq!(audit.greedy().accepted_count(), 1);
        assert_eq!(audit.exhaustive().accepted_count(), 2);
        assert_eq!(audit.skipped().len(), 1);
        assert_eq!(audit.skipped()[0].to_string(), "b → e → d → b");
        assert!(audit.has_skipped());
    }

    #[test]
    fn test_audit_without_differences() {
        let audit = audit(vec![
            participant("a", &["X"], &["Y"]),
            participant("b", &["Y"], &["Z"]),
            participant("c", &["Z"], &["X"]),
        ]);

        assert_eq!(audit.greedy().accepted(), audit.exhaustive().accepted());
        assert!(!audit.has_skipped());
        assert!(!audit.is_truncated());
    }

    #[test]
    fn test_skipped_uses_exact_cycle_equality() {
        // Greedy keeps the square, exhaustive keeps the triangle
        let audit = audit(vec![
            participant("a", &["X"], &["C", "F"]),
            participant("b", &["B"], &["X"]),
            participant("c", &["C"], &["B"]),
            participant("d", &["D"], &["X"]),
            participant("e", &["E"], &["D"]),
            participant("f", &["F"], &["E"]),
        ]);

        assert_eq!(audit.skipped().len(), 1);
        assert_eq!(audit.skipped()[0].to_string(), "a → b → c → a");
    }
}
