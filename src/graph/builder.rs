use std::collections::{BTreeSet, HashMap};

use petgraph::graph::NodeIndex;
use tracing::{debug, warn};

use super::types::CompatibilityGraph;
use crate::core::Participant;

/// Builder for constructing compatibility graphs
///
/// Every participant becomes a node, isolated or not. For each ordered pair
/// of distinct participants the builder adds `A → B` when any offer of `A`
/// equals any want of `B`. Wants are indexed by item key, so only pairs that
/// share an item are ever compared.
pub struct CompatibilityGraphBuilder {
    graph: CompatibilityGraph,
    nodes: Vec<(NodeIndex, usize)>,
    participants: Vec<Participant>,
}

impl Default for CompatibilityGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CompatibilityGraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: CompatibilityGraph::new(),
            nodes: Vec::new(),
            participants: Vec::new(),
        }
    }

    /// Add participants and every edge they create with those already added
    ///
    /// A participant whose id is already in the graph is skipped.
    pub fn add_participants(&mut self, participants: &[Participant]) -> &mut Self {
        for participant in participants {
            let Some(idx) = self
                .graph
                .add_participant(participant.id(), participant.name())
            else {
                warn!(
                    participant = participant.id(),
                    "skipping participant with an id already in the graph"
                );
                continue;
            };

            self.participants.push(participant.clone());
            self.nodes.push((idx, self.participants.len() - 1));
        }

        self.connect();
        self
    }

    fn connect(&mut self) {
        let mut wanted_by: HashMap<&str, Vec<usize>> = HashMap::new();
        for (slot, &(_, pos)) in self.nodes.iter().enumerate() {
            for want in self.participants[pos].wants() {
                wanted_by.entry(want.key()).or_default().push(slot);
            }
        }

        let mut links = Vec::new();
        for (from_slot, &(from_idx, from_pos)) in self.nodes.iter().enumerate() {
            let giver = &self.participants[from_pos];
            let receivers: BTreeSet<usize> = giver
                .offers()
                .iter()
                .filter_map(|offer| wanted_by.get(offer.key()))
                .flatten()
                .copied()
                .filter(|&slot| slot != from_slot)
                .collect();

            for to_slot in receivers {
                let (to_idx, to_pos) = self.nodes[to_slot];
                let receiver = &self.participants[to_pos];
                if let Some(item) = giver.first_offer_for(receiver) {
                    debug!(
                        giver = giver.id(),
                        receiver = receiver.id(),
                        item = item.label(),
                        "compatible pair"
                    );
                    links.push((from_idx, to_idx));
                }
            }
        }

        for (from, to) in links {
            self.graph.add_edge(from, to);
        }
    }

    pub fn graph(&self) -> &CompatibilityGraph {
        &self.graph
    }

    pub fn into_graph(self) -> CompatibilityGraph {
        self.graph
    }
}

/// Build the compatibility graph for one exchange round
pub fn build_graph(participants: &[Participant]) -> CompatibilityGraph {
    let mut builder = CompatibilityGraphBuilder::new();
    builder.add_participants(participants);
    builder.into_graph()
}
