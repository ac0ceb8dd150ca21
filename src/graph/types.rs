//! Core graph types
//!
//! This module contains the fundamental data structures used in the
//! compatibility graph.

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};

/// Represents a participant node in the compatibility graph
#[derive(Debug, Clone)]
pub struct ParticipantNode {
    pub id: String,
    pub name: String,
}

impl ParticipantNode {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Directed "can give to" graph over participants
///
/// One node per participant, in input order, so node indices double as the
/// participants' input positions. An edge `A → B` means some offer of `A`
/// matches some want of `B`; edges carry no weight and never repeat.
#[derive(Debug, Clone, Default)]
pub struct CompatibilityGraph {
    graph: DiGraph<ParticipantNode, ()>,
    indices: HashMap<String, NodeIndex>,
}

impl CompatibilityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, or return `None` if the id is already present
    pub(crate) fn add_participant(&mut self, id: &str, name: &str) -> Option<NodeIndex> {
        if self.indices.contains_key(id) {
            return None;
        }

        let idx = self.graph.add_node(ParticipantNode {
            id: id.to_string(),
            name: name.to_string(),
        });
        self.indices.insert(id.to_string(), idx);
        Some(idx)
    }

    pub(crate) fn add_edge(&mut self, from: NodeIndex, to: NodeIndex) {
        self.graph.update_edge(from, to, ());
    }

    /// The underlying petgraph graph
    pub fn graph(&self) -> &DiGraph<ParticipantNode, ()> {
        &self.graph
    }

    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.indices.get(id).copied()
    }

    pub fn participant_id(&self, idx: NodeIndex) -> &str {
        self.graph[idx].id()
    }

    pub fn participant_ids(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(|node| node.id())
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        match (self.node_index(from), self.node_index(to)) {
            (Some(from), Some(to)) => self.graph.contains_edge(from, to),
            _ => false,
        }
    }

    /// Outgoing neighbours in ascending node order
    ///
    /// petgraph yields neighbours newest-edge-first; sorting keeps every
    /// traversal independent of edge insertion order.
    pub fn successors(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut successors: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .collect();
        successors.sort_unstable();
        successors.dedup();
        successors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_participant_rejects_repeated_id() {
        let mut graph = CompatibilityGraph::new();

        assert!(graph.add_participant("a", "Alpha").is_some());
        assert!(graph.add_participant("a", "Again").is_none());
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.graph()[NodeIndex::new(0)].name(), "Alpha");
    }

    #[test]
    fn test_edges_are_not_duplicated() {
        let mut graph = CompatibilityGraph::new();
        let a = graph.add_participant("a", "a").unwrap();
        let b = graph.add_participant("b", "b").unwrap();

        graph.add_edge(a, b);
        graph.add_edge(a, b);

        assert_eq!(graph.edge_count(), 1);
        assert!(graph.has_edge("a", "b"));
        assert!(!graph.has_edge("b", "a"));
        assert!(!graph.has_edge("a", "missing"));
    }

    #[test]
    fn test_successors_are_sorted() {
        let mut graph = CompatibilityGraph::new();
        let a = graph.add_participant("a", "a").unwrap();
        let b = graph.add_participant("b", "b").unwrap();
        let c = graph.add_participant("c", "c").unwrap();
        let d = graph.add_participant("d", "d").unwrap();

        graph.add_edge(a, d);
        graph.add_edge(a, b);
        graph.add_edge(a, c);

        assert_eq!(graph.successors(a), vec![b, c, d]);
        assert!(graph.successors(d).is_empty());
    }
}
