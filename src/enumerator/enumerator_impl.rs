use std::collections::HashMap;

use petgraph::algo::kosaraju_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::unionfind::UnionFind;
use petgraph::visit::{EdgeRef, NodeFiltered};
use tracing::{debug, warn};

use crate::constants::matching::MIN_CYCLE_PARTICIPANTS;
use crate::core::Cycle;
use crate::graph::CompatibilityGraph;

/// Enumerator for simple cycles in a compatibility graph
///
/// Each cycle is reported once, rooted at its member with the smallest node
/// index, and closed by repeating that root. A cycle and its reverse are
/// different exchanges and are both reported when both exist.
pub struct CycleEnumerator {
    max_len: Option<usize>,
    cycle_limit: Option<usize>,
    cycles: Vec<Cycle>,
    truncated: bool,
}

/// The subgraph induced by one pass's members
///
/// Local node `i` is the `i`-th member in ascending order, so local order
/// is participant input order and successor lists stay ascending.
struct Subgraph {
    members: Vec<NodeIndex>,
    successors: Vec<Vec<NodeIndex>>,
    graph: DiGraph<(), ()>,
}

impl Subgraph {
    fn new(graph: &CompatibilityGraph, members: &[NodeIndex]) -> Self {
        let mut members = members.to_vec();
        members.sort_unstable();
        members.dedup();

        let local_of: HashMap<NodeIndex, NodeIndex> = members
            .iter()
            .enumerate()
            .map(|(local, &global)| (global, NodeIndex::new(local)))
            .collect();

        let successors: Vec<Vec<NodeIndex>> = members
            .iter()
            .map(|&global| {
                graph
                    .successors(global)
                    .into_iter()
                    .filter_map(|next| local_of.get(&next).copied())
                    .collect()
            })
            .collect();

        let mut inner = DiGraph::with_capacity(members.len(), 0);
        for _ in &members {
            inner.add_node(());
        }
        for (from, targets) in successors.iter().enumerate() {
            for &to in targets {
                inner.add_edge(NodeIndex::new(from), to, ());
            }
        }

        Self {
            members,
            successors,
            graph: inner,
        }
    }

    fn len(&self) -> usize {
        self.members.len()
    }

    /// The strongly connected component of the nodes at or above `lowest`
    /// that holds the smallest node and can carry a cycle
    fn next_component(&self, lowest: usize) -> Option<Vec<NodeIndex>> {
        let view = NodeFiltered::from_fn(&self.graph, move |node: NodeIndex| {
            node.index() >= lowest
        });

        kosaraju_scc(&view)
            .into_iter()
            .filter(|scc| scc.len() >= MIN_CYCLE_PARTICIPANTS)
            .min_by_key(|scc| scc.iter().min().copied())
    }
}

impl Default for CycleEnumerator {
    fn default() -> Self {
        Self::new(None)
    }
}

impl CycleEnumerator {
    /// Create an enumerator; `max_len` bounds cycles by participant count
    pub fn new(max_len: Option<usize>) -> Self {
        Self {
            max_len,
            cycle_limit: None,
            cycles: Vec::new(),
            truncated: false,
        }
    }

    /// Stop once this many cycles are collected and another one turns up
    pub fn with_cycle_limit(mut self, cycle_limit: Option<usize>) -> Self {
        self.cycle_limit = cycle_limit;
        self
    }

    /// Enumerate cycles over the whole graph
    pub fn enumerate(&mut self, graph: &CompatibilityGraph) -> &[Cycle] {
        let members: Vec<NodeIndex> = graph.graph().node_indices().collect();
        self.enumerate_within(graph, &members)
    }

    /// Enumerate cycles of the subgraph induced by `members`
    ///
    /// Results accumulate across calls until [`CycleEnumerator::clear`].
    /// Work stays proportional to the members and their edges, not to the
    /// whole graph.
    pub fn enumerate_within(
        &mut self,
        graph: &CompatibilityGraph,
        members: &[NodeIndex],
    ) -> &[Cycle] {
        let start = self.cycles.len();
        let subgraph = Subgraph::new(graph, members);

        // Every cycle through a root lies in the root's component of the
        // nodes at or above it; roots with no such component are skipped
        let mut lowest = 0;
        while lowest < subgraph.len() && !self.truncated {
            let Some(component) = subgraph.next_component(lowest) else {
                break;
            };
            let Some(&root) = component.iter().min() else {
                break;
            };

            let mut in_component = vec![false; subgraph.len()];
            for node in &component {
                in_component[node.index()] = true;
            }

            self.search(graph, &subgraph, root, &in_component);
            lowest = root.index() + 1;
        }

        debug!(
            members = subgraph.len(),
            found = self.cycles.len() - start,
            truncated = self.truncated,
            "cycle enumeration pass finished"
        );

        &self.cycles[start..]
    }

    /// Depth-first search from `root` over an explicit frame stack
    ///
    /// Each frame holds a path node and the position of the next successor
    /// to try, so path length never grows the call stack.
    fn search(
        &mut self,
        graph: &CompatibilityGraph,
        subgraph: &Subgraph,
        root: NodeIndex,
        in_component: &[bool],
    ) {
        let mut on_path = vec![false; subgraph.len()];
        on_path[root.index()] = true;
        let mut path: Vec<NodeIndex> = vec![root];
        let mut frames: Vec<(NodeIndex, usize)> = vec![(root, 0)];

        while let Some(frame) = frames.last_mut() {
            if self.truncated {
                return;
            }

            let (node, position) = *frame;
            let Some(&next) = subgraph.successors[node.index()].get(position) else {
                frames.pop();
                path.pop();
                on_path[node.index()] = false;
                continue;
            };
            frame.1 += 1;

            if !in_component[next.index()] {
                continue;
            }

            if next == root {
                if path.len() >= MIN_CYCLE_PARTICIPANTS {
                    self.record(graph, subgraph, &path);
                }
                continue;
            }

            if on_path[next.index()] || self.max_len.is_some_and(|max| path.len() >= max) {
                continue;
            }

            path.push(next);
            on_path[next.index()] = true;
            frames.push((next, 0));
        }
    }

    fn record(&mut self, graph: &CompatibilityGraph, subgraph: &Subgraph, path: &[NodeIndex]) {
        if self.limit_reached() {
            self.truncated = true;
            warn!(
                limit = self.cycle_limit,
                "cycle limit reached, remaining cycles are not enumerated"
            );
            return;
        }

        let ids: Vec<String> = path
            .iter()
            .map(|local| {
                graph
                    .participant_id(subgraph.members[local.index()])
                    .to_string()
            })
            .collect();

        // The search only closes simple paths of MIN_CYCLE_PARTICIPANTS or
        // more, so validation cannot fail here
        if let Ok(cycle) = Cycle::from_open(ids) {
            self.cycles.push(cycle);
        }
    }

    fn limit_reached(&self) -> bool {
        self.cycle_limit
            .is_some_and(|limit| self.cycles.len() >= limit)
    }

    /// Get all enumerated cycles, in discovery order
    pub fn cycles(&self) -> &[Cycle] {
        &self.cycles
    }

    pub fn into_cycles(self) -> Vec<Cycle> {
        self.cycles
    }

    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }

    pub fn cycle_count(&self) -> usize {
        self.cycles.len()
    }

    /// Whether the cycle limit cut enumeration short
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Drop collected cycles so the enumerator can run another pass
    pub fn clear(&mut self) {
        self.cycles.clear();
        self.truncated = false;
    }
}

/// Partition the graph into weakly connected components
///
/// Edge direction is ignored. Components are ordered by their smallest node
/// index and list their nodes in ascending order.
pub fn weakly_connected_components(graph: &CompatibilityGraph) -> Vec<Vec<NodeIndex>> {
    let inner = graph.graph();
    let mut sets = UnionFind::<usize>::new(inner.node_count());
    for edge in inner.edge_references() {
        sets.union(edge.source().index(), edge.target().index());
    }

    let mut components: Vec<Vec<NodeIndex>> = Vec::new();
    let mut component_of_root: HashMap<usize, usize> = HashMap::new();
    for idx in inner.node_indices() {
        let root = sets.find(idx.index());
        let position = *component_of_root.entry(root).or_insert_with(|| {
            components.push(Vec::new());
            components.len() - 1
        });
        components[position].push(idx);
    }

    components
}
