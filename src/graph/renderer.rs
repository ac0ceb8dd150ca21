use std::collections::{HashMap, HashSet};
use std::io::Write;

use miette::Result;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

use super::types::CompatibilityGraph;
use crate::core::{Cycle, ParticipantMap};
use crate::error::BarterWheelError;

// Blue-Orange Accessible Palette - Soothing colors with excellent contrast
mod colors {
    pub const NORMAL_NODE_FILL: &str = "#E3F2FD"; // Light blue
    pub const NORMAL_NODE_STROKE: &str = "#1976D2"; // Medium blue
    pub const CYCLE_NODE_FILL: &str = "#FFF3E0"; // Light orange
    pub const CYCLE_NODE_STROKE: &str = "#F57C00"; // Vibrant orange
    pub const NORMAL_EDGE: &str = "#64B5F6"; // Soft blue
    pub const CYCLE_EDGE: &str = "#FF6500"; // Deep orange
    pub const LEGEND_BG: &str = "#FAFAFA"; // Off-white background
}

// Helper macro for write operations that converts IO errors
macro_rules! writeln_out {
    ($dst:expr) => {
        writeln!($dst).map_err(BarterWheelError::from)
    };
    ($dst:expr, $($arg:tt)*) => {
        writeln!($dst, $($arg)*).map_err(BarterWheelError::from)
    };
}

/// Hand-overs and members of the highlighted cycles
struct Highlights<'a> {
    edges: HashMap<&'a str, HashSet<&'a str>>,
    members: HashSet<&'a str>,
}

impl<'a> Highlights<'a> {
    fn new(cycles: &'a [Cycle]) -> Self {
        let mut edges: HashMap<&'a str, HashSet<&'a str>> = HashMap::new();
        for (from, to) in cycles.iter().flat_map(Cycle::exchanges) {
            edges.entry(from).or_default().insert(to);
        }

        Self {
            edges,
            members: cycles
                .iter()
                .flat_map(|cycle| cycle.members().iter().map(String::as_str))
                .collect(),
        }
    }

    fn has_edge(&self, from: &str, to: &str) -> bool {
        self.edges
            .get(from)
            .is_some_and(|targets| targets.contains(to))
    }

    fn has_member(&self, id: &str) -> bool {
        self.members.contains(id)
    }
}

pub struct GraphRenderer {
    highlight_cycles: bool,
    show_items: bool,
}

impl GraphRenderer {
    pub fn new(highlight_cycles: bool, show_items: bool) -> Self {
        Self {
            highlight_cycles,
            show_items,
        }
    }

    pub fn render_ascii(
        &self,
        graph: &CompatibilityGraph,
        participants: &ParticipantMap,
        cycles: &[Cycle],
        output: &mut dyn Write,
    ) -> Result<()> {
        if graph.is_empty() {
            writeln_out!(output, "No participants found to visualize")?;
            return Ok(());
        }

        writeln_out!(output, "\n📊 Compatibility Graph\n")?;

        let highlights = Highlights::new(cycles);

        // Sort nodes by id for consistent output
        let mut nodes: Vec<NodeIndex> = graph.graph().node_indices().collect();
        nodes.sort_by_key(|&idx| graph.participant_id(idx));

        for node_idx in nodes {
            let id = graph.participant_id(node_idx);
            let label = self.node_label(graph, node_idx);

            if highlights.has_member(id) && self.highlight_cycles {
                writeln_out!(output, "┌─────────────────────────────────────┐")?;
                writeln_out!(output, "│ {} 🔄 IN CYCLE", label)?;
                writeln_out!(output, "└─────────────────────────────────────┘")?;
            } else {
                writeln_out!(output, "{}", label)?;
            }

            let mut targets = graph.successors(node_idx);
            targets.sort_by_key(|&idx| graph.participant_id(idx));

            if targets.is_empty() {
                writeln_out!(output, "  └── (no compatible receivers)")?;
            }

            for (i, &target_idx) in targets.iter().enumerate() {
                let target = graph.participant_id(target_idx);
                let prefix = if i == targets.len() - 1 {
                    "└──"
                } else {
                    "├──"
                };

                let item = self
                    .edge_item(participants, id, target)
                    .map(|item| format!(" ({item})"))
                    .unwrap_or_default();

                let cycle_marker = if highlights.has_edge(id, target) && self.highlight_cycles {
                    " 🔄 [CYCLE]"
                } else {
                    ""
                };

                writeln_out!(
                    output,
                    "  {} → {}{}{}",
                    prefix,
                    self.node_label(graph, target_idx),
                    item,
                    cycle_marker
                )?;
            }

            writeln_out!(output)?; // Empty line between participants
        }

        if !cycles.is_empty() && self.highlight_cycles {
            writeln_out!(output, "🔄 = Part of an accepted exchange cycle")?;
        }

        Ok(())
    }

    pub fn render_mermaid(
        &self,
        graph: &CompatibilityGraph,
        participants: &ParticipantMap,
        cycles: &[Cycle],
        output: &mut dyn Write,
    ) -> Result<()> {
        writeln_out!(output, "graph LR")?;

        let highlights = Highlights::new(cycles);

        for node_idx in graph.graph().node_indices() {
            let id = graph.participant_id(node_idx);
            let node_id = self.mermaid_id(id);
            let label = self.node_label(graph, node_idx).replace('"', "#quot;");

            if highlights.has_member(id) && self.highlight_cycles {
                writeln_out!(output, "    {}((\"{}\"))", node_id, label)?;
                writeln_out!(
                    output,
                    "    style {} fill:{},stroke:{},stroke-width:3px",
                    node_id,
                    colors::CYCLE_NODE_FILL,
                    colors::CYCLE_NODE_STROKE
                )?;
            } else {
                writeln_out!(output, "    {}[\"{}\"]", node_id, label)?;
                writeln_out!(
                    output,
                    "    style {} fill:{},stroke:{},stroke-width:2px",
                    node_id,
                    colors::NORMAL_NODE_FILL,
                    colors::NORMAL_NODE_STROKE
                )?;
            }
        }

        writeln_out!(output)?;

        for (link_style_index, (from, to)) in self.sorted_edges(graph).into_iter().enumerate() {
            let arrow = match self.edge_item(participants, from, to) {
                Some(item) => format!("-->|{}|", item.replace('"', "#quot;")),
                None => "-->".to_string(),
            };

            writeln_out!(
                output,
                "    {} {} {}",
                self.mermaid_id(from),
                arrow,
                self.mermaid_id(to)
            )?;

            let (color, width) = if highlights.has_edge(from, to) && self.highlight_cycles {
                (colors::CYCLE_EDGE, 3)
            } else {
                (colors::NORMAL_EDGE, 2)
            };
            writeln_out!(
                output,
                "    linkStyle {} stroke:{},stroke-width:{}px",
                link_style_index,
                color,
                width
            )?;
        }

        if !cycles.is_empty() && self.highlight_cycles {
            writeln_out!(output)?;
            writeln_out!(output, "    subgraph Cycles[\"Accepted Cycles\"]")?;
            for (i, cycle) in cycles.iter().enumerate() {
                writeln_out!(
                    output,
                    "        C{}[\"Cycle {}: {} participants<br/>{}\"]",
                    i + 1,
                    i + 1,
                    cycle.participant_count(),
                    cycle
                )?;
            }
            writeln_out!(
                output,
                "        style Cycles fill:{},stroke:#ddd,stroke-width:1px",
                colors::LEGEND_BG
            )?;
            writeln_out!(output, "    end")?;
        }

        Ok(())
    }

    pub fn render_dot(
        &self,
        graph: &CompatibilityGraph,
        participants: &ParticipantMap,
        cycles: &[Cycle],
        output: &mut dyn Write,
    ) -> Result<()> {
        writeln_out!(output, "digraph compatibility {{")?;
        writeln_out!(output, "    rankdir=LR;")?;
        writeln_out!(output, "    node [shape=box, style=rounded];")?;
        writeln_out!(output)?;

        let highlights = Highlights::new(cycles);

        for node_idx in graph.graph().node_indices() {
            let id = graph.participant_id(node_idx);
            let (fill_color, stroke_color) = if highlights.has_member(id) && self.highlight_cycles
            {
                (colors::CYCLE_NODE_FILL, colors::CYCLE_NODE_STROKE)
            } else {
                (colors::NORMAL_NODE_FILL, colors::NORMAL_NODE_STROKE)
            };

            writeln_out!(
                output,
                r#"    "{}" [label="{}", style=filled, fillcolor="{}", color="{}", penwidth=2];"#,
                dot_escape(id),
                dot_escape(&self.node_label(graph, node_idx)),
                fill_color,
                stroke_color
            )?;
        }

        writeln_out!(output)?;

        for (from, to) in self.sorted_edges(graph) {
            let label = self
                .edge_item(participants, from, to)
                .map(|item| format!(r#"label="{}", "#, dot_escape(&item)))
                .unwrap_or_default();

            let (color, width) = if highlights.has_edge(from, to) && self.highlight_cycles {
                (colors::CYCLE_EDGE, 3)
            } else {
                (colors::NORMAL_EDGE, 2)
            };

            writeln_out!(
                output,
                r#"    "{}" -> "{}" [{}color="{}", penwidth={}];"#,
                dot_escape(from),
                dot_escape(to),
                label,
                color,
                width
            )?;
        }

        writeln_out!(output, "}}")?;
        Ok(())
    }

    /// `name [id]`, or just the id when the name is the id
    fn node_label(&self, graph: &CompatibilityGraph, idx: NodeIndex) -> String {
        let node = &graph.graph()[idx];
        if node.name() == node.id() {
            node.id().to_string()
        } else {
            format!("{} [{}]", node.name(), node.id())
        }
    }

    /// The item that would change hands on `from → to`, when items are shown
    fn edge_item(&self, participants: &ParticipantMap, from: &str, to: &str) -> Option<String> {
        if !self.show_items {
            return None;
        }

        let giver = participants.get(from)?;
        let receiver = participants.get(to)?;
        giver
            .first_offer_for(receiver)
            .map(|item| item.label().to_string())
    }

    fn sorted_edges<'g>(&self, graph: &'g CompatibilityGraph) -> Vec<(&'g str, &'g str)> {
        let inner = graph.graph();
        let mut edges: Vec<(NodeIndex, NodeIndex)> = inner
            .edge_references()
            .map(|edge| (edge.source(), edge.target()))
            .collect();
        edges.sort_unstable();

        edges
            .into_iter()
            .map(|(from, to)| (graph.participant_id(from), graph.participant_id(to)))
            .collect()
    }

    fn mermaid_id(&self, name: &str) -> String {
        // Replace non-alphanumeric characters with underscores for valid Mermaid IDs
        name.chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect()
    }
}

fn dot_escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
