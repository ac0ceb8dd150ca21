//! # Graph Construction and Rendering Module
//!
//! This module builds the directed "can give to" graph over participants and
//! renders it for inspection.
//!
//! ## Components
//!
//! ### Graph Building
//! - **CompatibilityGraphBuilder**: Adds one node per participant and an edge
//!   `A → B` whenever something `A` offers is something `B` wants
//! - **CompatibilityGraph**: The resulting graph, indexed by participant id
//! - **ParticipantNode**: A participant's id and display name
//!
//! ### Graph Rendering
//! - **GraphRenderer**: Renders graphs as ASCII, Mermaid or DOT
//! - Supports highlighting accepted cycles and labelling edges with items
//!
//! ## Example
//!
//! ```
//! use barter_wheel::common::ConfigBuilder;
//! use barter_wheel::core::{Participant, ParticipantMap};
//! use barter_wheel::graph::{GraphRenderer, build_graph};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let participants = vec![
//!     Participant::builder().with_id("north").with_offers(["Corolla - XEi"]).build()?,
//!     Participant::builder().with_id("south").with_wants(["COROLLA - XEI"]).build()?,
//! ];
//! let graph = build_graph(&participants);
//! assert!(graph.has_edge("north", "south"));
//!
//! let participants = ParticipantMap::new(participants)?;
//! let renderer = GraphRenderer::new(true, true);
//! let mut output = Vec::new();
//! renderer.render_dot(&graph, &participants, &[], &mut output)?;
//!
//! let dot_output = String::from_utf8(output)?;
//! assert!(dot_output.contains("digraph"));
//! assert!(dot_output.contains(r#""north" -> "south""#));
//! # Ok(())
//! # }
//! ```
//!
//! ## Output Formats
//!
//! - **ASCII**: Terminal-friendly adjacency listing
//! - **DOT**: Graphviz format for detailed visualization
//! - **Mermaid**: Markdown-compatible diagrams for documentation

mod builder;
mod renderer;
mod types;

// Re-export main types and builders
pub use builder::{CompatibilityGraphBuilder, build_graph};
pub use renderer::GraphRenderer;
pub use types::{CompatibilityGraph, ParticipantNode};
