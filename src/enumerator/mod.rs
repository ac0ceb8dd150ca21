//! # Cycle Enumeration Module
//!
//! This module finds every simple directed cycle of three or more
//! participants in a compatibility graph.
//!
//! ## Algorithm
//!
//! Each pass first takes the subgraph induced by the pass's members. Roots
//! are then visited in ascending index order: the strongly connected
//! components of the nodes at or above the current lower bound are
//! recomputed (Kosaraju's algorithm) and the component holding the smallest
//! node becomes the next root `s` and its search space. An iterative
//! depth-first search extends simple paths from `s` inside that component,
//! and whenever an edge leads back to `s` the path is closed into a cycle.
//! Every cycle is reported exactly once, rooted at its smallest node. The
//! search is exponential in the worst case; the optional length bound and
//! cycle limit keep dense rounds in check.
//!
//! ## Example
//!
//! ```
//! use barter_wheel::common::ConfigBuilder;
//! use barter_wheel::core::Participant;
//! use barter_wheel::enumerator::CycleEnumerator;
//! use barter_wheel::graph::build_graph;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let participants = vec![
//!     Participant::builder().with_id("a").with_offers(["X"]).with_wants(["Y"]).build()?,
//!     Participant::builder().with_id("b").with_offers(["Y"]).with_wants(["Z"]).build()?,
//!     Participant::builder().with_id("c").with_offers(["Z"]).with_wants(["X"]).build()?,
//! ];
//! let graph = build_graph(&participants);
//!
//! let mut enumerator = CycleEnumerator::new(Some(10));
//! enumerator.enumerate(&graph);
//!
//! assert_eq!(enumerator.cycle_count(), 1);
//! assert_eq!(enumerator.cycles()[0].to_string(), "a → c → b → a");
//! # Ok(())
//! # }
//! ```

mod enumerator_impl;

pub use enumerator_impl::*;
