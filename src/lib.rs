//! # Barter Wheel - Find Multi-Party Exchange Cycles
//!
//! Barter Wheel matches participants who each offer some items and want
//! others. Nobody has to find a direct swap partner: if A can give to B, B to
//! C and C back to A, the three of them form an exchange ring.
//!
//! ## Main Components
//!
//! - **Store**: Loads and normalizes participant records from JSON and TOML
//! - **Graph**: Builds the directed "can give to" compatibility graph
//! - **Enumerator**: Finds every simple cycle of three or more participants
//! - **Matcher**: Selects a conflict-free set of cycles (greedy or
//!   exhaustive) and audits one strategy against the other
//! - **Reports**: Describes accepted cycles for people and for programs
//!
//! ## Usage
//!
//! ### Matching a Round
//!
//! ```
//! use barter_wheel::common::ConfigBuilder;
//! use barter_wheel::core::{Participant, ParticipantMap};
//! use barter_wheel::matcher::{CycleSelector, Strategy};
//! use barter_wheel::{build_graph, describe};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let participants = ParticipantMap::new(vec![
//!     Participant::builder()
//!         .with_id("north")
//!         .with_name(Some("North Agency".to_string()))
//!         .with_offers(["Corolla - XEi"])
//!         .with_wants(["Civic - EXL"])
//!         .build()?,
//!     Participant::builder()
//!         .with_id("east")
//!         .with_offers(["Civic - EXL"])
//!         .with_wants(["Golf - GTI"])
//!         .build()?,
//!     Participant::builder()
//!         .with_id("south")
//!         .with_offers(["Golf - GTI"])
//!         .with_wants(["Corolla - XEi"])
//!         .build()?,
//! ])?;
//!
//! let graph = build_graph(participants.as_slice());
//! let selection = CycleSelector::new(Strategy::Greedy).select(&graph, &participants);
//!
//! assert_eq!(selection.accepted_count(), 1);
//! assert_eq!(selection.accepted()[0].to_string(), "north → south → east → north");
//!
//! let descriptions = describe(selection.accepted(), &participants);
//! assert_eq!(
//!     descriptions[0].exchange_path.lines().next(),
//!     Some("North Agency offers 'Corolla - XEi' → to south")
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ### Loading Records and Auditing
//!
//! ```no_run
//! use std::path::PathBuf;
//!
//! use barter_wheel::matcher::MatchingOptions;
//! use barter_wheel::reports::{HumanReportGenerator, ReportGenerator};
//! use barter_wheel::{audit_cycles, build_graph, load_participants};
//! use miette::IntoDiagnostic;
//!
//! # fn main() -> miette::Result<()> {
//! let loaded = load_participants(&[PathBuf::from("rounds/2024-06")], None)?;
//! let graph = build_graph(loaded.participants.as_slice());
//!
//! let audit = audit_cycles(&graph, &loaded.participants, &MatchingOptions::default());
//! println!(
//!     "Greedy left {} cycles on the table",
//!     audit.skipped().len()
//! );
//!
//! let report = HumanReportGenerator::new(Some(5))
//!     .generate_audit_report(&audit, &loaded.participants)
//!     .into_diagnostic()?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

// Private modules
mod constants;
mod progress;
mod utils;

// Public modules
pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod core;
pub mod enumerator;
pub mod error;
pub mod executors;
pub mod graph;
pub mod logging;
pub mod matcher;
pub mod reports;
pub mod store;

pub use crate::core::{Cycle, Item, Participant, ParticipantMap};
pub use crate::graph::{CompatibilityGraph, build_graph};
pub use crate::matcher::{CycleAudit, CycleSelector, Strategy, audit_cycles, select_cycles};
pub use crate::reports::{CycleDescription, describe};
pub use crate::store::load_participants;

// Main entry point for the library
pub fn run() -> miette::Result<()> {
    use clap::Parser;

    use crate::cli::Cli;
    use crate::commands::execute_command;

    let cli = Cli::parse();
    cli.logging.config().init();

    execute_command(cli.command)
}
