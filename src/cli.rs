use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::common::{CommonArgs, CycleDisplayArgs, FormatArgs};
use crate::logging::{LogFormat, LoggingConfig};
use crate::matcher::Strategy;

#[derive(Parser)]
#[command(
    name = "barter-wheel",
    about = "🎡 Find multi-party exchange cycles among barter participants",
    long_about = "barter-wheel reads what each participant offers and wants, builds a directed \
                  \"can give to\" graph, and finds closed exchange rings of three or more \
                  participants in which every hand-over satisfies a want and no offer is \
                  promised twice.",
    subcommand_required = true,
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub logging: LoggingArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Diagnostic logging options, accepted by every subcommand
#[derive(Args, Debug, Clone)]
pub struct LoggingArgs {
    /// Log filter such as `info` or `barter_wheel=debug` (RUST_LOG wins when
    /// set)
    #[arg(long, global = true, env = "BARTER_WHEEL_LOG")]
    pub log_level: Option<String>,

    /// Log line format
    #[arg(
        long,
        global = true,
        value_enum,
        default_value = "pretty",
        env = "BARTER_WHEEL_LOG_FORMAT"
    )]
    pub log_format: LogFormat,
}

impl LoggingArgs {
    pub fn config(&self) -> LoggingConfig {
        LoggingConfig::new(self.log_level.clone(), self.log_format)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Match participants into exchange cycles
    ///
    /// Loads participant records, builds the compatibility graph and selects
    /// a conflict-free set of exchange cycles with the chosen strategy.
    #[command(
        long_about = "Match participants into exchange cycles. Every participant record is \
                      loaded and normalized, a directed edge is drawn from each participant to \
                      every other participant who wants something it offers, and simple cycles \
                      of three or more participants are enumerated. The greedy strategy works \
                      per connected component, tries the longest cycles first and places each \
                      participant in at most one cycle. The exhaustive strategy tries every \
                      cycle in discovery order and only forbids promising the same offer twice."
    )]
    Match {
        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        format: FormatArgs,

        #[command(flatten)]
        cycle_display: CycleDisplayArgs,

        /// Cycle selection strategy
        #[arg(
            short,
            long,
            value_enum,
            default_value = "greedy",
            env = "BARTER_WHEEL_STRATEGY"
        )]
        strategy: Strategy,

        /// List rejected candidate cycles and the reason for each
        #[arg(long, env = "BARTER_WHEEL_SHOW_REJECTED")]
        show_rejected: bool,

        /// Exit with error code if no cycle is accepted
        #[arg(long, env = "BARTER_WHEEL_ERROR_ON_EMPTY")]
        error_on_empty: bool,
    },

    /// Compare greedy and exhaustive selection on the same round
    ///
    /// Runs both strategies side by side and lists the cycles exhaustive
    /// selection accepted that greedy selection left out.
    #[command(
        long_about = "Audit greedy selection against exhaustive selection. Both strategies run \
                      concurrently over the same compatibility graph, each with its own record \
                      of promised offers. The report lists every cycle the exhaustive run \
                      accepted that the greedy run did not, which shows how many trades the \
                      stricter one-cycle-per-participant policy gives up."
    )]
    Audit {
        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        format: FormatArgs,

        #[command(flatten)]
        cycle_display: CycleDisplayArgs,

        /// Exit with error code if greedy selection skipped any cycle
        #[arg(long, env = "BARTER_WHEEL_ERROR_ON_SKIPPED")]
        error_on_skipped: bool,
    },

    /// Render the compatibility graph
    ///
    /// Draws who can give to whom, optionally highlighting the cycles the
    /// chosen strategy accepts.
    #[command(
        long_about = "Render the compatibility graph as ASCII art, a Mermaid diagram or a \
                      Graphviz DOT file. Nodes are participants and an edge points from a giver \
                      to a receiver who wants one of the giver's offers. Accepted cycles can be \
                      highlighted and edges can be labelled with the item that would change \
                      hands."
    )]
    Graph {
        #[command(flatten)]
        common: CommonArgs,

        /// Graph format
        #[arg(
            short,
            long,
            value_enum,
            default_value = "ascii",
            env = "BARTER_WHEEL_GRAPH_FORMAT"
        )]
        format: GraphFormat,

        /// Output file (stdout if not specified)
        #[arg(short, long, env = "BARTER_WHEEL_OUTPUT")]
        output: Option<PathBuf>,

        /// Strategy used to pick the highlighted cycles
        #[arg(
            short,
            long,
            value_enum,
            default_value = "greedy",
            env = "BARTER_WHEEL_STRATEGY"
        )]
        strategy: Strategy,

        /// Highlight accepted cycles in the graph
        #[arg(
            long,
            default_value = "true",
            env = "BARTER_WHEEL_HIGHLIGHT_CYCLES"
        )]
        highlight_cycles: bool,

        /// Label edges with the item that would change hands
        #[arg(long, env = "BARTER_WHEEL_SHOW_ITEMS")]
        show_items: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, clap::ValueEnum)]
pub enum GraphFormat {
    Ascii,
    Mermaid,
    Dot,
}
