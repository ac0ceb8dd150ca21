//! Graph command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::GraphOptions;
use crate::error::BarterWheelError;

impl FromCommand for GraphOptions {
    fn from_command(command: Commands) -> Result<Self, BarterWheelError> {
        match command {
            Commands::Graph {
                common,
                format,
                output,
                strategy,
                highlight_cycles,
                show_items,
            } => GraphOptions::builder()
                .with_paths(common.get_paths())
                .with_format(format)
                .with_output(output)
                .with_strategy(strategy)
                .with_max_len(common.max_len())
                .with_cycle_limit(common.cycle_limit)
                .with_highlight_cycles(highlight_cycles)
                .with_show_items(show_items)
                .build(),
            _ => Err(BarterWheelError::ConfigurationError {
                message: "Invalid command type for GraphOptions".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(GraphOptions);

/// Execute the graph command for rendering the compatibility graph
pub fn execute_graph_command(command: Commands) -> Result<()> {
    let config = GraphOptions::from_command(command)
        .wrap_err("Failed to parse graph command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::graph::GraphExecutor;
    GraphExecutor::execute(config)
}
