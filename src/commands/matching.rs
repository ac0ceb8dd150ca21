//! Match command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::MatchConfig;
use crate::error::BarterWheelError;

impl FromCommand for MatchConfig {
    fn from_command(command: Commands) -> Result<Self, BarterWheelError> {
        match command {
            Commands::Match {
                common,
                format,
                cycle_display,
                strategy,
                show_rejected,
                error_on_empty,
            } => MatchConfig::builder()
                .with_paths(common.get_paths())
                .with_format(format.format)
                .with_strategy(strategy)
                .with_max_len(common.max_len())
                .with_cycle_limit(common.cycle_limit)
                .with_max_cycles(cycle_display.max_cycles)
                .with_show_rejected(show_rejected)
                .with_error_on_empty(error_on_empty)
                .build(),
            _ => Err(BarterWheelError::ConfigurationError {
                message: "Invalid command type for MatchConfig".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(MatchConfig);

/// Execute the match command
pub fn execute_match_command(command: Commands) -> Result<()> {
    let config = MatchConfig::from_command(command)
        .wrap_err("Failed to parse match command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::matching::MatchExecutor;
    MatchExecutor::execute(config)
}
