//! Audit command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::AuditConfig;
use crate::error::BarterWheelError;

impl FromCommand for AuditConfig {
    fn from_command(command: Commands) -> Result<Self, BarterWheelError> {
        match command {
            Commands::Audit {
                common,
                format,
                cycle_display,
                error_on_skipped,
            } => AuditConfig::builder()
                .with_paths(common.get_paths())
                .with_format(format.format)
                .with_max_len(common.max_len())
                .with_cycle_limit(common.cycle_limit)
                .with_max_cycles(cycle_display.max_cycles)
                .with_error_on_skipped(error_on_skipped)
                .build(),
            _ => Err(BarterWheelError::ConfigurationError {
                message: "Invalid command type for AuditConfig".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(AuditConfig);

/// Execute the audit command comparing greedy and exhaustive selection
pub fn execute_audit_command(command: Commands) -> Result<()> {
    let config = AuditConfig::from_command(command)
        .wrap_err("Failed to parse audit command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::audit::AuditExecutor;
    AuditExecutor::execute(config)
}
