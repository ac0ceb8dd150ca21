//! Common functionality shared across commands

use std::path::PathBuf;

use clap::Args;

use crate::constants::matching::DEFAULT_MAX_CYCLE_LEN;

/// Common arguments shared by multiple commands
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Participant files, directories or glob patterns (defaults to current
    /// directory)
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Longest cycle to consider, counted in participants
    #[arg(long, default_value_t = DEFAULT_MAX_CYCLE_LEN, env = "BARTER_WHEEL_MAX_LEN")]
    pub max_len: usize,

    /// Search cycles of any length (overrides --max-len)
    #[arg(long, env = "BARTER_WHEEL_UNBOUNDED")]
    pub unbounded: bool,

    /// Stop collecting candidates after this many cycles per enumeration pass
    #[arg(long, env = "BARTER_WHEEL_CYCLE_LIMIT")]
    pub cycle_limit: Option<usize>,
}

/// Common output format arguments
#[derive(Args, Debug, Clone)]
pub struct FormatArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = crate::constants::output::DEFAULT_FORMAT, env = "BARTER_WHEEL_FORMAT")]
    pub format: crate::cli::OutputFormat,
}

/// Common cycle display arguments
#[derive(Args, Debug, Clone)]
pub struct CycleDisplayArgs {
    /// Maximum number of cycles to display (shows all by default)
    #[arg(long, env = "BARTER_WHEEL_MAX_CYCLES")]
    pub max_cycles: Option<usize>,
}

impl CommonArgs {
    /// Get paths, using current directory if none provided
    pub fn get_paths(&self) -> Vec<PathBuf> {
        if self.paths.is_empty() {
            vec![std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))]
        } else {
            self.paths.clone()
        }
    }

    /// Effective cycle length bound
    pub fn max_len(&self) -> Option<usize> {
        if self.unbounded {
            None
        } else {
            Some(self.max_len)
        }
    }
}

/// Generic builder trait for configuration objects
pub trait ConfigBuilder: Sized {
    type Config;

    /// Build the configuration, returning an error if validation fails
    fn build(self) -> Result<Self::Config, crate::error::BarterWheelError>;
}

/// Trait for configurations that can be created from CLI commands
/// This trait simplifies command-to-config conversions
pub trait FromCommand: Sized {
    /// The command variant that this config can be created from
    fn from_command(command: crate::cli::Commands)
    -> Result<Self, crate::error::BarterWheelError>;
}

/// Macro to implement `TryFrom<Commands>` using [`FromCommand`] trait
#[macro_export]
macro_rules! impl_try_from_command {
    ($config:ty) => {
        impl std::convert::TryFrom<$crate::cli::Commands> for $config {
            type Error = $crate::error::BarterWheelError;

            fn try_from(command: $crate::cli::Commands) -> Result<Self, Self::Error> {
                <$config as $crate::common::FromCommand>::from_command(command)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(paths: Vec<PathBuf>, unbounded: bool) -> CommonArgs {
        CommonArgs {
            paths,
            max_len: 6,
            unbounded,
            cycle_limit: None,
        }
    }

    #[test]
    fn test_common_args_get_paths_empty() {
        let paths = args(vec![], false).get_paths();
        assert_eq!(paths.len(), 1);
        // Should default to current directory
        assert!(paths[0].is_absolute() || paths[0] == std::path::Path::new("."));
    }

    #[test]
    fn test_common_args_get_paths_with_values() {
        let test_paths = vec![
            PathBuf::from("/tmp/round-1.json"),
            PathBuf::from("/tmp/round-2.toml"),
        ];

        let paths = args(test_paths.clone(), false).get_paths();
        assert_eq!(paths, test_paths);
    }

    #[test]
    fn test_max_len_respects_unbounded() {
        assert_eq!(args(vec![], false).max_len(), Some(6));
        assert_eq!(args(vec![], true).max_len(), None);
    }
}
