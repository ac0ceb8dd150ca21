//! Report generation modules for different output formats
//!
//! This module contains report generators for various output formats:
//! - human: Human-readable console output
//! - json: JSON format for programmatic use
//!
//! [`describe`] renders accepted cycles as plain hand-over lines and is
//! shared by both generators.

pub mod describe;
pub mod human;
pub mod json;

use crate::core::ParticipantMap;
use crate::error::BarterWheelError;
use crate::matcher::{CycleAudit, Selection};

/// Common trait for all report generators
pub trait ReportGenerator {
    /// Generate a report from one selection run
    fn generate_report(
        &self,
        selection: &Selection,
        participants: &ParticipantMap,
    ) -> Result<String, BarterWheelError>;

    /// Generate a report comparing greedy and exhaustive selection
    fn generate_audit_report(
        &self,
        audit: &CycleAudit,
        participants: &ParticipantMap,
    ) -> Result<String, BarterWheelError>;
}

// Re-export for convenience
pub use describe::{CycleDescription, describe};
pub use human::HumanReportGenerator;
pub use json::JsonReportGenerator;
