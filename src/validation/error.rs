//! Errors of report generation

use crate::core::SnapshotError;
use crate::utils::config::ConfigError;
use thiserror::Error;

/// Result type of report operations
pub type ReportResult<T> = Result<T, ReportError>;

#[derive(Debug, Error)]
pub enum ReportError {
    /// The output sink failed; the partial document is unusable
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
    #[error("chi-square distribution with {dof} degrees of freedom: {reason}")]
    Statistics { dof: usize, reason: String },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

impl ReportError {
    /// Process exit code for the command line front end
    pub fn exit_code(&self) -> u8 {
        match self {
            ReportError::Io(_) => 74,
            ReportError::Statistics { .. } => 70,
            ReportError::Config(_) => 78,
            ReportError::Snapshot(_) => 65,
        }
    }
}
