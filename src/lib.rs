//! Adjustment Report
//!
//! Statistical verification and XML reporting of solved local geodetic
//! networks. The solver is external: its results are read through
//! [`AdjustmentResults`] and written as a `gama-local-adjustment` document.

pub mod api;
pub mod core;
pub mod processing;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use crate::api::AdjustmentReport;
pub use crate::core::{
    AdjustmentResults, AdjustmentStatistics, NetworkInfo, NetworkSnapshot, Observation,
    ObservationKind, PointData, PointId, SnapshotError,
};
pub use crate::utils::{ConfigError, ReportConfig};
pub use crate::validation::{ReportError, ReportResult, VarianceRatioTest, Verdict};
