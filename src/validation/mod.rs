//! Summaries, statistical tests and outlier screening of a solved network

pub mod error;
pub mod hypothesis;
pub mod outliers;
pub mod summary;

pub use error::{ReportError, ReportResult};
pub use hypothesis::{StandardDeviationSummary, VarianceRatioTest, Verdict};
pub use outliers::{GrossError, OutlierAssessment};
pub use summary::{CoordinatesSummary, EquationsSummary, NetworkSummary, ObservationCounts, RoleCounts};
