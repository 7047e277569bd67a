//! Gross error screening of individual observations

use crate::core::{AngularUnits, ObservationKind, ObservationStatistics, MIN_CONTROL, STRONG_CONTROL};
use crate::processing::normalize::unit_scale;

/// Estimated gross error of a suspicious observation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrossError {
    /// Error of the observed value
    pub err_obs: f64,
    /// Error remaining in the adjusted value
    pub err_adj: f64,
}

/// Statistics reported next to one observation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierAssessment {
    /// A priori standard deviation in the reporting unit
    pub stdev: f64,
    pub qrr: f64,
    pub f: f64,
    /// Absolute studentized residual, only for controlled observations
    pub std_residual: Option<f64>,
    pub gross_error: Option<GrossError>,
}

impl OutlierAssessment {
    /// Screen one observation.
    ///
    /// `cluster_band` is the covariance bandwidth of the owning cluster; gross
    /// errors are estimated only for uncorrelated observations.
    pub fn evaluate(
        kind: ObservationKind,
        stats: &ObservationStatistics,
        cluster_band: usize,
        kki: f64,
        units: AngularUnits,
    ) -> Self {
        let scale = unit_scale(kind, units);

        let mut std_residual = None;
        let mut gross_error = None;
        if stats.f >= MIN_CONTROL {
            let no = stats.studentized_residual.abs();
            std_residual = Some(no);

            if cluster_band == 0 && (stats.f >= STRONG_CONTROL || no > kki) {
                let v = stats.residual;
                let err_obs = v / (stats.qrr * stats.weight);
                let err_adj = err_obs - v;
                gross_error = Some(GrossError {
                    err_obs: err_obs * scale,
                    err_adj: err_adj * scale,
                });
            }
        }

        Self {
            stdev: stats.stdev * scale,
            qrr: stats.qrr,
            f: stats.f,
            std_residual,
            gross_error,
        }
    }
}
