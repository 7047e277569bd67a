//! Global test of the a posteriori standard deviation
//!
//! The ratio m0' / m0 of a correct adjustment lies inside the two-sided
//! interval sqrt(chi2(a/2, dof) / dof) .. sqrt(chi2(1 - a/2, dof) / dof).

use super::error::{ReportError, ReportResult};
use crate::core::{AdjustmentResults, SigmaSource};
use statrs::distribution::{ChiSquared, ContinuousCDF};
use tracing::{debug, warn};

/// Outcome of the variance ratio test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    Failed,
    /// No redundancy, the test cannot be evaluated
    NotApplicable,
}

impl Verdict {
    /// Empty element emitted for the outcome
    pub fn tag(self) -> &'static str {
        match self {
            Verdict::Passed => "passed",
            Verdict::Failed => "failed",
            Verdict::NotApplicable => "not-applicable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarianceRatioTest {
    pub ratio: f64,
    pub lower: f64,
    pub upper: f64,
    pub verdict: Verdict,
}

impl VarianceRatioTest {
    /// Test `aposteriori / apriori` at confidence `probability` with `dof` degrees of freedom
    pub fn evaluate(
        apriori: f64,
        aposteriori: f64,
        probability: f64,
        dof: usize,
    ) -> ReportResult<Self> {
        if dof == 0 {
            warn!("degrees of freedom is zero, the standard deviation test is not applicable");
            return Ok(Self {
                ratio: 0.0,
                lower: 0.0,
                upper: 0.0,
                verdict: Verdict::NotApplicable,
            });
        }
        if !(0.0..=1.0).contains(&probability) {
            return Err(ReportError::Statistics {
                dof,
                reason: format!("confidence probability {probability} outside [0, 1]"),
            });
        }

        let chi2 = ChiSquared::new(dof as f64).map_err(|e| ReportError::Statistics {
            dof,
            reason: e.to_string(),
        })?;
        let alpha = (1.0 - probability) / 2.0;
        let n = dof as f64;
        let lower = (chi2.inverse_cdf(alpha) / n).sqrt();
        let upper = (chi2.inverse_cdf(1.0 - alpha) / n).sqrt();
        let ratio = aposteriori / apriori;

        let verdict = if lower < ratio && ratio < upper {
            Verdict::Passed
        } else {
            Verdict::Failed
        };
        debug!(ratio, lower, upper, verdict = verdict.tag(), "variance ratio test");

        Ok(Self {
            ratio,
            lower,
            upper,
            verdict,
        })
    }
}

/// Content of the standard deviation section
#[derive(Debug, Clone, PartialEq)]
pub struct StandardDeviationSummary {
    pub apriori: f64,
    /// sqrt(v'Wv / dof), zero without redundancy
    pub aposteriori: f64,
    pub used: SigmaSource,
    pub probability: f64,
    pub test: VarianceRatioTest,
    pub confidence_scale: f64,
}

impl StandardDeviationSummary {
    pub fn build<N: AdjustmentResults + ?Sized>(network: &N) -> ReportResult<Self> {
        let stats = network.statistics();
        let probability = network.info().confidence_probability;
        let test = VarianceRatioTest::evaluate(
            stats.apriori_m0,
            stats.aposteriori_m0,
            probability,
            stats.degrees_of_freedom,
        )?;
        Ok(Self {
            apriori: stats.apriori_m0,
            aposteriori: stats.aposteriori_from_residuals(),
            used: stats.m0_used,
            probability,
            test,
            confidence_scale: stats.confidence_coefficient,
        })
    }
}
