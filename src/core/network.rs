//! Read-only view of a solved adjustment
//!
//! The reporting engine never solves anything itself. Everything it needs is
//! read through [`AdjustmentResults`], implemented by the adjustment engine or
//! by a loaded [`NetworkSnapshot`](crate::core::snapshot::NetworkSnapshot).

use super::types::{
    AngleHandedness, AngularUnits, AxesXy, Cluster, LocalPoint, Observation,
    ObservationStatistics, PointId, SigmaSource, StdErrorEllipse, Unknown,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Points keyed and iterated by identifier
pub type PointData = BTreeMap<PointId, LocalPoint>;

/// General parameters of the network and its adjustment settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkInfo {
    /// Free text description of the network
    #[serde(default)]
    pub description: String,
    /// Name of the adjustment algorithm
    pub algorithm: String,
    /// Version of the adjustment library
    pub version: String,
    /// Toolchain the adjustment library was built with
    #[serde(default)]
    pub compiler: String,
    /// Orientation of the local XY axes
    #[serde(default)]
    pub axes_xy: AxesXy,
    /// Direction in which angles increase
    #[serde(default)]
    pub angles: AngleHandedness,
    /// Unit convention for reported angular standard deviations
    #[serde(default)]
    pub angular_units: AngularUnits,
    /// Observation epoch (decimal years)
    #[serde(default)]
    pub epoch: Option<f64>,
    /// Mean latitude of the network (radians)
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Reference ellipsoid name
    #[serde(default)]
    pub ellipsoid: Option<String>,
    /// Confidence probability of statistical tests
    #[serde(default = "default_confidence_probability")]
    pub confidence_probability: f64,
    /// Bandwidth of the reported covariance matrix, -1 for the full matrix
    #[serde(default = "default_covariance_band")]
    pub covariance_band: i32,
}

fn default_confidence_probability() -> f64 {
    0.95
}

fn default_covariance_band() -> i32 {
    -1
}

impl Default for NetworkInfo {
    fn default() -> Self {
        Self {
            description: String::new(),
            algorithm: "gso".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            compiler: String::new(),
            axes_xy: AxesXy::default(),
            angles: AngleHandedness::default(),
            angular_units: AngularUnits::default(),
            epoch: None,
            latitude: None,
            ellipsoid: None,
            confidence_probability: default_confidence_probability(),
            covariance_band: default_covariance_band(),
        }
    }
}

/// Scalar results of the adjustment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentStatistics {
    pub degrees_of_freedom: usize,
    /// Rank defect of the normal equations
    #[serde(default)]
    pub defect: usize,
    /// Weighted sum of squared residuals (v'Wv)
    pub sum_of_squares: f64,
    #[serde(default)]
    pub linearization_iterations: u32,
    #[serde(default = "default_connected")]
    pub connected_network: bool,
    /// A priori reference standard deviation
    pub apriori_m0: f64,
    /// A posteriori reference standard deviation as tracked by the solver
    pub aposteriori_m0: f64,
    /// Reference standard deviation used for scaling covariances
    #[serde(default)]
    pub m0_used: SigmaSource,
    /// Confidence coefficient (studentized residual threshold)
    pub confidence_coefficient: f64,
}

fn default_connected() -> bool {
    true
}

impl AdjustmentStatistics {
    /// Reference standard deviation in use
    pub fn m0(&self) -> f64 {
        match self.m0_used {
            SigmaSource::Apriori => self.apriori_m0,
            SigmaSource::Aposteriori => self.aposteriori_m0,
        }
    }

    /// sqrt(v'Wv / dof), zero when the network has no redundancy
    pub fn aposteriori_from_residuals(&self) -> f64 {
        if self.degrees_of_freedom > 0 {
            (self.sum_of_squares / self.degrees_of_freedom as f64).sqrt()
        } else {
            0.0
        }
    }
}

/// Accessors of a solved network. Observation and unknown indices are 1-based
/// and trusted; implementations may panic on indices they never handed out.
pub trait AdjustmentResults {
    fn info(&self) -> &NetworkInfo;

    fn statistics(&self) -> &AdjustmentStatistics;

    fn points(&self) -> &PointData;

    fn observations_count(&self) -> usize;

    fn observation(&self, index: usize) -> &Observation;

    fn observation_statistics(&self, index: usize) -> ObservationStatistics;

    fn cluster(&self, cluster: usize) -> &Cluster;

    fn unknowns_count(&self) -> usize;

    fn unknown(&self, index: usize) -> &Unknown;

    /// Weight coefficient of unknowns `i` and `j`
    fn qxx(&self, i: usize, j: usize) -> f64;

    fn std_error_ellipse(&self, id: &PointId) -> StdErrorEllipse;

    /// Cluster owning the observation at `index`
    fn observation_cluster(&self, index: usize) -> &Cluster {
        self.cluster(self.observation(index).cluster())
    }

    /// Indices of orientation unknowns in ascending order
    fn orientation_indices(&self) -> Vec<usize> {
        (1..=self.unknowns_count())
            .filter(|&i| self.unknown(i).is_orientation())
            .collect()
    }
}
