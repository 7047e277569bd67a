//! Counts of coordinates, observations and equations of the adjustment

use crate::core::{AdjustmentResults, ObservationKind, PointData, PointRole};

/// Points of one role split by the subsystems carrying it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleCounts {
    pub xyz: usize,
    pub xy: usize,
    pub z: usize,
}

impl RoleCounts {
    fn classify(&mut self, in_xy: bool, in_z: bool) {
        if in_xy && in_z {
            self.xyz += 1;
        } else if in_xy {
            self.xy += 1;
        } else if in_z {
            self.z += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.xyz + self.xy + self.z
    }
}

/// Active points per role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoordinatesSummary {
    pub adjusted: RoleCounts,
    pub constrained: RoleCounts,
    pub fixed: RoleCounts,
}

impl CoordinatesSummary {
    /// Classify every active point once per role.
    ///
    /// A point whose subsystems carry different roles (adjusted XY with a
    /// constrained height) lands in the partial bucket of each of those roles.
    pub fn build(points: &PointData) -> Self {
        let mut summary = Self::default();
        for point in points.values().filter(|p| p.active()) {
            summary.adjusted.classify(point.free_xy(), point.free_z());
            summary.constrained.classify(point.constrained_xy(), point.constrained_z());
            summary.fixed.classify(point.fixed_xy(), point.fixed_z());
        }
        summary
    }

    pub fn role(&self, role: PointRole) -> &RoleCounts {
        match role {
            PointRole::Adjusted => &self.adjusted,
            PointRole::Constrained => &self.constrained,
            PointRole::Fixed => &self.fixed,
        }
    }
}

/// Observations per kind; coordinate observations and coordinate difference
/// vectors are counted once per group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObservationCounts {
    pub distances: usize,
    pub directions: usize,
    pub angles: usize,
    pub coordinates: usize,
    pub height_diffs: usize,
    pub zenith_angles: usize,
    pub slope_distances: usize,
    pub vectors: usize,
    pub azimuths: usize,
}

impl ObservationCounts {
    pub fn build<N: AdjustmentResults + ?Sized>(network: &N) -> Self {
        let mut counts = Self::default();
        for i in 1..=network.observations_count() {
            counts.add(network.observation(i).kind());
        }
        counts
    }

    fn add(&mut self, kind: ObservationKind) {
        match kind {
            ObservationKind::Direction => self.directions += 1,
            ObservationKind::Distance => self.distances += 1,
            ObservationKind::Angle => self.angles += 1,
            ObservationKind::HeightDiff => self.height_diffs += 1,
            ObservationKind::SlopeDistance => self.slope_distances += 1,
            ObservationKind::ZenithAngle => self.zenith_angles += 1,
            ObservationKind::CoordinateX
            | ObservationKind::CoordinateY
            | ObservationKind::CoordinateZ => self.coordinates += 1,
            // one vector per dx, dy and dz triplet
            ObservationKind::Dx => self.vectors += 1,
            ObservationKind::Dy | ObservationKind::Dz => {}
            ObservationKind::Azimuth => self.azimuths += 1,
        }
    }
}

/// Size and fit of the system of observation equations
#[derive(Debug, Clone, PartialEq)]
pub struct EquationsSummary {
    pub equations: usize,
    pub unknowns: usize,
    pub degrees_of_freedom: usize,
    pub defect: usize,
    pub sum_of_squares: f64,
    /// Reported only when the adjustment iterated
    pub linearization_iterations: Option<u32>,
    pub connected_network: bool,
}

impl EquationsSummary {
    pub fn build<N: AdjustmentResults + ?Sized>(network: &N) -> Self {
        let stats = network.statistics();
        Self {
            equations: network.observations_count(),
            unknowns: network.unknowns_count(),
            degrees_of_freedom: stats.degrees_of_freedom,
            defect: stats.defect,
            sum_of_squares: stats.sum_of_squares,
            linearization_iterations: Some(stats.linearization_iterations).filter(|&n| n > 0),
            connected_network: stats.connected_network,
        }
    }
}

/// Processing summary of the whole network
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkSummary {
    pub coordinates: CoordinatesSummary,
    pub observations: ObservationCounts,
    pub equations: EquationsSummary,
}

impl NetworkSummary {
    pub fn build<N: AdjustmentResults + ?Sized>(network: &N) -> Self {
        Self {
            coordinates: CoordinatesSummary::build(network.points()),
            observations: ObservationCounts::build(network),
            equations: EquationsSummary::build(network),
        }
    }
}
