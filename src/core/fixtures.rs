//! Small solved networks shared by unit tests

use super::network::{AdjustmentStatistics, NetworkInfo, PointData};
use super::snapshot::{NetworkSnapshot, ObservationRecord};
use super::types::*;
use nalgebra::DMatrix;
use std::collections::BTreeMap;
use std::f64::consts::PI;

pub fn stats(residual: f64, f: f64, studentized_residual: f64) -> ObservationStatistics {
    ObservationStatistics {
        residual,
        stdev: 10.0,
        qrr: 0.4,
        f,
        studentized_residual,
        weight: 0.25,
    }
}

fn leg(from: &str, to: &str, value: f64) -> Leg {
    Leg {
        from: PointId::from(from),
        to: PointId::from(to),
        value,
        extern_label: None,
        cluster: 0,
    }
}

fn coordinate(id: &str, value: f64, cluster: usize) -> CoordinateObs {
    CoordinateObs {
        id: PointId::from(id),
        value,
        cluster,
    }
}

pub fn info() -> NetworkInfo {
    NetworkInfo {
        description: "test network".to_string(),
        algorithm: "gso".to_string(),
        version: "2.30".to_string(),
        compiler: "rustc".to_string(),
        ..NetworkInfo::default()
    }
}

pub fn statistics(dof: usize) -> AdjustmentStatistics {
    AdjustmentStatistics {
        degrees_of_freedom: dof,
        defect: 0,
        sum_of_squares: dof as f64,
        linearization_iterations: 0,
        connected_network: true,
        apriori_m0: 1.0,
        aposteriori_m0: 1.0,
        m0_used: SigmaSource::Aposteriori,
        confidence_coefficient: 1.96,
    }
}

/// Points: A fixed XY, B adjusted XY (1, 2), C adjusted XY (4, 5) with a fixed
/// height, D adjusted height (6). Unknown 3 is the orientation of station A.
pub fn points() -> PointData {
    let mut points = BTreeMap::new();
    points.insert(PointId::from("A"), LocalPoint::planar(0.0, 0.0, PointRole::Fixed));
    points.insert(
        PointId::from("B"),
        LocalPoint::planar(100.0, 0.0, PointRole::Adjusted).with_xy_unknowns(1, 2),
    );
    points.insert(
        PointId::from("C"),
        LocalPoint::planar(100.0, 100.0, PointRole::Adjusted)
            .with_xy_unknowns(4, 5)
            .with_height(50.0, PointRole::Fixed),
    );
    points.insert(
        PointId::from("D"),
        LocalPoint::height(10.0, PointRole::Adjusted).with_z_unknown(6),
    );
    points
}

pub fn observations() -> Vec<ObservationRecord> {
    let angle = Observation::Angle(AngleLeg {
        from: PointId::from("A"),
        left: PointId::from("B"),
        right: PointId::from("C"),
        value: PI / 4.0,
        extern_label: None,
        cluster: 0,
    });

    vec![
        ObservationRecord {
            observation: Observation::Direction(leg("A", "B", 0.0)),
            stats: stats(-3.0, 40.0, 0.5),
        },
        ObservationRecord {
            observation: Observation::Distance(leg("A", "B", 100.0)),
            stats: stats(1.5, 60.0, 2.5),
        },
        ObservationRecord {
            observation: angle,
            stats: stats(2.0, 30.0, 0.3),
        },
        ObservationRecord {
            observation: Observation::HeightDiff(leg("C", "D", -40.0)),
            stats: stats(0.2, 0.05, 0.1),
        },
        ObservationRecord {
            observation: Observation::CoordinateZ(coordinate("D", 10.0, 1)),
            stats: stats(0.5, 6.0, 1.0),
        },
        ObservationRecord {
            observation: Observation::Dy(leg("B", "C", 100.0)),
            stats: stats(0.8, 8.0, 0.2),
        },
        ObservationRecord {
            observation: Observation::ZenithAngle(leg("B", "C", PI / 2.0)),
            stats: stats(1.0, 20.0, 0.4),
        },
        ObservationRecord {
            observation: Observation::SlopeDistance(leg("A", "C", 141.42)),
            stats: stats(-0.4, 35.0, 0.6),
        },
        ObservationRecord {
            observation: Observation::Azimuth(leg("A", "C", PI / 4.0)),
            stats: stats(-1.0, 25.0, 0.7),
        },
        ObservationRecord {
            observation: Observation::Dx(leg("B", "C", 0.0)),
            stats: stats(0.1, 9.0, 0.3),
        },
        ObservationRecord {
            observation: Observation::Dz(leg("C", "D", -40.0)),
            stats: stats(0.0, 9.0, 0.0),
        },
        ObservationRecord {
            observation: Observation::CoordinateX(coordinate("B", 100.0, 1)),
            stats: stats(0.3, 12.0, 0.9),
        },
        ObservationRecord {
            observation: Observation::CoordinateY(coordinate("B", 0.0, 1)),
            stats: stats(-0.3, 12.0, 0.9),
        },
    ]
}

pub fn unknowns() -> Vec<Unknown> {
    vec![
        Unknown::Coordinate { correction: 1.0 },
        Unknown::Coordinate { correction: -2.0 },
        Unknown::Orientation {
            station: PointId::from("A"),
            orientation: PI / 2.0,
            correction: -20.0,
        },
        Unknown::Coordinate { correction: 3.0 },
        Unknown::Coordinate { correction: 0.5 },
        Unknown::Coordinate { correction: -1.5 },
    ]
}

/// qxx(i, j) = 10 * min(i, j) + max(i, j), so every entry names its indices
pub fn covariance(dim: usize) -> DMatrix<f64> {
    DMatrix::from_fn(dim, dim, |r, c| (10 * (r.min(c) + 1) + r.max(c) + 1) as f64)
}

pub fn sample_network() -> NetworkSnapshot {
    network_with_info(info())
}

/// The sample network under different general parameters
pub fn network_with_info(info: NetworkInfo) -> NetworkSnapshot {
    let mut ellipses = BTreeMap::new();
    ellipses.insert(
        PointId::from("B"),
        StdErrorEllipse {
            major: 2.0,
            minor: 1.0,
            alpha: 45.0,
        },
    );
    ellipses.insert(
        PointId::from("C"),
        StdErrorEllipse {
            major: 3.0,
            minor: 0.5,
            alpha: 120.0,
        },
    );

    let observations = observations();
    let unknowns = unknowns();
    let dof = observations.len() - unknowns.len();

    NetworkSnapshot::new(
        info,
        statistics(dof),
        points(),
        vec![
            Cluster::default(),
            Cluster {
                extern_label: Some("gnss".to_string()),
                covariance_band: 2,
            },
        ],
        observations,
        unknowns,
        covariance(6),
        ellipses,
    )
    .expect("fixture network is consistent")
}
