//! Solved network snapshot loaded from JSON
//!
//! An adjustment engine dumps its solved state once; the snapshot then answers
//! every [`AdjustmentResults`] query from memory.

use super::network::{AdjustmentResults, AdjustmentStatistics, NetworkInfo, PointData};
use super::types::{
    Cluster, Observation, ObservationStatistics, PointId, StdErrorEllipse, Unknown,
};
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading a snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("cannot read snapshot {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("covariance matrix has {rows} rows, row {row} has {cols} columns, expected {expected}x{expected}")]
    CovarianceShape {
        rows: usize,
        row: usize,
        cols: usize,
        expected: usize,
    },
    #[error("point {point} refers to unknown {index}, network has {unknowns} unknowns")]
    UnknownIndexOutOfRange {
        point: PointId,
        index: usize,
        unknowns: usize,
    },
    #[error("point {point} has an x unknown {index_x} but a y unknown {index_y}")]
    HalfIndexedPoint {
        point: PointId,
        index_x: usize,
        index_y: usize,
    },
    #[error("point {point} refers to unknown {index}, which is an orientation shift")]
    CoordinateIndexIsOrientation { point: PointId, index: usize },
    #[error("observation {observation} refers to cluster {cluster}, network has {clusters} clusters")]
    ClusterOutOfRange {
        observation: usize,
        cluster: usize,
        clusters: usize,
    },
    #[error("orientation unknown {index} belongs to station {station} missing from the point list")]
    UnknownStation { index: usize, station: PointId },
}

/// Observation together with its adjustment statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord {
    pub observation: Observation,
    pub stats: ObservationStatistics,
}

/// Serialized layout of a snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SnapshotFile {
    info: NetworkInfo,
    statistics: AdjustmentStatistics,
    #[serde(default)]
    points: PointData,
    #[serde(default)]
    clusters: Vec<Cluster>,
    #[serde(default)]
    observations: Vec<ObservationRecord>,
    #[serde(default)]
    unknowns: Vec<Unknown>,
    #[serde(default)]
    covariance: Vec<Vec<f64>>,
    #[serde(default)]
    ellipses: BTreeMap<PointId, StdErrorEllipse>,
}

/// In-memory solved network
#[derive(Debug, Clone)]
pub struct NetworkSnapshot {
    info: NetworkInfo,
    statistics: AdjustmentStatistics,
    points: PointData,
    clusters: Vec<Cluster>,
    observations: Vec<ObservationRecord>,
    unknowns: Vec<Unknown>,
    covariance: DMatrix<f64>,
    ellipses: BTreeMap<PointId, StdErrorEllipse>,
}

impl NetworkSnapshot {
    /// Load a snapshot from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parse and validate a snapshot from JSON text
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let file: SnapshotFile = serde_json::from_str(json)?;
        Self::from_file_layout(file)
    }

    /// Serialize back to JSON
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        let dim = self.unknowns.len();
        let file = SnapshotFile {
            info: self.info.clone(),
            statistics: self.statistics.clone(),
            points: self.points.clone(),
            clusters: self.clusters.clone(),
            observations: self.observations.clone(),
            unknowns: self.unknowns.clone(),
            covariance: (0..dim)
                .map(|r| (0..dim).map(|c| self.covariance[(r, c)]).collect())
                .collect(),
            ellipses: self.ellipses.clone(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Assemble a snapshot directly, with the same validation as loading
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        info: NetworkInfo,
        statistics: AdjustmentStatistics,
        points: PointData,
        clusters: Vec<Cluster>,
        observations: Vec<ObservationRecord>,
        unknowns: Vec<Unknown>,
        covariance: DMatrix<f64>,
        ellipses: BTreeMap<PointId, StdErrorEllipse>,
    ) -> Result<Self, SnapshotError> {
        let dim = unknowns.len();
        if covariance.nrows() != dim || covariance.ncols() != dim {
            return Err(SnapshotError::CovarianceShape {
                rows: covariance.nrows(),
                row: 0,
                cols: covariance.ncols(),
                expected: dim,
            });
        }
        let snapshot = Self {
            info,
            statistics,
            points,
            clusters,
            observations,
            unknowns,
            covariance,
            ellipses,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    fn from_file_layout(file: SnapshotFile) -> Result<Self, SnapshotError> {
        let dim = file.unknowns.len();
        if file.covariance.len() != dim {
            return Err(SnapshotError::CovarianceShape {
                rows: file.covariance.len(),
                row: 0,
                cols: file.covariance.first().map_or(0, Vec::len),
                expected: dim,
            });
        }
        if let Some((row, cols)) = file
            .covariance
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != dim)
            .map(|(row, r)| (row, r.len()))
        {
            return Err(SnapshotError::CovarianceShape {
                rows: dim,
                row,
                cols,
                expected: dim,
            });
        }

        let covariance = DMatrix::from_fn(dim, dim, |r, c| file.covariance[r][c]);
        debug!(
            points = file.points.len(),
            observations = file.observations.len(),
            unknowns = dim,
            "loaded network snapshot"
        );

        Self::new(
            file.info,
            file.statistics,
            file.points,
            file.clusters,
            file.observations,
            file.unknowns,
            covariance,
            file.ellipses,
        )
    }

    fn validate(&self) -> Result<(), SnapshotError> {
        let unknowns = self.unknowns.len();
        for (id, point) in &self.points {
            let mut indices = Vec::with_capacity(3);
            if point.active_xy() {
                if (point.index_x == 0) != (point.index_y == 0) {
                    return Err(SnapshotError::HalfIndexedPoint {
                        point: id.clone(),
                        index_x: point.index_x,
                        index_y: point.index_y,
                    });
                }
                indices.push(point.index_x);
                indices.push(point.index_y);
            }
            if point.active_z() {
                indices.push(point.index_z);
            }
            // zero means the coordinate is not an unknown
            for index in indices.into_iter().filter(|&i| i != 0) {
                match self.unknowns.get(index - 1) {
                    None => {
                        return Err(SnapshotError::UnknownIndexOutOfRange {
                            point: id.clone(),
                            index,
                            unknowns,
                        })
                    }
                    Some(Unknown::Orientation { .. }) => {
                        return Err(SnapshotError::CoordinateIndexIsOrientation {
                            point: id.clone(),
                            index,
                        })
                    }
                    Some(Unknown::Coordinate { .. }) => {}
                }
            }
        }

        for (k, record) in self.observations.iter().enumerate() {
            let cluster = record.observation.cluster();
            if cluster >= self.clusters.len() {
                return Err(SnapshotError::ClusterOutOfRange {
                    observation: k + 1,
                    cluster,
                    clusters: self.clusters.len(),
                });
            }
        }

        for (k, unknown) in self.unknowns.iter().enumerate() {
            if let Unknown::Orientation { station, .. } = unknown {
                if !self.points.contains_key(station) {
                    return Err(SnapshotError::UnknownStation {
                        index: k + 1,
                        station: station.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl AdjustmentResults for NetworkSnapshot {
    fn info(&self) -> &NetworkInfo {
        &self.info
    }

    fn statistics(&self) -> &AdjustmentStatistics {
        &self.statistics
    }

    fn points(&self) -> &PointData {
        &self.points
    }

    fn observations_count(&self) -> usize {
        self.observations.len()
    }

    fn observation(&self, index: usize) -> &Observation {
        &self.observations[index - 1].observation
    }

    fn observation_statistics(&self, index: usize) -> ObservationStatistics {
        self.observations[index - 1].stats
    }

    fn cluster(&self, cluster: usize) -> &Cluster {
        &self.clusters[cluster]
    }

    fn unknowns_count(&self) -> usize {
        self.unknowns.len()
    }

    fn unknown(&self, index: usize) -> &Unknown {
        &self.unknowns[index - 1]
    }

    fn qxx(&self, i: usize, j: usize) -> f64 {
        self.covariance[(i - 1, j - 1)]
    }

    fn std_error_ellipse(&self, id: &PointId) -> StdErrorEllipse {
        self.ellipses.get(id).copied().unwrap_or_default()
    }
}
