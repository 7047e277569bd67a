//! Core types, constants and the solved-network interface

pub mod constants;
pub mod network;
pub mod snapshot;
pub mod types;

#[cfg(test)]
pub(crate) mod fixtures;

pub use constants::*;
pub use network::{AdjustmentResults, AdjustmentStatistics, NetworkInfo, PointData};
pub use snapshot::{NetworkSnapshot, ObservationRecord, SnapshotError};
pub use types::*;
