//! Unit conventions, per-kind observation rendering and covariance indexing

pub mod dispatch;
pub mod indexing;
pub mod normalize;

pub use dispatch::{dispatch, DispatchedObservation, Endpoints, PrecisionClass};
pub use indexing::{effective_band, extract_band, BandEntry, IndexSet};
