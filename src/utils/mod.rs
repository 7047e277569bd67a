//! Report configuration

pub mod config;

pub use config::{ConfigError, Precision, ReportConfig};
