use crate::core::MAX_PRECISION;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Output precision of the report (decimal places)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Observed and adjusted distances, height differences and coordinates
    pub linear_precision: usize,
    /// Observed and adjusted angles in grads
    pub angular_precision: usize,
    /// Adjusted coordinates and standard error ellipses
    pub coordinate_precision: usize,
    /// A priori standard deviations of observations
    pub stdev_precision: usize,
    /// Force every precision to the maximum, used to compare builds
    pub max_precision: bool,
}

/// Precision resolved for one report run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Precision {
    pub linear: usize,
    pub angular: usize,
    pub coordinate: usize,
    pub stdev: usize,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid value {value} for {parameter}: {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            linear_precision: 6,
            angular_precision: 7,
            coordinate_precision: 6,
            stdev_precision: 3,
            max_precision: false,
        }
    }
}

impl ReportConfig {
    /// Load and validate configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&content)?;
        debug!(path = %path.display(), "loaded report configuration");
        Ok(config)
    }

    /// Parse and validate configuration from JSON text
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every precision can be honoured
    pub fn validate(&self) -> Result<(), ConfigError> {
        let precisions = [
            ("linear_precision", self.linear_precision),
            ("angular_precision", self.angular_precision),
            ("coordinate_precision", self.coordinate_precision),
            ("stdev_precision", self.stdev_precision),
        ];
        for (parameter, value) in precisions {
            if value > MAX_PRECISION {
                return Err(ConfigError::InvalidParameter {
                    parameter: parameter.to_string(),
                    value: value.to_string(),
                    reason: format!("precision must not exceed {MAX_PRECISION}"),
                });
            }
        }
        Ok(())
    }

    /// Precision with the maximal-precision override applied
    pub fn effective_precision(&self) -> Precision {
        if self.max_precision {
            Precision {
                linear: MAX_PRECISION,
                angular: MAX_PRECISION,
                coordinate: MAX_PRECISION,
                stdev: MAX_PRECISION,
            }
        } else {
            Precision {
                linear: self.linear_precision,
                angular: self.angular_precision,
                coordinate: self.coordinate_precision,
                stdev: self.stdev_precision,
            }
        }
    }
}
