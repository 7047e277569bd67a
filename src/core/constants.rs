//! Unit conversions and fixed identifiers of the report format

use std::f64::consts::PI;

/// Radians to grads (400 grads per full circle)
pub const R2G: f64 = 200.0 / PI;

/// Grads in a full circle
pub const FULL_CIRCLE_GRADS: f64 = 400.0;

/// Residuals of linear observations are stored in millimetres
pub const LINEAR_RESIDUAL_SCALE: f64 = 1000.0;

/// Residuals of angular observations are stored in 1e-4 grads (cc)
pub const ANGULAR_RESIDUAL_SCALE: f64 = 10000.0;

/// Standard deviations in cc converted to sexagesimal seconds
pub const CC_TO_ARCSEC: f64 = 0.324;

/// Namespace of the adjustment report schema
pub const SCHEMA_NAMESPACE: &str = "http://www.gnu.org/software/gama/gama-local-adjustment";

/// Precision forced on verification builds
pub const MAX_PRECISION: usize = 16;

/// Local redundancy below which no studentized residual is reported
pub const MIN_CONTROL: f64 = 0.1;

/// Local redundancy from which a gross error estimate is always reported
pub const STRONG_CONTROL: f64 = 5.0;
