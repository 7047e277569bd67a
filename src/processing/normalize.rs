//! Angular unit and axis sign conventions shared by the report sections

use crate::core::{
    AngleHandedness, AngularUnits, AxesXy, ObservationKind, ANGULAR_RESIDUAL_SCALE,
    CC_TO_ARCSEC, FULL_CIRCLE_GRADS, LINEAR_RESIDUAL_SCALE, R2G,
};

/// Convert radians to grads
pub fn rad_to_grad(radians: f64) -> f64 {
    radians * R2G
}

/// Bring an angle in grads into [0, 400) with a single correction step.
///
/// Values more than one full circle out of range are left out of range.
pub fn normalize_grads(grads: f64) -> f64 {
    let mut g = grads;
    if g < 0.0 {
        g += FULL_CIRCLE_GRADS;
    }
    if g >= FULL_CIRCLE_GRADS {
        g -= FULL_CIRCLE_GRADS;
    }
    g
}

/// Multiplier applied to Y coordinates, Y differences and orientations.
///
/// +1 when the handedness of the axes agrees with the handedness of angles.
pub fn y_sign(axes: AxesXy, angles: AngleHandedness) -> f64 {
    if axes.is_right_handed() == angles.is_right_handed() {
        1.0
    } else {
        -1.0
    }
}

/// Scale of reported standard deviations and gross error estimates
pub fn unit_scale(kind: ObservationKind, units: AngularUnits) -> f64 {
    if !kind.uses_angular_scale() {
        return 1.0;
    }
    match units {
        AngularUnits::Gons => 1.0,
        AngularUnits::Degrees => CC_TO_ARCSEC,
    }
}

/// Residual converted to the reporting unit of the observation kind
pub fn residual_correction(kind: ObservationKind, residual: f64) -> f64 {
    if kind.is_angular() {
        residual / ANGULAR_RESIDUAL_SCALE
    } else {
        residual / LINEAR_RESIDUAL_SCALE
    }
}
