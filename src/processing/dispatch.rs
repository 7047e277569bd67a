//! Per-kind rendering of observations
//!
//! `dispatch` resolves everything that depends on the observation kind (tag,
//! label source, units, sign, normalization, endpoints) into a plain value.
//! The report writer emits the element head, appends statistics and closes
//! the element with the returned tag.

use super::normalize::{normalize_grads, rad_to_grad, residual_correction};
use crate::api::xml::{escape, Fixed};
use crate::core::{Cluster, Observation, PointId};
use std::io::{self, Write};

/// Precision class of observed and adjusted values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrecisionClass {
    Linear,
    Angular,
}

/// Point identities closing the element head
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoints<'a> {
    FromTo {
        from: &'a PointId,
        to: &'a PointId,
    },
    Angle {
        from: &'a PointId,
        left: &'a PointId,
        right: &'a PointId,
    },
    Id(&'a PointId),
}

/// Observation resolved for output
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchedObservation<'a> {
    pub tag: &'static str,
    pub extern_label: Option<&'a str>,
    /// Observed value in meters or grads, sign convention applied
    pub observed: f64,
    /// Observed value plus correction, sign convention applied
    pub adjusted: f64,
    pub precision: PrecisionClass,
    pub endpoints: Endpoints<'a>,
}

/// Resolve an observation with its residual (mm or cc) for output
pub fn dispatch<'a>(
    observation: &'a Observation,
    cluster: &'a Cluster,
    residual: f64,
    y_sign: f64,
) -> DispatchedObservation<'a> {
    let kind = observation.kind();
    let correction = residual_correction(kind, residual);

    let (observed, adjusted, precision) = if kind.is_angular() {
        let observed = rad_to_grad(observation.value());
        (observed, normalize_grads(observed + correction), PrecisionClass::Angular)
    } else {
        let sign = if kind.follows_y_sign() { y_sign } else { 1.0 };
        let observed = observation.value();
        (sign * observed, sign * (observed + correction), PrecisionClass::Linear)
    };

    let (own_label, endpoints) = match observation {
        Observation::Angle(a) => (
            a.extern_label.as_deref(),
            Endpoints::Angle {
                from: &a.from,
                left: &a.left,
                right: &a.right,
            },
        ),
        Observation::CoordinateX(c) | Observation::CoordinateY(c) | Observation::CoordinateZ(c) => {
            (cluster.extern_label.as_deref(), Endpoints::Id(&c.id))
        }
        Observation::Distance(l)
        | Observation::Direction(l)
        | Observation::HeightDiff(l)
        | Observation::SlopeDistance(l)
        | Observation::ZenithAngle(l)
        | Observation::Dx(l)
        | Observation::Dy(l)
        | Observation::Dz(l)
        | Observation::Azimuth(l) => (
            l.extern_label.as_deref(),
            Endpoints::FromTo {
                from: &l.from,
                to: &l.to,
            },
        ),
    };

    DispatchedObservation {
        tag: kind.tag(),
        extern_label: own_label.filter(|s| !s.is_empty()),
        observed,
        adjusted,
        precision,
        endpoints,
    }
}

impl DispatchedObservation<'_> {
    /// Opening tag and endpoint identities, ending the line
    pub fn write_head<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "<{}", self.tag)?;
        if let Some(label) = self.extern_label {
            write!(out, " extern=\"{}\"", escape(label))?;
        }
        write!(out, ">")?;
        match self.endpoints {
            Endpoints::FromTo { from, to } => writeln!(
                out,
                " <from>{}</from> <to>{}</to>",
                escape(from.as_str()),
                escape(to.as_str())
            ),
            Endpoints::Angle { from, left, right } => writeln!(
                out,
                " <from>{}</from> <left>{}</left> <right>{}</right>",
                escape(from.as_str()),
                escape(left.as_str()),
                escape(right.as_str())
            ),
            Endpoints::Id(id) => writeln!(out, " <id>{}</id>", escape(id.as_str())),
        }
    }

    /// Observed and adjusted values with the precision of their class
    pub fn write_values<W: Write + ?Sized>(
        &self,
        out: &mut W,
        linear: usize,
        angular: usize,
    ) -> io::Result<()> {
        let precision = match self.precision {
            PrecisionClass::Linear => linear,
            PrecisionClass::Angular => angular,
        };
        write!(
            out,
            "   <obs>{}</obs> <adj>{}</adj>",
            Fixed(self.observed, precision),
            Fixed(self.adjusted, precision)
        )
    }

    /// Closing tag of the element
    pub fn write_close<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "\n   </{}>", self.tag)
    }
}
