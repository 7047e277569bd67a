//! Core data types of a solved local geodetic network

use serde::{Deserialize, Serialize};
use std::fmt;

/// Point identifier, ordered the way the point map is iterated
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointId(pub String);

impl PointId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PointId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Role of one coordinate subsystem (XY or Z) of an active point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointRole {
    /// Free coordinates estimated by the adjustment
    Adjusted,
    /// Estimated coordinates tied by datum constraints
    Constrained,
    /// Coordinates held fixed
    Fixed,
}

/// Point of a local network with its approximate coordinates and unknown indices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalPoint {
    /// Approximate x coordinate (meters)
    #[serde(default)]
    pub x: f64,
    /// Approximate y coordinate (meters), in the solver's axis orientation
    #[serde(default)]
    pub y: f64,
    /// Approximate height (meters)
    #[serde(default)]
    pub z: f64,
    /// Role of the XY subsystem, `None` when the point is inactive in XY
    #[serde(default)]
    pub xy_role: Option<PointRole>,
    /// Role of the Z subsystem, `None` when the point is inactive in Z
    #[serde(default)]
    pub z_role: Option<PointRole>,
    /// 1-based index of the x unknown, 0 when x is not estimated
    #[serde(default)]
    pub index_x: usize,
    /// 1-based index of the y unknown, 0 when y is not estimated
    #[serde(default)]
    pub index_y: usize,
    /// 1-based index of the z unknown, 0 when z is not estimated
    #[serde(default)]
    pub index_z: usize,
}

impl LocalPoint {
    /// Point with active XY coordinates only
    pub fn planar(x: f64, y: f64, role: PointRole) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            xy_role: Some(role),
            z_role: None,
            index_x: 0,
            index_y: 0,
            index_z: 0,
        }
    }

    /// Point with an active height only
    pub fn height(z: f64, role: PointRole) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z,
            xy_role: None,
            z_role: Some(role),
            index_x: 0,
            index_y: 0,
            index_z: 0,
        }
    }

    /// Assign unknown indices to the XY subsystem
    pub fn with_xy_unknowns(mut self, index_x: usize, index_y: usize) -> Self {
        self.index_x = index_x;
        self.index_y = index_y;
        self
    }

    /// Activate the Z subsystem
    pub fn with_height(mut self, z: f64, role: PointRole) -> Self {
        self.z = z;
        self.z_role = Some(role);
        self
    }

    /// Assign the unknown index of the height
    pub fn with_z_unknown(mut self, index_z: usize) -> Self {
        self.index_z = index_z;
        self
    }

    pub fn active_xy(&self) -> bool {
        self.xy_role.is_some()
    }

    pub fn active_z(&self) -> bool {
        self.z_role.is_some()
    }

    pub fn active(&self) -> bool {
        self.active_xy() || self.active_z()
    }

    pub fn free_xy(&self) -> bool {
        self.xy_role == Some(PointRole::Adjusted)
    }

    pub fn free_z(&self) -> bool {
        self.z_role == Some(PointRole::Adjusted)
    }

    pub fn constrained_xy(&self) -> bool {
        self.xy_role == Some(PointRole::Constrained)
    }

    pub fn constrained_z(&self) -> bool {
        self.z_role == Some(PointRole::Constrained)
    }

    pub fn fixed_xy(&self) -> bool {
        self.xy_role == Some(PointRole::Fixed)
    }

    pub fn fixed_z(&self) -> bool {
        self.z_role == Some(PointRole::Fixed)
    }

    /// XY coordinates are unknowns of the adjustment
    pub fn has_xy_unknowns(&self) -> bool {
        self.active_xy() && self.index_x != 0
    }

    /// Height is an unknown of the adjustment
    pub fn has_z_unknown(&self) -> bool {
        self.active_z() && self.index_z != 0
    }

    /// XY coordinates are active but not estimated
    pub fn has_fixed_xy(&self) -> bool {
        self.active_xy() && self.index_x == 0
    }

    /// Height is active but not estimated
    pub fn has_fixed_z(&self) -> bool {
        self.active_z() && self.index_z == 0
    }
}

/// Kind tag of an observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObservationKind {
    Distance,
    Direction,
    Angle,
    HeightDiff,
    SlopeDistance,
    ZenithAngle,
    CoordinateX,
    CoordinateY,
    CoordinateZ,
    Dx,
    Dy,
    Dz,
    Azimuth,
}

impl ObservationKind {
    /// Element name used in the report
    pub fn tag(self) -> &'static str {
        match self {
            ObservationKind::Distance => "distance",
            ObservationKind::Direction => "direction",
            ObservationKind::Angle => "angle",
            ObservationKind::HeightDiff => "height-diff",
            ObservationKind::SlopeDistance => "slope-distance",
            ObservationKind::ZenithAngle => "zenith-angle",
            ObservationKind::CoordinateX => "coordinate-x",
            ObservationKind::CoordinateY => "coordinate-y",
            ObservationKind::CoordinateZ => "coordinate-z",
            ObservationKind::Dx => "dx",
            ObservationKind::Dy => "dy",
            ObservationKind::Dz => "dz",
            ObservationKind::Azimuth => "azimuth",
        }
    }

    /// Observed in radians, reported in grads
    pub fn is_angular(self) -> bool {
        matches!(
            self,
            ObservationKind::Direction
                | ObservationKind::Angle
                | ObservationKind::ZenithAngle
                | ObservationKind::Azimuth
        )
    }

    /// Y-type values follow the axis sign convention
    pub fn follows_y_sign(self) -> bool {
        matches!(self, ObservationKind::CoordinateY | ObservationKind::Dy)
    }

    /// Kinds whose standard deviation and gross error estimates are scaled
    /// by the angular unit convention
    pub fn uses_angular_scale(self) -> bool {
        matches!(
            self,
            ObservationKind::Direction | ObservationKind::Angle | ObservationKind::ZenithAngle
        )
    }
}

/// Observation between two points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub from: PointId,
    pub to: PointId,
    /// Observed value in meters or radians
    pub value: f64,
    /// External label attached to the observation
    #[serde(default, rename = "extern")]
    pub extern_label: Option<String>,
    /// Index of the owning cluster
    #[serde(default)]
    pub cluster: usize,
}

/// Horizontal angle measured at `from` between the `left` and `right` targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleLeg {
    pub from: PointId,
    pub left: PointId,
    pub right: PointId,
    /// Observed angle in radians
    pub value: f64,
    #[serde(default, rename = "extern")]
    pub extern_label: Option<String>,
    #[serde(default)]
    pub cluster: usize,
}

/// Observed coordinate of a single point; its label lives on the cluster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateObs {
    pub id: PointId,
    /// Observed coordinate in meters
    pub value: f64,
    #[serde(default)]
    pub cluster: usize,
}

/// Observation of a local network, closed over all supported kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Observation {
    #[serde(rename = "distance")]
    Distance(Leg),
    #[serde(rename = "direction")]
    Direction(Leg),
    #[serde(rename = "angle")]
    Angle(AngleLeg),
    #[serde(rename = "height-diff")]
    HeightDiff(Leg),
    #[serde(rename = "slope-distance")]
    SlopeDistance(Leg),
    #[serde(rename = "zenith-angle")]
    ZenithAngle(Leg),
    #[serde(rename = "coordinate-x")]
    CoordinateX(CoordinateObs),
    #[serde(rename = "coordinate-y")]
    CoordinateY(CoordinateObs),
    #[serde(rename = "coordinate-z")]
    CoordinateZ(CoordinateObs),
    #[serde(rename = "dx")]
    Dx(Leg),
    #[serde(rename = "dy")]
    Dy(Leg),
    #[serde(rename = "dz")]
    Dz(Leg),
    #[serde(rename = "azimuth")]
    Azimuth(Leg),
}

impl Observation {
    pub fn kind(&self) -> ObservationKind {
        match self {
            Observation::Distance(_) => ObservationKind::Distance,
            Observation::Direction(_) => ObservationKind::Direction,
            Observation::Angle(_) => ObservationKind::Angle,
            Observation::HeightDiff(_) => ObservationKind::HeightDiff,
            Observation::SlopeDistance(_) => ObservationKind::SlopeDistance,
            Observation::ZenithAngle(_) => ObservationKind::ZenithAngle,
            Observation::CoordinateX(_) => ObservationKind::CoordinateX,
            Observation::CoordinateY(_) => ObservationKind::CoordinateY,
            Observation::CoordinateZ(_) => ObservationKind::CoordinateZ,
            Observation::Dx(_) => ObservationKind::Dx,
            Observation::Dy(_) => ObservationKind::Dy,
            Observation::Dz(_) => ObservationKind::Dz,
            Observation::Azimuth(_) => ObservationKind::Azimuth,
        }
    }

    /// Observed value in internal units (meters or radians)
    pub fn value(&self) -> f64 {
        match self {
            Observation::Angle(a) => a.value,
            Observation::CoordinateX(c) | Observation::CoordinateY(c) | Observation::CoordinateZ(c) => {
                c.value
            }
            Observation::Distance(l)
            | Observation::Direction(l)
            | Observation::HeightDiff(l)
            | Observation::SlopeDistance(l)
            | Observation::ZenithAngle(l)
            | Observation::Dx(l)
            | Observation::Dy(l)
            | Observation::Dz(l)
            | Observation::Azimuth(l) => l.value,
        }
    }

    /// Index of the owning cluster
    pub fn cluster(&self) -> usize {
        match self {
            Observation::Angle(a) => a.cluster,
            Observation::CoordinateX(c) | Observation::CoordinateY(c) | Observation::CoordinateZ(c) => {
                c.cluster
            }
            Observation::Distance(l)
            | Observation::Direction(l)
            | Observation::HeightDiff(l)
            | Observation::SlopeDistance(l)
            | Observation::ZenithAngle(l)
            | Observation::Dx(l)
            | Observation::Dy(l)
            | Observation::Dz(l)
            | Observation::Azimuth(l) => l.cluster,
        }
    }

    /// Station (or observed point for coordinate kinds)
    pub fn from(&self) -> &PointId {
        match self {
            Observation::Angle(a) => &a.from,
            Observation::CoordinateX(c) | Observation::CoordinateY(c) | Observation::CoordinateZ(c) => {
                &c.id
            }
            Observation::Distance(l)
            | Observation::Direction(l)
            | Observation::HeightDiff(l)
            | Observation::SlopeDistance(l)
            | Observation::ZenithAngle(l)
            | Observation::Dx(l)
            | Observation::Dy(l)
            | Observation::Dz(l)
            | Observation::Azimuth(l) => &l.from,
        }
    }
}

/// Observation cluster sharing one covariance matrix
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// External label, inherited by coordinate observations
    #[serde(default, rename = "extern")]
    pub extern_label: Option<String>,
    /// Bandwidth of the cluster covariance matrix, 0 for a diagonal matrix
    #[serde(default)]
    pub covariance_band: usize,
}

/// Per-observation statistics computed by the adjustment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservationStatistics {
    /// Residual in mm or cc
    pub residual: f64,
    /// A priori standard deviation in mm or cc
    pub stdev: f64,
    /// Weight coefficient of the residual
    pub qrr: f64,
    /// Local redundancy (percent)
    pub f: f64,
    /// Studentized residual
    pub studentized_residual: f64,
    /// Observation weight
    pub weight: f64,
}

/// Entry of the solved unknown vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Unknown {
    /// Coordinate correction in millimetres
    Coordinate { correction: f64 },
    /// Orientation shift of a station; correction in cc, orientation in radians
    Orientation {
        station: PointId,
        orientation: f64,
        correction: f64,
    },
}

impl Unknown {
    pub fn correction(&self) -> f64 {
        match self {
            Unknown::Coordinate { correction } | Unknown::Orientation { correction, .. } => {
                *correction
            }
        }
    }

    pub fn is_orientation(&self) -> bool {
        matches!(self, Unknown::Orientation { .. })
    }
}

/// Standard error ellipse of an adjusted point
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StdErrorEllipse {
    pub major: f64,
    pub minor: f64,
    pub alpha: f64,
}

/// Orientation of the local XY axes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxesXy {
    En,
    Nw,
    Se,
    Ws,
    #[default]
    Ne,
    Sw,
    Es,
    Wn,
}

impl AxesXy {
    pub fn as_str(self) -> &'static str {
        match self {
            AxesXy::En => "en",
            AxesXy::Nw => "nw",
            AxesXy::Se => "se",
            AxesXy::Ws => "ws",
            AxesXy::Ne => "ne",
            AxesXy::Sw => "sw",
            AxesXy::Es => "es",
            AxesXy::Wn => "wn",
        }
    }

    pub fn is_right_handed(self) -> bool {
        matches!(self, AxesXy::En | AxesXy::Nw | AxesXy::Se | AxesXy::Ws)
    }
}

/// Direction in which angles increase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AngleHandedness {
    RightHanded,
    #[default]
    LeftHanded,
}

impl AngleHandedness {
    pub fn as_str(self) -> &'static str {
        match self {
            AngleHandedness::RightHanded => "right-handed",
            AngleHandedness::LeftHanded => "left-handed",
        }
    }

    pub fn is_right_handed(self) -> bool {
        self == AngleHandedness::RightHanded
    }
}

/// Angular unit used for reported standard deviations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngularUnits {
    #[default]
    Gons,
    Degrees,
}

/// Which reference standard deviation scales the covariances
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SigmaSource {
    Apriori,
    #[default]
    Aposteriori,
}

impl SigmaSource {
    pub fn as_str(self) -> &'static str {
        match self {
            SigmaSource::Apriori => "apriori",
            SigmaSource::Aposteriori => "aposteriori",
        }
    }
}
