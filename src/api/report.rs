//! XML adjustment report of a solved local network
//!
//! Sections are written in a fixed order: general parameters, processing
//! summary, coordinates with their covariance band, then observations.

use super::xml::{escape, tag_nl, tag_sp, Fixed, Sci};
use crate::core::{
    AdjustmentResults, LocalPoint, PointId, Unknown, ANGULAR_RESIDUAL_SCALE, LINEAR_RESIDUAL_SCALE,
    R2G, SCHEMA_NAMESPACE,
};
use crate::processing::dispatch::dispatch;
use crate::processing::indexing::{effective_band, extract_band, IndexSet};
use crate::processing::normalize::{normalize_grads, rad_to_grad, y_sign};
use crate::utils::config::{Precision, ReportConfig};
use crate::validation::error::{ReportError, ReportResult};
use crate::validation::hypothesis::{StandardDeviationSummary, Verdict};
use crate::validation::outliers::OutlierAssessment;
use crate::validation::summary::{NetworkSummary, RoleCounts};
use std::io::{self, Write};
use tracing::{debug, info};

/// Precision of fixed and approximate coordinates and orientation shifts
const APPROXIMATE_PRECISION: usize = 6;

/// Precision of header values (epoch, latitude) and scientific summary values
const SUMMARY_PRECISION: usize = 7;

/// Precision of test values and observation statistics
const STATISTICS_PRECISION: usize = 3;

/// Flattened covariance values per output line
const FLOATS_PER_LINE: usize = 3;

/// Report generator over a solved network
pub struct AdjustmentReport<'a, N: AdjustmentResults + ?Sized> {
    network: &'a N,
    config: ReportConfig,
}

impl<'a, N: AdjustmentResults + ?Sized> AdjustmentReport<'a, N> {
    /// Report with default precision
    pub fn new(network: &'a N) -> Self {
        Self {
            network,
            config: ReportConfig::default(),
        }
    }

    /// Use the given output configuration
    pub fn with_config(mut self, config: ReportConfig) -> Self {
        self.config = config;
        self
    }

    /// Force maximal precision of coordinates and observations
    pub fn with_max_precision(mut self, enabled: bool) -> Self {
        self.config.max_precision = enabled;
        self
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Write the whole document to `out`
    pub fn write<W: Write + ?Sized>(&self, out: &mut W) -> ReportResult<()> {
        self.config.validate()?;
        let precision = self.config.effective_precision();
        let info = self.network.info();
        let y_sign = y_sign(info.axes_xy, info.angles);
        debug!(?precision, y_sign, "writing adjustment report");

        writeln!(out, "<?xml version=\"1.0\"?>")?;
        writeln!(out, "<gama-local-adjustment xmlns=\"{SCHEMA_NAMESPACE}\">")?;
        writeln!(out, "\n<description>{}</description>", escape(&info.description))?;

        self.write_general_parameters(out)?;
        self.write_processing_summary(out)?;
        self.write_coordinates(out, &precision, y_sign)?;
        self.write_observations(out, &precision, y_sign)?;

        writeln!(out, "\n</gama-local-adjustment>")?;
        out.flush()?;
        info!(
            observations = self.network.observations_count(),
            unknowns = self.network.unknowns_count(),
            "adjustment report written"
        );
        Ok(())
    }

    /// Render the document into a string
    pub fn to_xml_string(&self) -> ReportResult<String> {
        let mut buffer = Vec::new();
        self.write(&mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| ReportError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }

    fn write_general_parameters<W: Write + ?Sized>(&self, out: &mut W) -> ReportResult<()> {
        let info = self.network.info();
        writeln!(out, "\n<network-general-parameters")?;
        writeln!(out, "   gama-local-version=\"{}\"", escape(&info.version))?;
        writeln!(out, "   gama-local-algorithm=\"{}\"", escape(&info.algorithm))?;
        writeln!(out, "   gama-local-compiler=\"{}\"", escape(&info.compiler))?;
        writeln!(out, "   axes-xy=\"{}\"", info.axes_xy.as_str())?;
        writeln!(out, "   angles=\"{}\"", info.angles.as_str())?;
        if let Some(epoch) = info.epoch {
            writeln!(out, "   epoch=\"{}\"", Fixed(epoch, SUMMARY_PRECISION))?;
        }
        if let Some(latitude) = info.latitude {
            writeln!(
                out,
                "   latitude=\"{}\"",
                Fixed(rad_to_grad(latitude), SUMMARY_PRECISION)
            )?;
        }
        if let Some(ellipsoid) = &info.ellipsoid {
            writeln!(out, "   ellipsoid=\"{}\"", escape(ellipsoid))?;
        }
        writeln!(out, "/>")?;
        Ok(())
    }

    fn write_processing_summary<W: Write + ?Sized>(&self, out: &mut W) -> ReportResult<()> {
        let summary = NetworkSummary::build(self.network);
        debug!(
            coordinates = ?summary.coordinates,
            observations = ?summary.observations,
            "processing summary"
        );

        writeln!(out, "\n<network-processing-summary>")?;

        writeln!(out, "\n<coordinates-summary>")?;
        write_role_counts(out, "adjusted", "    ", &summary.coordinates.adjusted)?;
        write_role_counts(out, "constrained", " ", &summary.coordinates.constrained)?;
        write_role_counts(out, "fixed", "       ", &summary.coordinates.fixed)?;
        writeln!(out, "</coordinates-summary>")?;

        let counts = &summary.observations;
        writeln!(out, "\n<observations-summary>")?;
        tag_nl(out, "distances", counts.distances)?;
        tag_nl(out, "directions", counts.directions)?;
        tag_nl(out, "angles", counts.angles)?;
        tag_nl(out, "xyz-coords", counts.coordinates)?;
        tag_nl(out, "h-diffs", counts.height_diffs)?;
        tag_nl(out, "z-angles", counts.zenith_angles)?;
        tag_nl(out, "s-dists", counts.slope_distances)?;
        tag_nl(out, "vectors", counts.vectors)?;
        tag_nl(out, "azimuths", counts.azimuths)?;
        writeln!(out, "</observations-summary>")?;

        let equations = &summary.equations;
        writeln!(out, "\n<project-equations>")?;
        tag_nl(out, "equations", equations.equations)?;
        tag_nl(out, "unknowns", equations.unknowns)?;
        tag_nl(out, "degrees-of-freedom", equations.degrees_of_freedom)?;
        tag_nl(out, "defect", equations.defect)?;
        tag_nl(out, "sum-of-squares", Sci(equations.sum_of_squares, SUMMARY_PRECISION))?;
        if let Some(iterations) = equations.linearization_iterations {
            tag_nl(out, "linearization-iterations", iterations)?;
        }
        if equations.connected_network {
            writeln!(out, "   <connected-network/>")?;
        } else {
            writeln!(out, "   <disconnected-network/>")?;
        }
        writeln!(out, "</project-equations>")?;

        self.write_standard_deviation(out)?;

        writeln!(out, "\n</network-processing-summary>")?;
        Ok(())
    }

    fn write_standard_deviation<W: Write + ?Sized>(&self, out: &mut W) -> ReportResult<()> {
        let sd = StandardDeviationSummary::build(self.network)?;
        let test = &sd.test;

        writeln!(out, "\n<standard-deviation>")?;
        tag_nl(out, "apriori", Sci(sd.apriori, SUMMARY_PRECISION))?;
        tag_nl(out, "aposteriori", Sci(sd.aposteriori, SUMMARY_PRECISION))?;
        tag_nl(out, "used", sd.used.as_str())?;
        writeln!(out)?;
        tag_nl(out, "probability", Fixed(sd.probability, STATISTICS_PRECISION))?;

        match test.verdict {
            Verdict::NotApplicable => {
                writeln!(out)?;
                writeln!(out, "   <!-- degrees of freedom is zero -->")?;
                writeln!(out, "   <!-- the standard deviation test is not applicable -->")?;
                tag_nl(out, "ratio", 0)?;
                tag_nl(out, "lower", 0)?;
                tag_nl(out, "upper", 0)?;
            }
            Verdict::Passed | Verdict::Failed => {
                tag_nl(out, "ratio", Fixed(test.ratio, STATISTICS_PRECISION))?;
                tag_nl(out, "lower", Fixed(test.lower, STATISTICS_PRECISION))?;
                tag_nl(out, "upper", Fixed(test.upper, STATISTICS_PRECISION))?;
            }
        }
        writeln!(out, "   <{}/>\n", test.verdict.tag())?;

        tag_nl(out, "confidence-scale", Sci(sd.confidence_scale, SUMMARY_PRECISION))?;
        writeln!(out, "</standard-deviation>")?;
        Ok(())
    }

    fn write_coordinates<W: Write + ?Sized>(
        &self,
        out: &mut W,
        precision: &Precision,
        y_sign: f64,
    ) -> ReportResult<()> {
        let points = self.network.points();
        writeln!(out, "\n<coordinates>")?;

        writeln!(out, "\n<fixed>")?;
        for (id, p) in points.iter().filter(|(_, p)| p.active()) {
            let xy = p.has_fixed_xy();
            let z = p.has_fixed_z();
            if !xy && !z {
                continue;
            }
            let coords = PointCoordinates {
                x: p.x,
                y: p.y * y_sign,
                z: p.z,
            };
            write_point(out, id, &coords, xy, z, None, APPROXIMATE_PRECISION)?;
        }
        writeln!(out, "</fixed>")?;

        writeln!(out, "\n<approximate>")?;
        for (id, p) in points.iter().filter(|(_, p)| p.active()) {
            let xy = p.has_xy_unknowns();
            let z = p.has_z_unknown();
            if !xy && !z {
                continue;
            }
            let coords = PointCoordinates {
                x: p.x,
                y: p.y * y_sign,
                z: p.z,
            };
            write_point(out, id, &coords, xy, z, Some(p), APPROXIMATE_PRECISION)?;
        }
        writeln!(out, "</approximate>")?;

        writeln!(out, "\n<!-- capital X,Y,Z denote constrained coordinates -->")?;
        writeln!(out, "<adjusted>")?;
        for (id, p) in points.iter().filter(|(_, p)| p.active()) {
            let xy = p.has_xy_unknowns();
            let z = p.has_z_unknown();
            if !xy && !z {
                continue;
            }
            let coords = PointCoordinates {
                x: if xy { p.x + self.correction(p.index_x) } else { p.x },
                y: if xy {
                    (p.y + self.correction(p.index_y)) * y_sign
                } else {
                    p.y * y_sign
                },
                z: if z { p.z + self.correction(p.index_z) } else { p.z },
            };
            write_point(out, id, &coords, xy, z, Some(p), precision.coordinate)?;
        }
        writeln!(out, "</adjusted>")?;

        self.write_ellipses(out, precision.coordinate)?;
        self.write_orientation_shifts(out, y_sign)?;

        let set = IndexSet::build(self.network);
        self.write_covariance(out, &set)?;

        writeln!(out, "\n<!-- original indexes from the adjustment -->")?;
        writeln!(out, "<original-index>")?;
        for index in set.indices() {
            writeln!(out, "<ind>{index}</ind>")?;
        }
        writeln!(out, "</original-index>")?;

        writeln!(out, "\n</coordinates>")?;
        Ok(())
    }

    fn write_ellipses<W: Write + ?Sized>(&self, out: &mut W, precision: usize) -> ReportResult<()> {
        writeln!(out, "\n<std-error-ellipses>")?;
        for (id, _) in self.network.points().iter().filter(|(_, p)| p.free_xy()) {
            let ellipse = self.network.std_error_ellipse(id);
            writeln!(
                out,
                "<ellipse> <id>{}</id> <major>{}</major> <minor>{}</minor> <alpha>{}</alpha> </ellipse>",
                escape(id.as_str()),
                Sci(ellipse.major, precision),
                Sci(ellipse.minor, precision),
                Sci(ellipse.alpha, precision)
            )?;
        }
        writeln!(out, "</std-error-ellipses>")?;
        Ok(())
    }

    fn write_orientation_shifts<W: Write + ?Sized>(&self, out: &mut W, y_sign: f64) -> ReportResult<()> {
        writeln!(out, "\n<orientation-shifts>")?;
        for i in 1..=self.network.unknowns_count() {
            if let Unknown::Orientation {
                station,
                orientation,
                correction,
            } = self.network.unknown(i)
            {
                let approx = normalize_grads(y_sign * *orientation * R2G);
                let adj = normalize_grads(approx + y_sign * *correction / ANGULAR_RESIDUAL_SCALE);
                write!(out, "   <orientation> ")?;
                tag_sp(out, "id", escape(station.as_str()))?;
                tag_sp(out, "approx", Fixed(approx, APPROXIMATE_PRECISION))?;
                tag_sp(out, "adj", Fixed(adj, APPROXIMATE_PRECISION))?;
                writeln!(out, "</orientation>")?;
            }
        }
        writeln!(out, "</orientation-shifts>")?;
        Ok(())
    }

    fn write_covariance<W: Write + ?Sized>(&self, out: &mut W, set: &IndexSet) -> ReportResult<()> {
        let dim = set.dim();
        let band = effective_band(self.network.info().covariance_band, dim);
        let m0 = self.network.statistics().m0();
        let entries = extract_band(set, band, m0, |i, j| self.network.qxx(i, j));
        debug!(dim, band, entries = entries.len(), "covariance band");

        writeln!(out, "\n<!-- upper part of symmetric matrix band by rows -->")?;
        writeln!(out, "<cov-mat>")?;
        writeln!(out, "<dim>{dim}</dim> <band>{band}</band>")?;
        for (k, entry) in entries.iter().enumerate() {
            write!(out, "<flt>{}</flt>", Sci(entry.value, SUMMARY_PRECISION))?;
            if (k + 1) % FLOATS_PER_LINE == 0 {
                writeln!(out)?;
            } else {
                write!(out, " ")?;
            }
        }
        writeln!(out, "</cov-mat>")?;
        Ok(())
    }

    fn write_observations<W: Write + ?Sized>(
        &self,
        out: &mut W,
        precision: &Precision,
        y_sign: f64,
    ) -> ReportResult<()> {
        let info = self.network.info();
        let kki = self.network.statistics().confidence_coefficient;
        let mut flagged = 0usize;

        writeln!(out, "\n<observations>\n")?;
        for i in 1..=self.network.observations_count() {
            let observation = self.network.observation(i);
            let cluster = self.network.observation_cluster(i);
            let stats = self.network.observation_statistics(i);

            let rendered = dispatch(observation, cluster, stats.residual, y_sign);
            rendered.write_head(out)?;
            rendered.write_values(out, precision.linear, precision.angular)?;

            let assessment = OutlierAssessment::evaluate(
                observation.kind(),
                &stats,
                cluster.covariance_band,
                kki,
                info.angular_units,
            );
            writeln!(out, " <stdev>{}</stdev>", Fixed(assessment.stdev, precision.stdev))?;
            write!(
                out,
                "   <qrr>{}</qrr> <f>{}</f>",
                Fixed(assessment.qrr, STATISTICS_PRECISION),
                Fixed(assessment.f, STATISTICS_PRECISION)
            )?;
            if let Some(no) = assessment.std_residual {
                write!(out, " <std-residual>{}</std-residual>", Fixed(no, STATISTICS_PRECISION))?;
            }
            if let Some(gross) = assessment.gross_error {
                flagged += 1;
                write!(
                    out,
                    "\n   <err-obs>{}</err-obs> <err-adj>{}</err-adj>",
                    Fixed(gross.err_obs, STATISTICS_PRECISION),
                    Fixed(gross.err_adj, STATISTICS_PRECISION)
                )?;
            }
            rendered.write_close(out)?;
        }
        writeln!(out, "\n</observations>")?;

        debug!(flagged, "observations screened for gross errors");
        Ok(())
    }

    /// Solved coordinate correction of unknown `index` in meters
    fn correction(&self, index: usize) -> f64 {
        self.network.unknown(index).correction() / LINEAR_RESIDUAL_SCALE
    }
}

/// Coordinates of one point as written, sign convention applied
struct PointCoordinates {
    x: f64,
    y: f64,
    z: f64,
}

/// Counts of one role; `pad` aligns the three role lines
fn write_role_counts<W: Write + ?Sized>(
    out: &mut W,
    role: &str,
    pad: &str,
    counts: &RoleCounts,
) -> io::Result<()> {
    write!(out, "   <coordinates-summary-{role}>{pad}")?;
    tag_sp(out, "count-xyz", counts.xyz)?;
    tag_sp(out, "count-xy", counts.xy)?;
    tag_sp(out, "count-z", counts.z)?;
    writeln!(out, "</coordinates-summary-{role}>")
}

/// One `<point>` line; `roles` selects uppercase tags for constrained axes
fn write_point<W: Write + ?Sized>(
    out: &mut W,
    id: &PointId,
    coords: &PointCoordinates,
    xy: bool,
    z: bool,
    roles: Option<&LocalPoint>,
    precision: usize,
) -> io::Result<()> {
    let constrained_xy = roles.is_some_and(LocalPoint::constrained_xy);
    let constrained_z = roles.is_some_and(LocalPoint::constrained_z);

    write!(out, "   <point> ")?;
    tag_sp(out, "id", escape(id.as_str()))?;
    if xy {
        let (tx, ty) = if constrained_xy { ("X", "Y") } else { ("x", "y") };
        tag_sp(out, tx, Fixed(coords.x, precision))?;
        tag_sp(out, ty, Fixed(coords.y, precision))?;
    }
    if z {
        let tz = if constrained_z { "Z" } else { "z" };
        tag_sp(out, tz, Fixed(coords.z, precision))?;
    }
    writeln!(out, "</point>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{fixtures, AxesXy, PointRole};

    fn sample_report() -> String {
        let network = fixtures::sample_network();
        AdjustmentReport::new(&network).to_xml_string().unwrap()
    }

    fn section<'t>(text: &'t str, open: &str, close: &str) -> &'t str {
        let start = text.find(open).unwrap();
        let end = start + text[start..].find(close).unwrap() + close.len();
        &text[start..end]
    }

    #[test]
    fn test_document_frame() {
        let xml = sample_report();
        assert!(xml.starts_with(
            "<?xml version=\"1.0\"?>\n<gama-local-adjustment xmlns=\"http://www.gnu.org/software/gama/gama-local-adjustment\">\n\n<description>test network</description>\n"
        ));
        assert!(xml.ends_with("\n</observations>\n\n</gama-local-adjustment>\n"));
    }

    #[test]
    fn test_section_order() {
        let xml = sample_report();
        let order = [
            "<network-general-parameters",
            "<coordinates-summary>",
            "<observations-summary>",
            "<project-equations>",
            "<standard-deviation>",
            "</network-processing-summary>",
            "<fixed>",
            "<approximate>",
            "<adjusted>",
            "<std-error-ellipses>",
            "<orientation-shifts>",
            "<cov-mat>",
            "<original-index>",
            "</coordinates>",
            "<observations>",
        ];
        let positions: Vec<usize> = order.iter().map(|tag| xml.find(tag).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_general_parameters() {
        let xml = sample_report();
        assert!(xml.contains(
            "\n<network-general-parameters\n   gama-local-version=\"2.30\"\n   gama-local-algorithm=\"gso\"\n   gama-local-compiler=\"rustc\"\n   axes-xy=\"ne\"\n   angles=\"left-handed\"\n/>\n"
        ));
    }

    #[test]
    fn test_optional_parameters() {
        let mut info = fixtures::info();
        info.epoch = Some(2024.5);
        info.latitude = Some(std::f64::consts::FRAC_PI_4);
        info.ellipsoid = Some("wgs84".to_string());
        let network = fixtures::network_with_info(info);
        let xml = AdjustmentReport::new(&network).to_xml_string().unwrap();

        assert!(xml.contains(
            "   angles=\"left-handed\"\n   epoch=\"2024.5000000\"\n   latitude=\"50.0000000\"\n   ellipsoid=\"wgs84\"\n/>\n"
        ));
    }

    #[test]
    fn test_coordinates_summary() {
        let xml = sample_report();
        assert!(xml.contains(
            "   <coordinates-summary-adjusted>    <count-xyz>0</count-xyz> <count-xy>2</count-xy> <count-z>1</count-z> </coordinates-summary-adjusted>\n"
        ));
        assert!(xml.contains(
            "   <coordinates-summary-constrained> <count-xyz>0</count-xyz> <count-xy>0</count-xy> <count-z>0</count-z> </coordinates-summary-constrained>\n"
        ));
        assert!(xml.contains(
            "   <coordinates-summary-fixed>       <count-xyz>0</count-xyz> <count-xy>1</count-xy> <count-z>1</count-z> </coordinates-summary-fixed>\n"
        ));
    }

    #[test]
    fn test_observations_and_equations_summary() {
        let xml = sample_report();
        assert!(xml.contains("   <xyz-coords>3</xyz-coords>\n"));
        assert!(xml.contains("   <vectors>1</vectors>\n"));
        assert!(xml.contains(
            "   <defect>0</defect>\n   <sum-of-squares>7.0000000e+00</sum-of-squares>\n   <connected-network/>\n</project-equations>\n"
        ));
    }

    #[test]
    fn test_standard_deviation_passed() {
        let xml = sample_report();
        let sd = section(&xml, "<standard-deviation>", "</standard-deviation>");
        assert!(sd.starts_with(
            "<standard-deviation>\n   <apriori>1.0000000e+00</apriori>\n   <aposteriori>1.0000000e+00</aposteriori>\n   <used>aposteriori</used>\n\n   <probability>0.950</probability>\n   <ratio>1.000</ratio>\n"
        ));
        assert!(sd.ends_with("   <passed/>\n\n   <confidence-scale>1.9600000e+00</confidence-scale>\n</standard-deviation>"));
    }

    #[test]
    fn test_fixed_and_approximate_points() {
        let xml = sample_report();
        assert!(xml.contains(
            "\n<fixed>\n   <point> <id>A</id> <x>0.000000</x> <y>0.000000</y> </point>\n   <point> <id>C</id> <z>50.000000</z> </point>\n</fixed>\n"
        ));
        assert!(xml.contains(
            "\n<approximate>\n   <point> <id>B</id> <x>100.000000</x> <y>0.000000</y> </point>\n   <point> <id>C</id> <x>100.000000</x> <y>100.000000</y> </point>\n   <point> <id>D</id> <z>10.000000</z> </point>\n</approximate>\n"
        ));
    }

    #[test]
    fn test_adjusted_points() {
        let xml = sample_report();
        assert!(xml.contains(
            "<adjusted>\n   <point> <id>B</id> <x>100.001000</x> <y>-0.002000</y> </point>\n   <point> <id>C</id> <x>100.003000</x> <y>100.000500</y> </point>\n   <point> <id>D</id> <z>9.998500</z> </point>\n</adjusted>\n"
        ));
    }

    #[test]
    fn test_constrained_points_use_capitals() {
        let point = LocalPoint::planar(1.0, 2.0, PointRole::Constrained).with_xy_unknowns(1, 2);
        let coords = PointCoordinates { x: 1.0, y: 2.0, z: 0.0 };
        let mut out = Vec::new();
        write_point(&mut out, &PointId::from("P"), &coords, true, false, Some(&point), 2).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "   <point> <id>P</id> <X>1.00</X> <Y>2.00</Y> </point>\n"
        );
    }

    #[test]
    fn test_ellipses_for_adjusted_points() {
        let xml = sample_report();
        assert!(xml.contains(
            "\n<std-error-ellipses>\n<ellipse> <id>B</id> <major>2.000000e+00</major> <minor>1.000000e+00</minor> <alpha>4.500000e+01</alpha> </ellipse>\n<ellipse> <id>C</id> <major>3.000000e+00</major> <minor>5.000000e-01</minor> <alpha>1.200000e+02</alpha> </ellipse>\n</std-error-ellipses>\n"
        ));
    }

    #[test]
    fn test_orientation_shift() {
        let xml = sample_report();
        assert!(xml.contains(
            "\n<orientation-shifts>\n   <orientation> <id>A</id> <approx>100.000000</approx> <adj>99.998000</adj> </orientation>\n</orientation-shifts>\n"
        ));
    }

    #[test]
    fn test_orientation_shift_follows_y_sign() {
        let mut info = fixtures::info();
        info.axes_xy = AxesXy::En;
        let network = fixtures::network_with_info(info);
        let xml = AdjustmentReport::new(&network).to_xml_string().unwrap();

        // -100 grads wraps to 300, the correction flips sign as well
        assert!(xml.contains("<approx>300.000000</approx> <adj>300.002000</adj>"));
        // Y of fixed and adjusted points flips
        assert!(xml.contains("<id>B</id> <x>100.001000</x> <y>0.002000</y>"));
    }

    #[test]
    fn test_covariance_band_and_index() {
        let xml = sample_report();
        let cov = section(&xml, "<cov-mat>", "</cov-mat>");
        assert!(cov.starts_with(
            "<cov-mat>\n<dim>6</dim> <band>5</band>\n<flt>1.1000000e+01</flt> <flt>1.2000000e+01</flt> <flt>1.4000000e+01</flt>\n"
        ));
        assert_eq!(cov.matches("<flt>").count(), 21);
        assert!(cov.ends_with("\n</cov-mat>"));

        assert!(xml.contains(
            "<original-index>\n<ind>1</ind>\n<ind>2</ind>\n<ind>4</ind>\n<ind>5</ind>\n<ind>6</ind>\n<ind>3</ind>\n</original-index>\n"
        ));
    }

    #[test]
    fn test_narrow_band_line_breaks() {
        let mut info = fixtures::info();
        info.covariance_band = 0;
        let network = fixtures::network_with_info(info);
        let xml = AdjustmentReport::new(&network).to_xml_string().unwrap();

        let cov = section(&xml, "<cov-mat>", "</cov-mat>");
        // six diagonal values, two full lines
        assert!(cov.contains("<dim>6</dim> <band>0</band>\n"));
        assert_eq!(cov.matches("<flt>").count(), 6);
        assert!(cov.contains("<flt>3.3000000e+01</flt>\n</cov-mat>"));
    }

    #[test]
    fn test_gross_error_observation() {
        let xml = sample_report();
        assert!(xml.contains(
            "<distance> <from>A</from> <to>B</to>\n   <obs>100.000000</obs> <adj>100.001500</adj> <stdev>10.000</stdev>\n   <qrr>0.400</qrr> <f>60.000</f> <std-residual>2.500</std-residual>\n   <err-obs>15.000</err-obs> <err-adj>13.500</err-adj>\n   </distance>\n"
        ));
    }

    #[test]
    fn test_weakly_controlled_observation() {
        let xml = sample_report();
        assert!(xml.contains(
            "<height-diff> <from>C</from> <to>D</to>\n   <obs>-40.000000</obs> <adj>-39.999800</adj> <stdev>10.000</stdev>\n   <qrr>0.400</qrr> <f>0.050</f>\n   </height-diff>\n"
        ));
    }

    #[test]
    fn test_correlated_coordinate_observation() {
        let xml = sample_report();
        assert!(xml.contains(
            "<coordinate-z extern=\"gnss\"> <id>D</id>\n   <obs>10.000000</obs> <adj>10.000500</adj> <stdev>10.000</stdev>\n   <qrr>0.400</qrr> <f>6.000</f> <std-residual>1.000</std-residual>\n   </coordinate-z>\n"
        ));
    }

    #[test]
    fn test_max_precision() {
        let network = fixtures::sample_network();
        let xml = AdjustmentReport::new(&network)
            .with_max_precision(true)
            .to_xml_string()
            .unwrap();
        assert!(xml.contains("<obs>100.0000000000000000</obs>"));
        assert!(xml.contains("<stdev>10.0000000000000000</stdev>"));
        // approximate coordinates keep their fixed precision
        assert!(xml.contains("<id>D</id> <z>10.000000</z>"));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let network = fixtures::sample_network();
        let config = ReportConfig {
            linear_precision: 40,
            ..ReportConfig::default()
        };
        let result = AdjustmentReport::new(&network).with_config(config).to_xml_string();
        assert!(matches!(result, Err(ReportError::Config(_))));
    }

    #[test]
    fn test_repeated_runs_identical() {
        let network = fixtures::sample_network();
        let report = AdjustmentReport::new(&network);
        assert_eq!(report.to_xml_string().unwrap(), report.to_xml_string().unwrap());
    }

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sink_failure_propagates() {
        let network = fixtures::sample_network();
        let result = AdjustmentReport::new(&network).write(&mut FailingSink);
        assert!(matches!(result, Err(ReportError::Io(_))));
    }
}
