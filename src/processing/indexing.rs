//! Unknown index set of the reported coordinates and its covariance band
//!
//! Row `i` of the reported covariance matrix always belongs to unknown
//! `indices()[i - 1]`; the `<original-index>` list is the same vector.

use crate::core::AdjustmentResults;

/// Ordered unknown indices: point coordinates (x, y, z per point, points in
/// identifier order) followed by orientation unknowns in ascending order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexSet {
    indices: Vec<usize>,
}

impl IndexSet {
    pub fn build<N: AdjustmentResults + ?Sized>(network: &N) -> Self {
        let mut indices = Vec::with_capacity(network.unknowns_count());
        for point in network.points().values() {
            if point.has_xy_unknowns() {
                indices.push(point.index_x);
                indices.push(point.index_y);
            }
            if point.has_z_unknown() {
                indices.push(point.index_z);
            }
        }
        indices.extend(network.orientation_indices());
        Self { indices }
    }

    pub fn from_indices(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    pub fn dim(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}

/// Bandwidth actually reported for a configured band (-1 requests the full matrix)
pub fn effective_band(configured: i32, dim: usize) -> usize {
    if dim == 0 {
        return 0;
    }
    let full = dim - 1;
    match usize::try_from(configured) {
        Ok(band) if band <= full => band,
        _ => full,
    }
}

/// One reported element of the upper band, positions 1-based within the index set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandEntry {
    pub row: usize,
    pub col: usize,
    pub value: f64,
}

/// Upper triangle of the symmetric band by rows, scaled by `m0^2`
pub fn extract_band<F>(set: &IndexSet, band: usize, m0: f64, qxx: F) -> Vec<BandEntry>
where
    F: Fn(usize, usize) -> f64,
{
    let dim = set.dim();
    let m2 = m0 * m0;
    let ind = set.indices();
    let mut entries = Vec::new();
    for row in 1..=dim {
        for col in row..=dim.min(row + band) {
            entries.push(BandEntry {
                row,
                col,
                value: m2 * qxx(ind[row - 1], ind[col - 1]),
            });
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures;

    #[test]
    fn test_effective_band() {
        assert_eq!(effective_band(-1, 5), 4);
        assert_eq!(effective_band(2, 5), 2);
        assert_eq!(effective_band(9, 5), 4);
        assert_eq!(effective_band(0, 5), 0);
        assert_eq!(effective_band(-1, 0), 0);
        assert_eq!(effective_band(3, 0), 0);
    }

    #[test]
    fn test_index_set_order() {
        let network = fixtures::sample_network();
        let set = IndexSet::build(&network);

        // B(x,y), C(x,y), D(z), then the orientation unknown of station A
        assert_eq!(set.indices(), &[1, 2, 4, 5, 6, 3]);
        assert_eq!(set.dim(), 2 * 2 + 1 + 1);
    }

    #[test]
    fn test_empty_index_set_has_no_rows() {
        let set = IndexSet::default();
        let band = effective_band(-1, set.dim());
        assert_eq!(band, 0);
        assert!(extract_band(&set, band, 1.0, |_, _| 1.0).is_empty());
    }

    #[test]
    fn test_band_entries_follow_index_set() {
        let set = IndexSet::from_indices(vec![7, 3, 5]);
        let q = |i: usize, j: usize| (10 * i.min(j) + i.max(j)) as f64;
        let entries = extract_band(&set, 1, 2.0, q);

        let cells: Vec<(usize, usize)> = entries.iter().map(|e| (e.row, e.col)).collect();
        assert_eq!(cells, vec![(1, 1), (1, 2), (2, 2), (2, 3), (3, 3)]);
        // row 1, col 2 -> qxx(7, 3) = 37, scaled by m0^2 = 4
        assert!((entries[1].value - 148.0).abs() < 1e-12);
        assert!((entries[4].value - 4.0 * 55.0).abs() < 1e-12);
    }

    #[test]
    fn test_full_band_count() {
        let set = IndexSet::from_indices((1..=5).collect());
        let band = effective_band(-1, set.dim());
        let entries = extract_band(&set, band, 1.0, |_, _| 0.0);
        assert_eq!(entries.len(), 5 * 6 / 2);
    }
}
