// ─────────────────────────────────────────────────────────────────────
// Threat Matrix Kernel — Domain Weight Table
// ─────────────────────────────────────────────────────────────────────
//! Immutable square weight matrix, one row per domain category.
//!
//! The reduction only ever reads the diagonal, so the diagonal is
//! cached at construction and the hot path indexes a flat slice.

use threatmatrix_types::config::{validate_weights, REFERENCE_WEIGHTS};
use threatmatrix_types::{Domain, ThreatConfig, ThreatResult};

#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable {
    rows: Vec<Vec<f64>>,
    diagonal: Vec<f64>,
}

impl WeightTable {
    /// The 3×3 Land/Sea/Air reference table.
    pub fn reference() -> Self {
        let rows: Vec<Vec<f64>> = REFERENCE_WEIGHTS.iter().map(|r| r.to_vec()).collect();
        Self::build(rows)
    }

    /// Validate and take ownership of `rows`.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> ThreatResult<Self> {
        validate_weights(&rows)?;
        Ok(Self::build(rows))
    }

    pub fn from_config(config: &ThreatConfig) -> ThreatResult<Self> {
        Self::from_rows(config.weights.clone())
    }

    /// Rows already checked by `ThreatConfig::validate`.
    pub(crate) fn from_validated(rows: Vec<Vec<f64>>) -> Self {
        Self::build(rows)
    }

    fn build(rows: Vec<Vec<f64>>) -> Self {
        let diagonal = rows.iter().enumerate().map(|(i, row)| row[i]).collect();
        Self { rows, diagonal }
    }

    /// Number of categories (R).
    pub fn categories(&self) -> usize {
        self.rows.len()
    }

    /// Weight applied to the reading at `index`: `weights[index % R][index % R]`.
    #[inline]
    pub fn weight_at(&self, index: usize) -> f64 {
        self.diagonal[index % self.diagonal.len()]
    }

    /// Weight for a reference category, if the table has that row.
    pub fn weight_for(&self, domain: Domain) -> Option<f64> {
        self.diagonal.get(domain.index()).copied()
    }

    pub fn diagonal(&self) -> &[f64] {
        &self.diagonal
    }

    pub fn row(&self, category: usize) -> Option<&[f64]> {
        self.rows.get(category).map(Vec::as_slice)
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::reference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_diagonal() {
        let t = WeightTable::reference();
        assert_eq!(t.categories(), 3);
        assert_eq!(t.diagonal(), &[0.2, 0.25, 0.15]);
    }

    #[test]
    fn test_weight_at_wraps() {
        let t = WeightTable::reference();
        assert_eq!(t.weight_at(0), 0.2);
        assert_eq!(t.weight_at(4), 0.25);
        assert_eq!(t.weight_at(3_000_002), 0.15);
    }

    #[test]
    fn test_off_diagonal_kept_but_unused() {
        let t = WeightTable::reference();
        assert_eq!(t.row(2), Some(&[0.3, 0.2, 0.15][..]));
        assert!((0..9).all(|i| t.weight_at(i) != 0.3));
    }

    #[test]
    fn test_weight_for_domain() {
        let t = WeightTable::reference();
        assert_eq!(t.weight_for(Domain::Sea), Some(0.25));

        let single = WeightTable::from_rows(vec![vec![0.5]]).unwrap();
        assert_eq!(single.weight_for(Domain::Land), Some(0.5));
        assert_eq!(single.weight_for(Domain::Air), None);
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        assert!(WeightTable::from_rows(vec![vec![0.1, 0.2], vec![0.1]]).is_err());
    }

    #[test]
    fn test_from_rows_rejects_empty() {
        assert!(WeightTable::from_rows(vec![]).is_err());
    }

    #[test]
    fn test_from_config_default_equals_reference() {
        let t = WeightTable::from_config(&ThreatConfig::default()).unwrap();
        assert_eq!(t, WeightTable::reference());
    }
}
