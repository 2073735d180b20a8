//! Variance-based feature pre-filter.

use crate::error::{ConfigError, Result};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Removes the columns of a feature matrix whose variance does not exceed
/// a threshold. With the default threshold of 0 only exactly-constant
/// columns are dropped.
///
/// Fitting records the surviving column indices, so the same selector can
/// be reapplied to future matrices with the same column layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarianceSelector {
    threshold: f64,
    variances: Vec<f64>,
    selected: Vec<usize>,
    n_features_in: usize,
}

impl VarianceSelector {
    /// Fit the selector: compute per-column variances and keep the columns
    /// strictly above the threshold.
    pub fn fit(x: &Array2<f64>, threshold: f64) -> Result<Self> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(ConfigError::field(
                "threshold",
                format!("must be a non-negative number, got {threshold}"),
            ));
        }

        let n_features = x.ncols();
        let mut variances = Vec::with_capacity(n_features);
        let mut selected = Vec::new();

        for col_idx in 0..n_features {
            let col = x.column(col_idx);
            let mean = col.mean().unwrap_or(0.0);
            let variance =
                col.iter().map(|&v| (v - mean).powi(2)).sum::<f64>() / col.len() as f64;

            variances.push(variance);
            if variance > threshold {
                selected.push(col_idx);
            }
        }

        Ok(Self {
            threshold,
            variances,
            selected,
            n_features_in: n_features,
        })
    }

    /// Keep only the selected columns of a matrix with the same column
    /// layout as the one the selector was fitted on. The row count is
    /// always preserved; the result may have zero columns.
    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        if x.ncols() != self.n_features_in {
            return Err(ConfigError::Invariant(format!(
                "selector fitted on {} columns, given {}",
                self.n_features_in,
                x.ncols()
            )));
        }

        let mut result = Array2::zeros((x.nrows(), self.selected.len()));
        for (new_idx, &old_idx) in self.selected.iter().enumerate() {
            result.column_mut(new_idx).assign(&x.column(old_idx));
        }
        Ok(result)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Indices of the surviving columns, in input order.
    pub fn selected_indices(&self) -> &[usize] {
        &self.selected
    }

    /// Per-column variances computed during fit.
    pub fn variances(&self) -> &[f64] {
        &self.variances
    }
}

/// Filter a feature matrix by variance, returning the filtered matrix and
/// the fitted selector for reuse on matrices with the same columns.
pub fn variance_removal(
    x: &Array2<f64>,
    threshold: f64,
) -> Result<(Array2<f64>, VarianceSelector)> {
    let selector = VarianceSelector::fit(x, threshold)?;
    let filtered = selector.transform(x)?;
    Ok((filtered, selector))
}

#[cfg(test)]
mod tests {
    use super::*;

    // 4 rows: two unit-variance columns, one 0.25-variance column, one
    // constant column.
    fn sample() -> Array2<f64> {
        Array2::from_shape_vec(
            (4, 4),
            vec![
                1.0, -1.0, 0.5, 3.0, //
                -1.0, 1.0, -0.5, 3.0, //
                1.0, -1.0, 0.5, 3.0, //
                -1.0, 1.0, -0.5, 3.0,
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_default_threshold_removes_only_constant_columns() {
        let (filtered, selector) = variance_removal(&sample(), 0.0).unwrap();
        assert_eq!(filtered.nrows(), 4);
        assert_eq!(filtered.ncols(), 3);
        assert_eq!(selector.selected_indices(), &[0, 1, 2]);
    }

    #[test]
    fn test_threshold_is_strict() {
        // Column 2 has variance exactly 0.25 and must not survive t=0.25.
        let (filtered, _) = variance_removal(&sample(), 0.25).unwrap();
        assert_eq!(filtered.ncols(), 2);
    }

    #[test]
    fn test_selector_reusable_on_new_matrix() {
        let (_, selector) = variance_removal(&sample(), 0.0).unwrap();
        let fresh = Array2::from_elem((2, 4), 7.0);
        let transformed = selector.transform(&fresh).unwrap();
        assert_eq!(transformed.shape(), &[2, 3]);
    }

    #[test]
    fn test_transform_rejects_mismatched_width() {
        let (_, selector) = variance_removal(&sample(), 0.0).unwrap();
        let wrong = Array2::zeros((2, 5));
        assert!(selector.transform(&wrong).is_err());
    }

    #[test]
    fn test_all_constant_matrix_keeps_rows() {
        let x = Array2::from_elem((3, 2), 1.0);
        let (filtered, _) = variance_removal(&x, 0.0).unwrap();
        assert_eq!(filtered.nrows(), 3);
        assert_eq!(filtered.ncols(), 0);
    }

    #[test]
    fn test_negative_threshold_rejected() {
        assert!(variance_removal(&sample(), -0.1).is_err());
    }
}
