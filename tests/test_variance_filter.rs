//! Integration test: variance-based pre-filter

use autoomics::preprocessing::variance_removal;
use ndarray::Array2;

const SAMPLES: usize = 30;
const FEATS: usize = 10;
const VAR: f64 = 0.5;

// SAMPLES x (FEATS + 2): FEATS unit-variance columns, one column with
// variance VAR, one zero-variance column.
fn sample_matrix() -> Array2<f64> {
    let mut x = Array2::zeros((SAMPLES, FEATS + 2));
    for row in 0..SAMPLES {
        let sign = if row % 2 == 0 { 1.0 } else { -1.0 };
        for col in 0..FEATS {
            x[[row, col]] = sign;
        }
        x[[row, FEATS]] = sign * VAR.sqrt();
        x[[row, FEATS + 1]] = 4.2;
    }
    x
}

#[test]
fn test_zero_var_removal() {
    let x = sample_matrix();
    let (x_trans, selector) = variance_removal(&x, 0.0).unwrap();

    assert_eq!(x_trans.shape(), &[SAMPLES, FEATS + 1]);
    assert_eq!(selector.selected_indices().len(), FEATS + 1);
    assert!(!selector.selected_indices().contains(&(FEATS + 1)));
}

#[test]
fn test_given_var_removal() {
    let x = sample_matrix();
    let (x_trans, _) = variance_removal(&x, VAR).unwrap();

    // The VAR-variance column sits exactly at the threshold and the
    // comparison is strict, so only the unit-variance columns survive.
    assert_eq!(x_trans.shape(), &[SAMPLES, FEATS]);
}

#[test]
fn test_selector_transform_matches_fit_output() {
    let x = sample_matrix();
    let (x_trans, selector) = variance_removal(&x, 0.0).unwrap();
    let reapplied = selector.transform(&x).unwrap();
    assert_eq!(x_trans, reapplied);
}

#[test]
fn test_row_count_always_preserved() {
    let x = sample_matrix();
    for threshold in [0.0, 0.25, 1.0, 100.0] {
        let (x_trans, _) = variance_removal(&x, threshold).unwrap();
        assert_eq!(x_trans.nrows(), SAMPLES);
    }
}

#[test]
fn test_huge_threshold_removes_everything() {
    let x = sample_matrix();
    let (x_trans, selector) = variance_removal(&x, 100.0).unwrap();
    assert_eq!(x_trans.ncols(), 0);
    assert!(selector.selected_indices().is_empty());
}
