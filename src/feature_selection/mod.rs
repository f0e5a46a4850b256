//! Univariate feature selection for sparse feature matrices.
//!
//! Scores every column with a chi-squared statistic against the class
//! labels, then keeps the top-K columns. Selection is fit on labeled
//! training data only and applied as a pure column projection afterwards.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SentirError};
use crate::primitives::CsrMatrix;

/// Chi-squared association score for every column of a non-negative
/// feature matrix against integer class labels.
///
/// For each feature, the observed per-class feature mass is compared with
/// the mass expected under the class priors: `sum_c (O_c - E_c)^2 / E_c`.
/// Columns with zero total mass score 0.
///
/// # Errors
///
/// Returns an error if the label count doesn't match the row count, the
/// matrix is empty, or fewer than two classes are present.
///
/// # Examples
///
/// ```
/// use sentir::feature_selection::chi2;
/// use sentir::primitives::CsrMatrix;
///
/// let x = CsrMatrix::from_row_entries(2, vec![
///     vec![(0, 1.0)],
///     vec![(0, 2.0)],
///     vec![(1, 1.0)],
///     vec![(1, 3.0)],
/// ]).expect("valid entries");
/// let y = vec![0, 0, 1, 1];
///
/// let scores = chi2(&x, &y).expect("valid inputs");
/// assert!((scores[0] - 3.0).abs() < 1e-5);
/// assert!((scores[1] - 4.0).abs() < 1e-5);
/// ```
pub fn chi2(x: &CsrMatrix, y: &[usize]) -> Result<Vec<f32>> {
    let (n_samples, n_features) = x.shape();

    if n_samples == 0 {
        return Err(SentirError::empty_input("cannot score an empty matrix"));
    }
    if y.len() != n_samples {
        return Err(SentirError::dimension_mismatch(
            "labels for rows",
            n_samples,
            y.len(),
        ));
    }

    let mut classes: Vec<usize> = y.to_vec();
    classes.sort_unstable();
    classes.dedup();
    if classes.len() < 2 {
        return Err("Need at least 2 classes to score features".into());
    }

    // Observed per-class feature mass.
    let mut observed = vec![vec![0.0_f32; n_features]; classes.len()];
    let mut class_counts = vec![0usize; classes.len()];
    for (row, &label) in y.iter().enumerate() {
        let class_idx = classes
            .binary_search(&label)
            .map_err(|_| SentirError::from("label missing from class set"))?;
        class_counts[class_idx] += 1;
        let (cols, vals) = x.row(row);
        for (&col, &value) in cols.iter().zip(vals.iter()) {
            observed[class_idx][col] += value;
        }
    }

    let feature_mass = x.column_sums();
    let mut scores = vec![0.0_f32; n_features];
    for (class_idx, class_observed) in observed.iter().enumerate() {
        let prior = class_counts[class_idx] as f32 / n_samples as f32;
        for feature in 0..n_features {
            let expected = prior * feature_mass[feature];
            if expected > 0.0 {
                let diff = class_observed[feature] - expected;
                scores[feature] += diff * diff / expected;
            }
        }
    }

    Ok(scores)
}

/// Top-K column selector scored by [`chi2`].
///
/// Fitting produces a [`FittedSelector`]; only the fitted artifact can
/// project matrices, so selection cannot be applied before it is learned.
///
/// # Examples
///
/// ```
/// use sentir::feature_selection::SelectKBest;
/// use sentir::primitives::CsrMatrix;
///
/// let x = CsrMatrix::from_row_entries(2, vec![
///     vec![(0, 1.0)],
///     vec![(0, 2.0)],
///     vec![(1, 1.0)],
///     vec![(1, 3.0)],
/// ]).expect("valid entries");
/// let y = vec![0, 0, 1, 1];
///
/// let fitted = SelectKBest::new(1).fit(&x, &y).expect("valid inputs");
/// let reduced = fitted.transform(&x).expect("same column space");
/// assert_eq!(reduced.shape(), (4, 1));
/// ```
#[derive(Debug, Clone)]
pub struct SelectKBest {
    k: usize,
}

impl SelectKBest {
    /// Creates a selector that keeps the `k` best-scoring columns.
    #[must_use]
    pub fn new(k: usize) -> Self {
        Self { k }
    }

    /// Scores columns against the labels and records the kept set.
    ///
    /// Keeps all columns when the matrix is narrower than `k`. Kept
    /// indices are stored in ascending order, so the projection preserves
    /// relative column order.
    ///
    /// # Errors
    ///
    /// Returns an error if `k` is zero or the inputs fail [`chi2`]
    /// validation.
    pub fn fit(&self, x: &CsrMatrix, y: &[usize]) -> Result<FittedSelector> {
        if self.k == 0 {
            return Err(SentirError::InvalidHyperparameter {
                param: "k".to_string(),
                value: "0".to_string(),
                constraint: ">= 1".to_string(),
            });
        }

        let scores = chi2(x, y)?;
        let n_features = scores.len();

        let mut ranked: Vec<usize> = (0..n_features).collect();
        ranked.sort_by(|&a, &b| {
            scores[b]
                .partial_cmp(&scores[a])
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.cmp(&b))
        });
        ranked.truncate(self.k.min(n_features));
        ranked.sort_unstable();

        Ok(FittedSelector {
            keep: ranked,
            input_cols: n_features,
        })
    }
}

/// A fitted column selection: the kept indices over a fixed input width.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittedSelector {
    keep: Vec<usize>,
    input_cols: usize,
}

impl FittedSelector {
    /// Projects a matrix with the fitted column space onto the kept columns.
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix width differs from the width seen at
    /// fit time.
    pub fn transform(&self, x: &CsrMatrix) -> Result<CsrMatrix> {
        if x.n_cols() != self.input_cols {
            return Err(SentirError::dimension_mismatch(
                "columns",
                self.input_cols,
                x.n_cols(),
            ));
        }
        Ok(x.select_columns(&self.keep)?)
    }

    /// Number of kept columns.
    #[must_use]
    pub fn n_selected(&self) -> usize {
        self.keep.len()
    }

    /// Kept column indices, ascending.
    #[must_use]
    pub fn selected_indices(&self) -> &[usize] {
        &self.keep
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labeled_matrix() -> (CsrMatrix, Vec<usize>) {
        // Column 0 concentrates in class 0, column 1 in class 1, column 2
        // is never observed.
        let x = CsrMatrix::from_row_entries(
            3,
            vec![
                vec![(0, 1.0)],
                vec![(0, 2.0)],
                vec![(1, 1.0)],
                vec![(1, 3.0)],
            ],
        )
        .expect("valid entries");
        (x, vec![0, 0, 1, 1])
    }

    #[test]
    fn test_chi2_hand_computed_scores() {
        let (x, y) = labeled_matrix();
        let scores = chi2(&x, &y).expect("valid inputs");
        assert!((scores[0] - 3.0).abs() < 1e-5);
        assert!((scores[1] - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_chi2_zero_mass_column_scores_zero() {
        let (x, y) = labeled_matrix();
        let scores = chi2(&x, &y).expect("valid inputs");
        assert!(scores[2].abs() < 1e-6);
    }

    #[test]
    fn test_chi2_rejects_label_mismatch() {
        let (x, _) = labeled_matrix();
        assert!(chi2(&x, &[0, 1]).is_err());
    }

    #[test]
    fn test_chi2_rejects_single_class() {
        let (x, _) = labeled_matrix();
        assert!(chi2(&x, &[1, 1, 1, 1]).is_err());
    }

    #[test]
    fn test_select_k_best_keeps_top_scorer() {
        let (x, y) = labeled_matrix();
        let fitted = SelectKBest::new(1).fit(&x, &y).expect("valid inputs");
        assert_eq!(fitted.selected_indices(), &[1]);

        let reduced = fitted.transform(&x).expect("same column space");
        assert_eq!(reduced.shape(), (4, 1));
        assert!((reduced.get(3, 0) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_select_k_best_clamps_to_width() {
        let (x, y) = labeled_matrix();
        let fitted = SelectKBest::new(10).fit(&x, &y).expect("valid inputs");
        assert_eq!(fitted.n_selected(), 3);
        let reduced = fitted.transform(&x).expect("same column space");
        assert_eq!(reduced.n_cols(), 3);
    }

    #[test]
    fn test_select_k_best_output_width_is_exactly_k() {
        let (x, y) = labeled_matrix();
        let fitted = SelectKBest::new(2).fit(&x, &y).expect("valid inputs");
        assert_eq!(fitted.n_selected(), 2);
        // Kept indices preserve ascending column order
        assert_eq!(fitted.selected_indices(), &[0, 1]);
    }

    #[test]
    fn test_select_k_best_rejects_zero_k() {
        let (x, y) = labeled_matrix();
        assert!(SelectKBest::new(0).fit(&x, &y).is_err());
    }

    #[test]
    fn test_transform_rejects_width_mismatch() {
        let (x, y) = labeled_matrix();
        let fitted = SelectKBest::new(2).fit(&x, &y).expect("valid inputs");
        let narrow = CsrMatrix::zeros(2, 2);
        assert!(fitted.transform(&narrow).is_err());
    }
}
