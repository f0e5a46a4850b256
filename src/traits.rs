//! Core trait for the pipeline's classifiers.

use crate::error::Result;
use crate::primitives::{CsrMatrix, Vector};

/// Binary probabilistic classifier over sparse feature rows.
///
/// Implementations follow fit/predict conventions: `fit` learns from a
/// feature matrix and 0/1-style integer labels, `predict_proba` returns
/// the positive-class probability per row, in [0, 1].
///
/// # Examples
///
/// ```
/// use sentir::classification::MultinomialNB;
/// use sentir::primitives::CsrMatrix;
/// use sentir::traits::ProbabilisticClassifier;
///
/// let x = CsrMatrix::from_row_entries(2, vec![
///     vec![(0, 2.0)],
///     vec![(1, 2.0)],
/// ]).expect("valid entries");
/// let y = vec![0, 1];
///
/// let mut model = MultinomialNB::new();
/// model.fit(&x, &y).expect("valid training data");
/// let proba = model.predict_proba(&x).expect("model is fitted");
/// assert!(proba[0] < 0.5 && proba[1] > 0.5);
/// ```
pub trait ProbabilisticClassifier {
    /// Fits the model to training data.
    ///
    /// # Errors
    ///
    /// Returns an error on shape mismatch, invalid hyperparameters, or a
    /// non-binary label set.
    fn fit(&mut self, x: &CsrMatrix, y: &[usize]) -> Result<()>;

    /// Positive-class probability for each row, in [0, 1].
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or the matrix width
    /// differs from the training width.
    fn predict_proba(&self, x: &CsrMatrix) -> Result<Vector<f32>>;

    /// Predicted class label for each row.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or on width mismatch.
    fn predict(&self, x: &CsrMatrix) -> Result<Vec<usize>>;

    /// Accuracy against reference labels.
    ///
    /// # Errors
    ///
    /// Returns an error if prediction fails or lengths differ.
    fn score(&self, x: &CsrMatrix, y: &[usize]) -> Result<f32> {
        let predictions = self.predict(x)?;
        crate::metrics::accuracy(y, &predictions)
    }
}
