//! Linear classification trained by stochastic gradient descent.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{Result, SentirError};
use crate::primitives::{CsrMatrix, Vector};
use crate::traits::ProbabilisticClassifier;

/// Linear classifier trained by SGD on the modified-Huber loss.
///
/// Minimizes `alpha * ||w||^2 / 2 + mean(loss(y_i * (w . x_i + b)))` with
/// per-sample updates, an inverse-scaling learning rate, and optional
/// epoch shuffling. The modified-Huber loss is quadratic in the margin
/// band and linear outside it, which admits probability estimates:
/// `p = (clamp(score, -1, 1) + 1) / 2`.
///
/// The weight vector is kept behind a lazily-applied scale factor so the
/// L2 shrink step stays O(1) per sample instead of touching every weight.
///
/// # Example
///
/// ```
/// use sentir::linear_model::SGDClassifier;
/// use sentir::primitives::CsrMatrix;
/// use sentir::traits::ProbabilisticClassifier;
///
/// let x = CsrMatrix::from_row_entries(2, vec![
///     vec![(0, 1.0)],
///     vec![(1, 1.0)],
///     vec![(0, 1.0)],
///     vec![(1, 1.0)],
/// ]).expect("valid entries");
/// let y = vec![0, 1, 0, 1];
///
/// let mut model = SGDClassifier::new().with_random_state(0);
/// model.fit(&x, &y).expect("valid training data");
/// assert_eq!(model.predict(&x).expect("model is fitted"), y);
/// ```
#[derive(Debug, Clone)]
pub struct SGDClassifier {
    /// L2 regularization strength
    alpha: f32,
    /// Passes over the training data
    epochs: usize,
    /// Shuffle sample order each epoch
    shuffle: bool,
    /// Seed for the shuffle; entropy-seeded when unset
    random_state: Option<u64>,
    /// Learned weights (scale already folded in)
    weights: Option<Vec<f32>>,
    intercept: Option<f32>,
    /// Class labels, ascending; index 1 is the positive class
    classes: Option<Vec<usize>>,
}

impl SGDClassifier {
    /// Creates a classifier with `alpha = 1e-4`, 5 epochs, and shuffling
    /// enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            alpha: 1e-4,
            epochs: 5,
            shuffle: true,
            random_state: None,
            weights: None,
            intercept: None,
            classes: None,
        }
    }

    /// Sets the L2 regularization strength.
    #[must_use]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the number of passes over the training data.
    #[must_use]
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    /// Enables or disables epoch shuffling.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Fixes the shuffle seed for reproducible runs.
    #[must_use]
    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self
    }

    /// Raw decision score `w . x + b` for each row.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or the matrix width
    /// differs from the training width.
    pub fn decision_function(&self, x: &CsrMatrix) -> Result<Vector<f32>> {
        let weights = self.weights.as_ref().ok_or("Model not fitted")?;
        let intercept = self.intercept.ok_or("Model not fitted")?;

        if x.n_cols() != weights.len() {
            return Err(SentirError::dimension_mismatch(
                "features",
                weights.len(),
                x.n_cols(),
            ));
        }

        let scores: Vec<f32> = (0..x.n_rows())
            .map(|row| x.row_dot(row, weights) + intercept)
            .collect();
        Ok(Vector::from_vec(scores))
    }
}

impl ProbabilisticClassifier for SGDClassifier {
    /// Runs `epochs` passes of per-sample SGD over the training data.
    ///
    /// # Errors
    ///
    /// Returns an error on empty data, sample-count mismatch, a
    /// non-positive `alpha`, zero epochs, or a label set that is not
    /// exactly two classes.
    fn fit(&mut self, x: &CsrMatrix, y: &[usize]) -> Result<()> {
        let (n_samples, n_features) = x.shape();

        if n_samples == 0 {
            return Err("Cannot fit with empty data".into());
        }
        if y.len() != n_samples {
            return Err("Number of samples in X and y must match".into());
        }
        if !(self.alpha.is_finite() && self.alpha > 0.0) {
            return Err(SentirError::InvalidHyperparameter {
                param: "alpha".to_string(),
                value: self.alpha.to_string(),
                constraint: "> 0".to_string(),
            });
        }
        if self.epochs == 0 {
            return Err(SentirError::InvalidHyperparameter {
                param: "epochs".to_string(),
                value: "0".to_string(),
                constraint: ">= 1".to_string(),
            });
        }

        let mut classes: Vec<usize> = y.to_vec();
        classes.sort_unstable();
        classes.dedup();
        if classes.len() != 2 {
            return Err("Need exactly 2 classes for binary classification".into());
        }

        let targets: Vec<f32> = y
            .iter()
            .map(|&label| if label == classes[1] { 1.0 } else { -1.0 })
            .collect();

        // Inverse-scaling schedule eta_t = 1 / (alpha * (t0 + t)), with t0
        // chosen so the first step moves a typically-sized weight by a
        // typically-sized amount (Bottou's heuristic).
        let typical_weight = (1.0 / self.alpha.sqrt()).sqrt();
        let initial_eta =
            typical_weight / modified_huber_dloss(-typical_weight, 1.0).abs().max(1.0);
        let t0 = 1.0 / (self.alpha * initial_eta);

        let mut rng = match self.random_state {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut order: Vec<usize> = (0..n_samples).collect();

        let mut weights = vec![0.0_f32; n_features];
        let mut scale = 1.0_f32;
        let mut intercept = 0.0_f32;
        let mut t = 0.0_f32;

        for _epoch in 0..self.epochs {
            if self.shuffle {
                order.shuffle(&mut rng);
            }
            for &row in &order {
                let eta = 1.0 / (self.alpha * (t0 + t));
                let score = scale * x.row_dot(row, &weights) + intercept;
                let gradient = modified_huber_dloss(score, targets[row]);

                scale *= 1.0 - eta * self.alpha;
                if scale < 1e-9 {
                    for weight in &mut weights {
                        *weight *= scale;
                    }
                    scale = 1.0;
                }

                if gradient != 0.0 {
                    let step = eta * gradient / scale;
                    let (cols, vals) = x.row(row);
                    for (&col, &value) in cols.iter().zip(vals.iter()) {
                        weights[col] -= step * value;
                    }
                    // Intercept takes the plain gradient step, no L2 shrink.
                    intercept -= eta * gradient;
                }

                t += 1.0;
            }
        }

        for weight in &mut weights {
            *weight *= scale;
        }

        self.weights = Some(weights);
        self.intercept = Some(intercept);
        self.classes = Some(classes);

        Ok(())
    }

    fn predict_proba(&self, x: &CsrMatrix) -> Result<Vector<f32>> {
        let scores = self.decision_function(x)?;
        let proba: Vec<f32> = scores
            .iter()
            .map(|&score| (score.clamp(-1.0, 1.0) + 1.0) / 2.0)
            .collect();
        Ok(Vector::from_vec(proba))
    }

    fn predict(&self, x: &CsrMatrix) -> Result<Vec<usize>> {
        let classes = self.classes.as_ref().ok_or("Model not fitted")?;
        let scores = self.decision_function(x)?;
        Ok(scores
            .iter()
            .map(|&score| classes[usize::from(score > 0.0)])
            .collect())
    }
}

impl Default for SGDClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Derivative of the modified-Huber loss with respect to the prediction.
///
/// With margin `z = prediction * target`: zero above `z = 1`, the
/// quadratic branch `-2 * target * (1 - z)` on `-1 <= z <= 1`, and the
/// linear branch `-4 * target` below.
fn modified_huber_dloss(prediction: f32, target: f32) -> f32 {
    let margin = prediction * target;
    if margin >= 1.0 {
        0.0
    } else if margin >= -1.0 {
        -2.0 * target * (1.0 - margin)
    } else {
        -4.0 * target
    }
}
