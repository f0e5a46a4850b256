//! Naive Bayes classification over sparse count-like features.

use crate::error::{Result, SentirError};
use crate::primitives::{CsrMatrix, Vector};
use crate::traits::ProbabilisticClassifier;

/// Multinomial Naive Bayes classifier.
///
/// Models each class as a multinomial distribution over feature mass, with
/// additive smoothing on the per-class feature counts. Features must be
/// non-negative (counts or TF-IDF weights). Binary targets only.
///
/// # Example
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
/// let mut model = MultinomialNB::new().with_alpha(1.0);
/// model.fit(&x, &y).expect("valid training data");
/// let proba = model.predict_proba(&x).expect("model is fitted");
/// assert!((proba[0] - 0.1).abs() < 1e-4);
/// assert!((proba[1] - 0.9).abs() < 1e-4);
/// ```
#[derive(Debug, Clone)]
pub struct MultinomialNB {
    /// Additive smoothing parameter
    alpha: f32,
    /// Log prior per class: `class_log_prior[class]`
    class_log_prior: Option<Vec<f32>>,
    /// Smoothed feature log probabilities: `feature_log_prob[class][feature]`
    feature_log_prob: Option<Vec<Vec<f32>>>,
    /// Class labels, ascending; index 1 is the positive class
    classes: Option<Vec<usize>>,
}

impl MultinomialNB {
    /// Creates a classifier with smoothing `alpha = 1.0`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            alpha: 1.0,
            class_log_prior: None,
            feature_log_prob: None,
            classes: None,
        }
    }

    /// Sets the additive smoothing parameter.
    #[must_use]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    /// Joint log likelihood of each row under each class.
    fn joint_log_likelihood(&self, x: &CsrMatrix) -> Result<Vec<[f32; 2]>> {
        let class_log_prior = self.class_log_prior.as_ref().ok_or("Model not fitted")?;
        let feature_log_prob = self.feature_log_prob.as_ref().ok_or("Model not fitted")?;

        let (n_samples, n_features) = x.shape();
        if n_features != feature_log_prob[0].len() {
            return Err(SentirError::dimension_mismatch(
                "features",
                feature_log_prob[0].len(),
                n_features,
            ));
        }

        let mut jll = Vec::with_capacity(n_samples);
        for row in 0..n_samples {
            let (cols, vals) = x.row(row);
            let mut row_jll = [class_log_prior[0], class_log_prior[1]];
            for (&col, &value) in cols.iter().zip(vals.iter()) {
                row_jll[0] += value * feature_log_prob[0][col];
                row_jll[1] += value * feature_log_prob[1][col];
            }
            jll.push(row_jll);
        }
        Ok(jll)
    }
}

impl ProbabilisticClassifier for MultinomialNB {
    /// Computes class log priors and smoothed per-class feature
    /// log-probabilities from feature mass.
    ///
    /// # Errors
    ///
    /// Returns an error on empty data, sample-count mismatch, negative
    /// feature values, a non-positive `alpha`, or a label set that is not
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

        let mut classes: Vec<usize> = y.to_vec();
        classes.sort_unstable();
        classes.dedup();
        if classes.len() != 2 {
            return Err("Need exactly 2 classes for binary classification".into());
        }

        // Accumulate per-class feature mass.
        let mut class_counts = [0usize; 2];
        let mut feature_counts = vec![vec![0.0_f32; n_features]; 2];
        for (row, &label) in y.iter().enumerate() {
            let class_idx = usize::from(label == classes[1]);
            class_counts[class_idx] += 1;
            let (cols, vals) = x.row(row);
            for (&col, &value) in cols.iter().zip(vals.iter()) {
                if value < 0.0 {
                    return Err("Multinomial likelihood requires non-negative features".into());
                }
                feature_counts[class_idx][col] += value;
            }
        }

        let class_log_prior: Vec<f32> = class_counts
            .iter()
            .map(|&count| (count as f32 / n_samples as f32).ln())
            .collect();

        let feature_log_prob: Vec<Vec<f32>> = feature_counts
            .iter()
            .map(|counts| {
                let total: f32 = counts.iter().sum();
                let denominator = (total + self.alpha * n_features as f32).ln();
                counts
                    .iter()
                    .map(|&count| (count + self.alpha).ln() - denominator)
                    .collect()
            })
            .collect();

        self.class_log_prior = Some(class_log_prior);
        self.feature_log_prob = Some(feature_log_prob);
        self.classes = Some(classes);

        Ok(())
    }

    /// Positive-class probability per row, normalized with the two-class
    /// log-sum-exp.
    fn predict_proba(&self, x: &CsrMatrix) -> Result<Vector<f32>> {
        let jll = self.joint_log_likelihood(x)?;

        let proba: Vec<f32> = jll
            .into_iter()
            .map(|[negative, positive]| {
                let max = negative.max(positive);
                let exp_negative = (negative - max).exp();
                let exp_positive = (positive - max).exp();
                exp_positive / (exp_negative + exp_positive)
            })
            .collect();

        Ok(Vector::from_vec(proba))
    }

    fn predict(&self, x: &CsrMatrix) -> Result<Vec<usize>> {
        let classes = self.classes.as_ref().ok_or("Model not fitted")?;
        let jll = self.joint_log_likelihood(x)?;

        Ok(jll
            .into_iter()
            .map(|[negative, positive]| classes[usize::from(positive > negative)])
            .collect())
    }
}

impl Default for MultinomialNB {
    fn default() -> Self {
        Self::new()
    }
}
