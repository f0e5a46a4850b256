//! The five-stage scoring pipeline.
//!
//! Ingest -> normalize -> vectorize -> select -> fit/blend/emit, as one
//! sequential pass. Every stage hands its output to the next as an
//! explicit argument; nothing is global and nothing is refit.

use std::path::PathBuf;

use log::info;

use crate::classification::MultinomialNB;
use crate::data::{self, ReviewRecord};
use crate::error::{Result, SentirError};
use crate::feature_selection::SelectKBest;
use crate::linear_model::SGDClassifier;
use crate::primitives::Vector;
use crate::text::{ReviewNormalizer, TfidfVectorizer};
use crate::traits::ProbabilisticClassifier;

/// Terms must appear in at least this many fit documents.
const MIN_DOCUMENT_FREQUENCY: usize = 2;
/// Terms in more than this fraction of fit documents are dropped.
const MAX_DOCUMENT_FRACTION: f32 = 0.95;
/// Vocabulary cap after n-gram expansion.
const MAX_VOCABULARY: usize = 200_000;
/// Unigrams through 4-grams.
const NGRAM_RANGE: (usize, usize) = (1, 4);
/// Columns kept by chi-squared selection.
const SELECTED_FEATURES: usize = 70_000;
/// Naive Bayes additive smoothing.
const NB_SMOOTHING: f32 = 0.0005;
/// SGD passes over the training data.
const SGD_EPOCHS: usize = 5;
/// Shuffle seed for the SGD classifier; the run's only stochastic piece.
const SGD_SEED: u64 = 0;

/// Fixed blend applied to the two models' probabilities.
///
/// The weights are tuned constants, deliberately not normalized to sum to
/// one; blended scores therefore live in [0, 1.2].
pub const BLEND: BlendWeights = BlendWeights { nb: 0.2, sgd: 1.0 };

/// Weighted sum of the two classifiers' probability vectors.
#[derive(Debug, Clone, Copy)]
pub struct BlendWeights {
    /// Weight on the Naive Bayes probability.
    pub nb: f32,
    /// Weight on the SGD probability.
    pub sgd: f32,
}

impl BlendWeights {
    /// Element-wise `nb * p_nb + sgd * p_sgd`.
    ///
    /// # Errors
    ///
    /// Returns an error if the vectors differ in length.
    pub fn blend(&self, p_nb: &Vector<f32>, p_sgd: &Vector<f32>) -> Result<Vector<f32>> {
        if p_nb.len() != p_sgd.len() {
            return Err(SentirError::dimension_mismatch(
                "probability rows",
                p_nb.len(),
                p_sgd.len(),
            ));
        }
        let blended: Vec<f32> = p_nb
            .iter()
            .zip(p_sgd.iter())
            .map(|(&a, &b)| self.nb * a + self.sgd * b)
            .collect();
        Ok(Vector::from_vec(blended))
    }
}

/// Input and output locations for one run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Labeled training reviews (TSV: id, sentiment, review).
    pub train: PathBuf,
    /// Unlabeled training reviews (TSV: id, review).
    pub unlabeled: PathBuf,
    /// Test reviews to score (TSV: id, review).
    pub test: PathBuf,
    /// Submission output (CSV: id, sentiment).
    pub output: PathBuf,
}

/// Executes the full pipeline: read the three review tables, clean and
/// vectorize the text, select features on the labeled data, train both
/// classifiers, blend their test probabilities, and write the submission.
///
/// # Errors
///
/// Any stage failure aborts the run; no partial output is guaranteed.
pub fn run(config: &PipelineConfig) -> Result<()> {
    info!("Parsing train reviews from {}", config.train.display());
    let train = data::read_reviews(&config.train, true)?;
    let unlabeled = data::read_reviews(&config.unlabeled, false)?;
    info!("Parsing test reviews from {}", config.test.display());
    let test = data::read_reviews(&config.test, false)?;
    info!(
        "{} labeled, {} unlabeled, {} test reviews",
        train.len(),
        unlabeled.len(),
        test.len()
    );

    let normalizer = ReviewNormalizer::new();
    let clean_train = clean(&normalizer, &train);
    let clean_unlabeled = clean(&normalizer, &unlabeled);
    let clean_test = clean(&normalizer, &test);

    info!("Vectorizing");
    let fit_corpus: Vec<&String> = clean_train.iter().chain(clean_unlabeled.iter()).collect();
    let vectorizer = TfidfVectorizer::new()
        .with_min_df(MIN_DOCUMENT_FREQUENCY)
        .with_max_df(MAX_DOCUMENT_FRACTION)
        .with_max_features(MAX_VOCABULARY)
        .with_ngram_range(NGRAM_RANGE.0, NGRAM_RANGE.1)
        .with_sublinear_tf(true);
    let fitted = vectorizer.fit(&fit_corpus)?;
    info!("Vocabulary of {} terms", fitted.vocabulary_size());

    let train_features = fitted.transform(&clean_train)?;
    let test_features = fitted.transform(&clean_test)?;

    info!("Reducing dimension");
    let labels = labels_of(&train)?;
    let selection = SelectKBest::new(SELECTED_FEATURES).fit(&train_features, &labels)?;
    let train_reduced = selection.transform(&train_features)?;
    let test_reduced = selection.transform(&test_features)?;
    info!(
        "Kept {} of {} columns",
        selection.n_selected(),
        train_features.n_cols()
    );

    info!("Training");
    let mut nb = MultinomialNB::new().with_alpha(NB_SMOOTHING);
    nb.fit(&train_reduced, &labels)?;
    info!(
        "Naive Bayes train accuracy: {:.4}",
        nb.score(&train_reduced, &labels)?
    );

    let mut sgd = SGDClassifier::new()
        .with_epochs(SGD_EPOCHS)
        .with_random_state(SGD_SEED);
    sgd.fit(&train_reduced, &labels)?;
    info!(
        "SGD train accuracy: {:.4}",
        sgd.score(&train_reduced, &labels)?
    );

    let p_nb = nb.predict_proba(&test_reduced)?;
    let p_sgd = sgd.predict_proba(&test_reduced)?;
    let scores = BLEND.blend(&p_nb, &p_sgd)?;

    info!("Writing results to {}", config.output.display());
    let ids: Vec<String> = test.iter().map(|record| record.id.clone()).collect();
    data::write_submission(&config.output, &ids, &scores)?;
    info!("Wrote {} rows", ids.len());

    Ok(())
}

fn clean(normalizer: &ReviewNormalizer, records: &[ReviewRecord]) -> Vec<String> {
    records
        .iter()
        .map(|record| normalizer.normalize(&record.review))
        .collect()
}

fn labels_of(records: &[ReviewRecord]) -> Result<Vec<usize>> {
    records
        .iter()
        .map(|record| {
            record
                .sentiment
                .map(usize::from)
                .ok_or_else(|| SentirError::from("labeled record missing sentiment"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_known_scenario() {
        let p_nb = Vector::from_slice(&[0.1, 0.9, 0.5, 0.0]);
        let p_sgd = Vector::from_slice(&[0.2, 0.8, 0.5, 1.0]);
        let blended = BLEND.blend(&p_nb, &p_sgd).expect("equal lengths");

        let expected = [0.22, 0.98, 0.60, 1.00];
        for (i, &want) in expected.iter().enumerate() {
            assert!(
                (blended[i] - want).abs() < 1e-6,
                "row {i}: got {}, want {want}",
                blended[i]
            );
        }
    }

    #[test]
    fn test_blend_weights_are_not_normalized() {
        let ones = Vector::ones(2);
        let blended = BLEND.blend(&ones, &ones).expect("equal lengths");
        assert!((blended[0] - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_blend_rejects_length_mismatch() {
        let a = Vector::ones(2);
        let b = Vector::ones(3);
        assert!(BLEND.blend(&a, &b).is_err());
    }

    #[test]
    fn test_labels_of_requires_sentiment() {
        let records = vec![ReviewRecord {
            id: "a".to_string(),
            sentiment: None,
            review: String::new(),
        }];
        assert!(labels_of(&records).is_err());
    }
}
