//! TF-IDF vectorization of cleaned text.
//!
//! `TfidfVectorizer` holds the configuration; fitting it over a corpus
//! produces a [`FittedTfidf`] carrying the frozen vocabulary and IDF table.
//! Only the fitted artifact can transform text, so a transform against an
//! unfitted vocabulary cannot be expressed.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SentirError};
use crate::primitives::CsrMatrix;

/// Tokens shorter than this many characters are ignored. Cleaned review
/// text still contains one-letter fragments ("s" from possessives, stray
/// "a"/"i"); they carry no signal at the n-gram level.
const MIN_TOKEN_CHARS: usize = 2;

/// TF-IDF vectorizer configuration.
///
/// Term frequency is raw in-document count, or `1 + ln(count)` with
/// sublinear scaling. Inverse document frequency is smoothed:
/// `ln((1 + n_docs) / (1 + df)) + 1`. Output rows are L2-normalized.
///
/// # Examples
///
/// ```
/// use sentir::text::TfidfVectorizer;
///
/// let docs = vec!["the cat sat", "the dog sat"];
/// let fitted = TfidfVectorizer::new().fit(&docs).expect("non-empty corpus");
/// assert_eq!(fitted.vocabulary_size(), 4);
///
/// let matrix = fitted.transform(&docs).expect("fitted vocabulary");
/// assert_eq!(matrix.shape(), (2, 4));
/// ```
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    min_df: usize,
    max_df: f32,
    max_features: Option<usize>,
    ngram_range: (usize, usize),
    sublinear_tf: bool,
}

impl TfidfVectorizer {
    /// Creates a vectorizer with no frequency bounds, unigrams only, and
    /// raw term-frequency scaling.
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_df: 1,
            max_df: 1.0,
            max_features: None,
            ngram_range: (1, 1),
            sublinear_tf: false,
        }
    }

    /// Minimum document frequency: terms in fewer documents are dropped.
    #[must_use]
    pub fn with_min_df(mut self, min_df: usize) -> Self {
        self.min_df = min_df;
        self
    }

    /// Maximum document frequency as a fraction of the corpus (0.0-1.0):
    /// terms in more than that share of documents are dropped.
    #[must_use]
    pub fn with_max_df(mut self, max_df: f32) -> Self {
        self.max_df = max_df.clamp(0.0, 1.0);
        self
    }

    /// Caps the vocabulary at the most frequent `max_features` terms.
    #[must_use]
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = Some(max_features);
        self
    }

    /// Sets the n-gram range (inclusive). `(1, 4)` extracts unigrams
    /// through 4-grams.
    #[must_use]
    pub fn with_ngram_range(mut self, min_n: usize, max_n: usize) -> Self {
        self.ngram_range = (min_n.max(1), max_n.max(1));
        self
    }

    /// Enables sublinear term-frequency scaling (`1 + ln(count)`).
    #[must_use]
    pub fn with_sublinear_tf(mut self, sublinear_tf: bool) -> Self {
        self.sublinear_tf = sublinear_tf;
        self
    }

    /// Learns the vocabulary and IDF table from a corpus of cleaned strings.
    ///
    /// Term indices are assigned in sorted term order, so fitting the same
    /// corpus twice yields the identical artifact.
    ///
    /// # Errors
    ///
    /// Returns an error if the corpus is empty, the n-gram range is
    /// inverted, or every term is filtered out by the frequency bounds.
    pub fn fit<S: AsRef<str>>(&self, documents: &[S]) -> Result<FittedTfidf> {
        if documents.is_empty() {
            return Err(SentirError::empty_input("cannot fit on an empty corpus"));
        }
        if self.ngram_range.0 > self.ngram_range.1 {
            return Err(SentirError::InvalidHyperparameter {
                param: "ngram_range".to_string(),
                value: format!("({}, {})", self.ngram_range.0, self.ngram_range.1),
                constraint: "min_n <= max_n".to_string(),
            });
        }

        let n_docs = documents.len();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        let mut term_count: HashMap<String, u64> = HashMap::new();

        for doc in documents {
            let mut doc_terms: HashSet<String> = HashSet::new();
            for term in extract_terms(doc.as_ref(), self.ngram_range) {
                *term_count.entry(term.clone()).or_insert(0) += 1;
                doc_terms.insert(term);
            }
            for term in doc_terms {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        // Document-frequency bounds: min_df is an absolute count, max_df a
        // corpus fraction.
        let max_doc_count = (self.max_df * n_docs as f32) as usize;
        let mut kept: Vec<(String, u64)> = term_count
            .into_iter()
            .filter(|(term, _)| {
                let df = doc_freq.get(term).copied().unwrap_or(0);
                df >= self.min_df && df <= max_doc_count
            })
            .collect();

        // Vocabulary cap keeps the highest-total-count terms, ties broken
        // by term order.
        if let Some(max_features) = self.max_features {
            kept.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            kept.truncate(max_features);
        }

        if kept.is_empty() {
            return Err(SentirError::Other(
                "Empty vocabulary after document-frequency filtering".to_string(),
            ));
        }

        let mut terms: Vec<String> = kept.into_iter().map(|(term, _)| term).collect();
        terms.sort_unstable();

        let mut vocabulary = HashMap::with_capacity(terms.len());
        let mut idf = Vec::with_capacity(terms.len());
        for (index, term) in terms.into_iter().enumerate() {
            let df = doc_freq.get(&term).copied().unwrap_or(0);
            idf.push(((1 + n_docs) as f32 / (1 + df) as f32).ln() + 1.0);
            vocabulary.insert(term, index);
        }

        Ok(FittedTfidf {
            vocabulary,
            idf,
            ngram_range: self.ngram_range,
            sublinear_tf: self.sublinear_tf,
        })
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

/// A fitted TF-IDF model: frozen vocabulary plus IDF table.
///
/// Produced by [`TfidfVectorizer::fit`]; maps any cleaned-string collection
/// onto the fixed column space learned at fit time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittedTfidf {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
    ngram_range: (usize, usize),
    sublinear_tf: bool,
}

impl FittedTfidf {
    /// Transforms cleaned strings into a sparse TF-IDF matrix over the
    /// fitted vocabulary. Out-of-vocabulary terms are ignored; a document
    /// with no in-vocabulary terms becomes an all-zero row.
    ///
    /// # Errors
    ///
    /// Returns an error if `documents` is empty.
    pub fn transform<S: AsRef<str>>(&self, documents: &[S]) -> Result<CsrMatrix> {
        if documents.is_empty() {
            return Err(SentirError::empty_input(
                "cannot transform an empty document list",
            ));
        }

        let mut rows = Vec::with_capacity(documents.len());
        for doc in documents {
            let mut counts: HashMap<usize, f32> = HashMap::new();
            for term in extract_terms(doc.as_ref(), self.ngram_range) {
                if let Some(&column) = self.vocabulary.get(&term) {
                    *counts.entry(column).or_insert(0.0) += 1.0;
                }
            }

            let mut entries: Vec<(usize, f32)> = counts
                .into_iter()
                .map(|(column, count)| {
                    let tf = if self.sublinear_tf {
                        1.0 + count.ln()
                    } else {
                        count
                    };
                    (column, tf * self.idf[column])
                })
                .collect();
            entries.sort_unstable_by_key(|&(column, _)| column);
            rows.push(entries);
        }

        let mut matrix = CsrMatrix::from_row_entries(self.idf.len(), rows)?;
        matrix.l2_normalize_rows();
        Ok(matrix)
    }

    /// Number of terms in the fitted vocabulary.
    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.idf.len()
    }

    /// Column index of a term, if it is in the vocabulary.
    #[must_use]
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }
}

/// All n-gram terms of a cleaned string, in document order. Tokens below
/// the character floor are dropped before n-gram expansion; n-grams are
/// space-joined token windows.
fn extract_terms(text: &str, ngram_range: (usize, usize)) -> Vec<String> {
    let tokens: Vec<&str> = text
        .split_whitespace()
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .collect();

    let mut terms = Vec::new();
    for n in ngram_range.0..=ngram_range.1 {
        for window in tokens.windows(n) {
            terms.push(window.join(" "));
        }
    }
    terms
}

#[cfg(test)]
#[path = "vectorize_tests.rs"]
mod tests;
