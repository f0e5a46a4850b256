//! Review text cleaning.
//!
//! Raw reviews arrive as markup-laden prose. Normalization strips tags,
//! drops everything that is not an ASCII letter, lowercases, and rejoins
//! the surviving tokens with single spaces, so that downstream
//! vectorization sees a uniform token stream.

use crate::text::stopwords::StopWords;

/// Cleans raw review strings into space-joined lowercase alphabetic tokens.
///
/// The normalizer is a pure function of its input: no I/O, no state
/// mutation, and cleaning an already-cleaned string changes nothing.
/// Stopword removal is available but off by default.
///
/// # Examples
///
/// ```
/// use sentir::text::ReviewNormalizer;
///
/// let normalizer = ReviewNormalizer::new();
/// let cleaned = normalizer.normalize("<br />Great movie, 10/10!");
/// assert_eq!(cleaned, "great movie");
///
/// // Idempotent: cleaning cleaned text is a no-op
/// assert_eq!(normalizer.normalize(&cleaned), cleaned);
/// ```
#[derive(Debug, Clone)]
pub struct ReviewNormalizer {
    remove_stop_words: bool,
    stop_words: StopWords,
}

impl ReviewNormalizer {
    /// Creates a normalizer with stopword removal disabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            remove_stop_words: false,
            stop_words: StopWords::english(),
        }
    }

    /// Enables or disables English stopword removal.
    #[must_use]
    pub fn with_stop_words(mut self, remove: bool) -> Self {
        self.remove_stop_words = remove;
        self
    }

    /// Cleans one raw review into a space-joined token string.
    ///
    /// Markup tags (`<...>` spans) are removed first; an unterminated tag
    /// swallows the rest of the input. Every non-ASCII-letter character
    /// becomes a space, the result is lowercased and split on whitespace,
    /// and tokens are rejoined with single spaces. Empty or all-markup
    /// input yields the empty string.
    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        let mut letters = String::with_capacity(raw.len());
        let mut in_tag = false;
        for ch in raw.chars() {
            match ch {
                '<' => in_tag = true,
                '>' if in_tag => in_tag = false,
                _ if in_tag => {}
                _ if ch.is_ascii_alphabetic() => {
                    letters.push(ch.to_ascii_lowercase());
                }
                _ => letters.push(' '),
            }
        }

        let tokens = letters
            .split_whitespace()
            .filter(|token| !(self.remove_stop_words && self.stop_words.contains(token)));

        let mut cleaned = String::with_capacity(letters.len());
        for (i, token) in tokens.enumerate() {
            if i > 0 {
                cleaned.push(' ');
            }
            cleaned.push_str(token);
        }
        cleaned
    }

    /// Cleans a batch of raw reviews.
    #[must_use]
    pub fn normalize_all<S: AsRef<str>>(&self, raw: &[S]) -> Vec<String> {
        raw.iter().map(|r| self.normalize(r.as_ref())).collect()
    }
}

impl Default for ReviewNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
