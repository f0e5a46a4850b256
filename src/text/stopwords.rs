//! English stopword set for optional token filtering.

use std::collections::HashSet;

/// A stopword set with case-insensitive membership.
///
/// # Examples
///
/// ```
/// use sentir::text::StopWords;
///
/// let sw = StopWords::english();
/// assert!(sw.contains("the"));
/// assert!(sw.contains("The"));
/// assert!(!sw.contains("movie"));
/// ```
#[derive(Debug, Clone)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Builds a set from custom words (stored lowercase).
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// The default English stopword set.
    #[must_use]
    pub fn english() -> Self {
        Self::new(ENGLISH_STOP_WORDS)
    }

    /// Case-insensitive membership test.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        if word.chars().any(char::is_uppercase) {
            self.words.contains(&word.to_lowercase())
        } else {
            self.words.contains(word)
        }
    }

    /// Number of words in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True if the set holds no words.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Common English stopwords (articles, pronouns, prepositions,
/// conjunctions, auxiliaries, and frequent function words).
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself",
    "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just",
    "me", "might", "more", "most", "must", "my", "myself", "no", "nor", "not", "now", "of", "off",
    "on", "once", "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same",
    "shall", "she", "should", "so", "some", "such", "than", "that", "the", "their", "theirs",
    "them", "themselves", "then", "there", "these", "they", "this", "those", "through", "to",
    "too", "under", "until", "up", "upon", "very", "was", "we", "were", "what", "when", "where",
    "which", "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours",
    "yourself", "yourselves",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_contains_common_words() {
        let sw = StopWords::english();
        assert!(sw.contains("the"));
        assert!(sw.contains("and"));
        assert!(sw.contains("is"));
    }

    #[test]
    fn test_case_insensitive() {
        let sw = StopWords::english();
        assert!(sw.contains("THE"));
        assert!(sw.contains("The"));
    }

    #[test]
    fn test_content_words_pass() {
        let sw = StopWords::english();
        assert!(!sw.contains("movie"));
        assert!(!sw.contains("terrible"));
    }

    #[test]
    fn test_custom_set() {
        let sw = StopWords::new(["Foo", "bar"]);
        assert_eq!(sw.len(), 2);
        assert!(sw.contains("foo"));
        assert!(sw.contains("BAR"));
        assert!(!sw.contains("baz"));
    }

    #[test]
    fn test_empty() {
        let sw = StopWords::new(Vec::<String>::new());
        assert!(sw.is_empty());
        assert!(!sw.contains("the"));
    }
}
