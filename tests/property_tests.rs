//! Property-based tests using proptest.
//!
//! These verify invariants of the text normalizer, the vectorizer, and
//! the probability blend.

use proptest::prelude::*;

use sentir::pipeline::BLEND;
use sentir::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Cleaning a cleaned string changes nothing.
    #[test]
    fn normalizer_is_idempotent(raw in ".{0,200}") {
        let normalizer = ReviewNormalizer::new();
        let once = normalizer.normalize(&raw);
        let twice = normalizer.normalize(&once);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn normalizer_idempotent_with_stopword_removal(raw in ".{0,200}") {
        let normalizer = ReviewNormalizer::new().with_stop_words(true);
        let once = normalizer.normalize(&raw);
        let twice = normalizer.normalize(&once);
        prop_assert_eq!(twice, once);
    }

    // Output alphabet: lowercase ASCII letters joined by single spaces.
    #[test]
    fn normalizer_output_is_lowercase_tokens(raw in ".{0,200}") {
        let normalizer = ReviewNormalizer::new();
        let cleaned = normalizer.normalize(&raw);
        prop_assert!(cleaned.chars().all(|c| c.is_ascii_lowercase() || c == ' '));
        prop_assert!(!cleaned.starts_with(' '));
        prop_assert!(!cleaned.ends_with(' '));
        prop_assert!(!cleaned.contains("  "));
    }

    // Blended score is exactly the fixed weighted sum.
    #[test]
    fn blend_matches_formula(
        pairs in proptest::collection::vec((0.0f32..=1.0, 0.0f32..=1.0), 1..50)
    ) {
        let p_nb = Vector::from_vec(pairs.iter().map(|p| p.0).collect());
        let p_sgd = Vector::from_vec(pairs.iter().map(|p| p.1).collect());
        let blended = BLEND.blend(&p_nb, &p_sgd).expect("equal lengths");

        for (i, &(nb, sgd)) in pairs.iter().enumerate() {
            prop_assert!((blended[i] - (0.2 * nb + sgd)).abs() < 1e-5);
            prop_assert!((0.0..=1.2).contains(&blended[i]));
        }
    }

    // The vocabulary cap bounds the transformed width.
    #[test]
    fn vectorizer_respects_max_features(
        cap in 1usize..6,
        docs in proptest::collection::vec("[a-c]{2,4}( [a-c]{2,4}){0,5}", 1..8)
    ) {
        let vectorizer = TfidfVectorizer::new().with_max_features(cap);
        if let Ok(fitted) = vectorizer.fit(&docs) {
            prop_assert!(fitted.vocabulary_size() <= cap);
            let matrix = fitted.transform(&docs).expect("fitted vocabulary");
            prop_assert!(matrix.n_cols() <= cap);
            prop_assert_eq!(matrix.n_rows(), docs.len());
        }
    }
}
