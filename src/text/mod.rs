//! Text processing: review cleaning, stopwords, and TF-IDF vectorization.

pub mod normalize;
pub mod stopwords;
pub mod vectorize;

pub use normalize::ReviewNormalizer;
pub use stopwords::StopWords;
pub use vectorize::{FittedTfidf, TfidfVectorizer};
