//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use sentir::prelude::*;
//! ```

pub use crate::classification::MultinomialNB;
pub use crate::error::{Result, SentirError};
pub use crate::feature_selection::{chi2, FittedSelector, SelectKBest};
pub use crate::linear_model::SGDClassifier;
pub use crate::metrics::accuracy;
pub use crate::pipeline::{BlendWeights, PipelineConfig};
pub use crate::primitives::{CsrMatrix, Vector};
pub use crate::text::{FittedTfidf, ReviewNormalizer, StopWords, TfidfVectorizer};
pub use crate::traits::ProbabilisticClassifier;
