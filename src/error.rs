//! Error types for sentir operations.
//!
//! Provides rich error context for pipeline and estimator failures.

use std::fmt;

/// Main error type for sentir operations.
///
/// Covers input-file problems, shape mismatches between pipeline stages,
/// and invalid estimator hyperparameters.
///
/// # Examples
///
/// ```
/// use sentir::error::SentirError;
///
/// let err = SentirError::DimensionMismatch {
///     expected: "25000 rows".to_string(),
///     actual: "24999 rows".to_string(),
/// };
/// assert!(err.to_string().contains("dimension mismatch"));
/// ```
#[derive(Debug)]
pub enum SentirError {
    /// Matrix/vector shapes don't match for the operation.
    DimensionMismatch {
        /// Expected shape description
        expected: String,
        /// Actual shape found
        actual: String,
    },

    /// Invalid hyperparameter value provided.
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// A required column is absent from an input file's header.
    MissingColumn {
        /// Column name
        column: String,
        /// File the column was expected in
        path: String,
    },

    /// I/O error (file not found, permission denied, etc.).
    Io(std::io::Error),

    /// Delimited-file parse error.
    Csv(csv::Error),

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for SentirError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentirError::DimensionMismatch { expected, actual } => {
                write!(f, "dimension mismatch: expected {expected}, got {actual}")
            }
            SentirError::InvalidHyperparameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid hyperparameter: {param} = {value}, expected {constraint}"
                )
            }
            SentirError::MissingColumn { column, path } => {
                write!(f, "Missing column {column:?} in {path}")
            }
            SentirError::Io(e) => write!(f, "I/O error: {e}"),
            SentirError::Csv(e) => write!(f, "CSV error: {e}"),
            SentirError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for SentirError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SentirError::Io(e) => Some(e),
            SentirError::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SentirError {
    fn from(err: std::io::Error) -> Self {
        SentirError::Io(err)
    }
}

impl From<csv::Error> for SentirError {
    fn from(err: csv::Error) -> Self {
        SentirError::Csv(err)
    }
}

impl From<&str> for SentirError {
    fn from(msg: &str) -> Self {
        SentirError::Other(msg.to_string())
    }
}

impl From<String> for SentirError {
    fn from(msg: String) -> Self {
        SentirError::Other(msg)
    }
}

impl SentirError {
    /// Create a dimension mismatch error with descriptive context
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create an empty input error
    #[must_use]
    pub fn empty_input(context: &str) -> Self {
        Self::Other(format!("empty input: {context}"))
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, SentirError>;
