//! Error types for preprocessing operations.

use thiserror::Error;

/// Result alias used throughout the preprocessing module.
pub type Result<T> = std::result::Result<T, PreprocessingError>;

/// Error type for preprocessing operations.
#[derive(Debug, Error)]
pub enum PreprocessingError {
    /// Mutually exclusive options were requested together. Permanent for the
    /// given configuration.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Input table does not have the shape the operation requires.
    #[error("invalid shape: expected {expected}, got {got}")]
    InvalidShape { expected: String, got: String },

    /// `transform` (or an accessor needing learned state) called before any fit.
    #[error("{0} has not been fitted; call fit or partial_fit first")]
    NotFitted(&'static str),

    /// Empty data provided where non-empty was required.
    #[error("empty data: {0}")]
    EmptyData(String),

    /// A timestamp is missing, so no year can be extracted.
    #[error("missing values: {0}")]
    MissingValues(String),

    /// Numerical computation error (non-finite input, overflow).
    #[error("numerical error: {0}")]
    NumericalError(String),

    /// Feature dimension mismatch.
    #[error("feature mismatch: expected {expected_features} features, got {got_features}")]
    FeatureMismatch {
        expected_features: usize,
        got_features: usize,
    },

    /// A category outside the fitted domain was seen with `HandleUnknown::Error`.
    #[error("unknown category {category} at row {row}")]
    UnknownCategory { category: i32, row: usize },

    /// Invalid argument value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Serialization or deserialization error.
    #[error("serialization error: {0}")]
    SerializationError(String),
}

impl From<bincode::Error> for PreprocessingError {
    fn from(err: bincode::Error) -> Self {
        PreprocessingError::SerializationError(err.to_string())
    }
}
