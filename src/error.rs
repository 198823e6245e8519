//! Error types for the rainfall-qc library.

use thiserror::Error;

/// Result type alias for QC operations.
pub type Result<T> = std::result::Result<T, QcError>;

/// Errors that can occur while constructing series or running checks.
///
/// Statistical degeneracy (too little data, empty joins, all-missing
/// auxiliary series) is never an error: checks emit NaN verdicts for the
/// affected timestamps instead. These variants cover structurally invalid
/// input only.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QcError {
    /// Input data is empty where at least one observation is required.
    #[error("empty input data")]
    EmptyData,

    /// Insufficient data points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Length mismatch between paired vectors.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Timestamp-related error.
    #[error("timestamp error: {0}")]
    TimestampError(String),
}
