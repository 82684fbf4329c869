//! Error types for resolution domain values.

use thiserror::Error;

/// Errors returned while constructing resolution domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolutionDomainError {
    /// The sample set name is empty after trimming.
    #[error("sample data set name must not be empty")]
    EmptySampleSetName,

    /// A sample value is keyed by something that is not a variable key.
    #[error("sample data key '{0}' is not a valid variable key")]
    InvalidSampleKey(String),
}
