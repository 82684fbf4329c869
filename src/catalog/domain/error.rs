//! Error types for catalog domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing catalog domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogDomainError {
    /// The variable key is empty after trimming.
    #[error("variable key must not be empty")]
    EmptyVariableKey,

    /// The variable key contains characters outside `[A-Za-z0-9_]`.
    #[error("variable key '{0}' may only contain letters, digits, and underscores")]
    InvalidVariableKey(String),

    /// The variable key exceeds the storage limit.
    #[error("variable key exceeds 64 character limit: {0}")]
    VariableKeyTooLong(String),

    /// The display name is empty after trimming.
    #[error("display name for '{0}' must not be empty")]
    EmptyDisplayName(String),

    /// The source path is not a well-formed dot-path.
    #[error("malformed source path '{0}'")]
    MalformedSourcePath(String),

    /// The source path does not address any field of the declared source.
    #[error("source path '{path}' is not resolvable against {source_type} records")]
    UnresolvableSourcePath {
        /// Declared source type label.
        source_type: String,
        /// Offending path.
        path: String,
    },

    /// The static fallback value is present but blank.
    #[error("fallback value for '{0}' must not be blank")]
    BlankFallbackValue(String),
}

/// Error returned while parsing a source type from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown variable source type: {0}")]
pub struct ParseSourceTypeError(pub String);
