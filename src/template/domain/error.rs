//! Error types for template domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing template domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TemplateDomainError {
    /// The template name is empty after trimming.
    #[error("template name must not be empty")]
    EmptyTemplateName,

    /// The template name exceeds the storage limit.
    #[error("template name exceeds 120 character limit")]
    TemplateNameTooLong,

    /// Version numbers start at one.
    #[error("version number must be positive, got {0}")]
    InvalidVersionNumber(i64),

    /// Variable positions start at one.
    #[error("variable position must be positive, got {0}")]
    InvalidPosition(i64),
}

/// Error returned while parsing a template type from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown template type: {0}")]
pub struct ParseTemplateTypeError(pub String);

/// Error returned while parsing an approval status from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown approval status: {0}")]
pub struct ParseApprovalStatusError(pub String);
