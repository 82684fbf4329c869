//! Cross-cutting error classification.
//!
//! Each service keeps its own `thiserror` enum. [`ErrorKind`] flattens those
//! into the categories callers dispatch on, so an HTTP layer or agent runtime
//! can decide between "fix your template", "retry", and "page someone"
//! without matching nested variants.

use std::fmt;

/// Caller-facing error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The submitted template or request is malformed. Recoverable by the
    /// author.
    Validation,
    /// A uniqueness rule was violated (duplicate type per owner, duplicate
    /// catalog key, concurrent version creation, duplicate external name).
    Conflict,
    /// The entity is missing, archived, or owned by someone else.
    NotFound,
    /// No usable external credentials are configured.
    Configuration,
    /// The external template registry rejected the call.
    Export,
    /// Infrastructure failure (storage, lock poisoning, task join).
    Internal,
}

impl ErrorKind {
    /// Returns the canonical lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Conflict => "conflict",
            Self::NotFound => "not_found",
            Self::Configuration => "configuration",
            Self::Export => "export",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
