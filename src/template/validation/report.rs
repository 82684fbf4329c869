//! Validation inputs, issues, and the structured report.

use crate::template::domain::TemplateVariable;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Author-supplied binding of a placeholder key to a position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariableMapping {
    /// Placeholder key as written in the body.
    pub key: String,
    /// One-indexed position in the external format.
    pub position: u32,
}

impl VariableMapping {
    /// Creates a mapping.
    #[must_use]
    pub fn new(key: impl Into<String>, position: u32) -> Self {
        Self {
            key: key.into(),
            position,
        }
    }
}

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum ValidationIssue {
    /// The body is blank.
    #[error("template body must not be empty")]
    EmptyBody,

    /// The body exceeds the configured length.
    #[error("template body has {actual} characters, limit is {max}")]
    BodyTooLong {
        /// Configured limit.
        max: usize,
        /// Observed length.
        actual: usize,
    },

    /// More mappings than the configured limit.
    #[error("template maps {actual} variables, limit is {max}")]
    TooManyVariables {
        /// Configured limit.
        max: usize,
        /// Observed count.
        actual: usize,
    },

    /// A key is not a valid variable key.
    #[error("'{key}' is not a valid variable key")]
    InvalidVariableKey {
        /// Offending key.
        key: String,
    },

    /// The same key is mapped more than once.
    #[error("variable '{key}' is mapped at more than one position: {positions:?}")]
    DuplicateMapping {
        /// Repeated key.
        key: String,
        /// Positions it was mapped at.
        positions: Vec<u32>,
    },

    /// Placeholders in the body with no mapping.
    #[error("placeholders without a mapping: {}", .keys.join(", "))]
    UnmappedPlaceholders {
        /// Offending keys in body order.
        keys: Vec<String>,
    },

    /// Mappings whose key does not occur in the body.
    #[error("mappings not used in the body: {}", .keys.join(", "))]
    UnusedMappings {
        /// Offending keys in mapping order.
        keys: Vec<String>,
    },

    /// Placeholders that name no catalog entry.
    #[error("unknown variables: {}", .keys.join(", "))]
    UnknownVariables {
        /// Offending keys in body order.
        keys: Vec<String>,
    },

    /// Sorted positions skip a value.
    #[error("variable positions must be 1..N: expected {expected}, found {found}")]
    PositionGap {
        /// Position that should come next.
        expected: u32,
        /// Position actually found.
        found: u32,
    },

    /// Two mappings share a position.
    #[error("variable position {position} is used more than once")]
    DuplicatePosition {
        /// Repeated position.
        position: u32,
    },
}

/// Outcome of validating a body and its mappings.
///
/// Callers must not persist anything unless [`Self::is_valid`] holds.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TemplateValidationReport {
    errors: Vec<ValidationIssue>,
    variables: Vec<TemplateVariable>,
}

impl TemplateValidationReport {
    pub(crate) const fn valid(variables: Vec<TemplateVariable>) -> Self {
        Self {
            errors: Vec::new(),
            variables,
        }
    }

    pub(crate) const fn invalid(errors: Vec<ValidationIssue>) -> Self {
        Self {
            errors,
            variables: Vec::new(),
        }
    }

    /// Returns `true` when no rule failed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns every failure.
    #[must_use]
    pub fn errors(&self) -> &[ValidationIssue] {
        &self.errors
    }

    /// Returns the resolved variables ordered by position.
    #[must_use]
    pub fn variables(&self) -> &[TemplateVariable] {
        &self.variables
    }

    /// Consumes the report, returning the resolved variables.
    #[must_use]
    pub fn into_variables(self) -> Vec<TemplateVariable> {
        self.variables
    }
}

impl fmt::Display for TemplateValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            return f.write_str("valid");
        }
        let messages: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}
