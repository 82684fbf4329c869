//! Validated template name.

use super::TemplateDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_NAME_LENGTH: usize = 120;

/// Human-readable template name, trimmed and bounded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateName(String);

impl TemplateName {
    /// Creates a validated template name.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateDomainError::EmptyTemplateName`] for blank input or
    /// [`TemplateDomainError::TemplateNameTooLong`] beyond 120 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TemplateDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TemplateDomainError::EmptyTemplateName);
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(TemplateDomainError::TemplateNameTooLong);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TemplateName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
