//! Validated variable key type.

use super::CatalogDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum key length, matching the `VARCHAR(64)` column.
const MAX_KEY_LENGTH: usize = 64;

/// Identifier used inside `{key}` placeholders.
///
/// Keys are case-sensitive and restricted to ASCII letters, digits, and
/// underscores, which is exactly the character class the placeholder scanner
/// recognises.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableKey(String);

impl VariableKey {
    /// Creates a validated variable key.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogDomainError::EmptyVariableKey`] for blank input,
    /// [`CatalogDomainError::VariableKeyTooLong`] beyond 64 characters, or
    /// [`CatalogDomainError::InvalidVariableKey`] for characters outside
    /// `[A-Za-z0-9_]`.
    pub fn new(value: impl Into<String>) -> Result<Self, CatalogDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(CatalogDomainError::EmptyVariableKey);
        }
        if trimmed.len() > MAX_KEY_LENGTH {
            return Err(CatalogDomainError::VariableKeyTooLong(raw));
        }
        if !trimmed.chars().all(is_key_char) {
            return Err(CatalogDomainError::InvalidVariableKey(raw));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Renders the key as a visible `{key}` placeholder.
    #[must_use]
    pub fn placeholder(&self) -> String {
        format!("{{{}}}", self.0)
    }
}

/// Returns `true` for characters allowed in a variable key.
#[must_use]
pub(crate) const fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl AsRef<str> for VariableKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for VariableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
