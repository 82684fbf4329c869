//! Variable catalog entry aggregate.

use super::{CatalogDomainError, CatalogEntryId, SourcePath, SourceRef, SourceType, VariableKey};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A resolvable variable: its placeholder key, human labels, and how to
/// obtain its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableCatalogEntry {
    id: CatalogEntryId,
    key: VariableKey,
    display_name: String,
    description: String,
    source: SourceRef,
    fallback_source: Option<SourceRef>,
    fallback_value: Option<String>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCatalogEntry {
    /// Persisted identifier.
    pub id: CatalogEntryId,
    /// Placeholder key.
    pub key: VariableKey,
    /// Human-readable name.
    pub display_name: String,
    /// Longer description shown to template authors.
    pub description: String,
    /// Primary source declaration.
    pub source: SourceRef,
    /// Secondary source tried when the primary yields nothing.
    pub fallback_source: Option<SourceRef>,
    /// Static last-resort value.
    pub fallback_value: Option<String>,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

/// Authoring-time builder for a catalog entry.
///
/// Inputs are kept raw until [`CatalogEntryDraft::build`] so that every
/// problem is reported through [`CatalogDomainError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntryDraft {
    key: String,
    display_name: String,
    description: String,
    source_type: SourceType,
    source_path: String,
    fallback_source_type: Option<SourceType>,
    fallback_source_path: Option<String>,
    fallback_value: Option<String>,
}

impl CatalogEntryDraft {
    /// Starts a draft with the mandatory fields.
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        display_name: impl Into<String>,
        source_type: SourceType,
        source_path: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
            description: String::new(),
            source_type,
            source_path: source_path.into(),
            fallback_source_type: None,
            fallback_source_path: None,
            fallback_value: None,
        }
    }

    /// Sets the author-facing description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets a secondary path on the same source record.
    #[must_use]
    pub fn with_fallback_path(mut self, path: impl Into<String>) -> Self {
        self.fallback_source_type = None;
        self.fallback_source_path = Some(path.into());
        self
    }

    /// Sets a secondary path on a different source record.
    #[must_use]
    pub fn with_fallback_source(mut self, source_type: SourceType, path: impl Into<String>) -> Self {
        self.fallback_source_type = Some(source_type);
        self.fallback_source_path = Some(path.into());
        self
    }

    /// Sets the static last-resort value.
    #[must_use]
    pub fn with_fallback_value(mut self, value: impl Into<String>) -> Self {
        self.fallback_value = Some(value.into());
        self
    }

    /// Returns the raw key as supplied.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Validates the draft and stamps a new catalog entry.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogDomainError`] when the key, display name, paths, or
    /// fallback value are invalid, or when a path does not address a field
    /// of its declared source type.
    pub fn build(self, clock: &impl Clock) -> Result<VariableCatalogEntry, CatalogDomainError> {
        let key = VariableKey::new(self.key)?;
        let display_name = self.display_name.trim().to_owned();
        if display_name.is_empty() {
            return Err(CatalogDomainError::EmptyDisplayName(key.to_string()));
        }

        let source = bind_source(self.source_type, &self.source_path)?;
        let fallback_source = self
            .fallback_source_path
            .as_deref()
            .map(|path| {
                bind_source(self.fallback_source_type.unwrap_or(self.source_type), path)
            })
            .transpose()?;

        let fallback_value = match self.fallback_value {
            Some(value) if value.trim().is_empty() => {
                return Err(CatalogDomainError::BlankFallbackValue(key.to_string()));
            }
            other => other,
        };

        Ok(VariableCatalogEntry {
            id: CatalogEntryId::new(),
            key,
            display_name,
            description: self.description.trim().to_owned(),
            source,
            fallback_source,
            fallback_value,
            created_at: clock.utc(),
        })
    }
}

fn bind_source(source_type: SourceType, raw_path: &str) -> Result<SourceRef, CatalogDomainError> {
    let path = SourcePath::parse(raw_path)?;
    let source = SourceRef::new(source_type, path);
    if !source.is_resolvable() {
        return Err(CatalogDomainError::UnresolvableSourcePath {
            source_type: source_type.to_string(),
            path: raw_path.trim().to_owned(),
        });
    }
    Ok(source)
}

impl VariableCatalogEntry {
    /// Reconstructs an entry from persisted storage.
    ///
    /// Paths are not re-checked for resolvability; the resolver treats an
    /// unresolvable persisted path as missing data.
    #[must_use]
    pub fn from_persisted(data: PersistedCatalogEntry) -> Self {
        Self {
            id: data.id,
            key: data.key,
            display_name: data.display_name,
            description: data.description,
            source: data.source,
            fallback_source: data.fallback_source,
            fallback_value: data.fallback_value,
            created_at: data.created_at,
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> CatalogEntryId {
        self.id
    }

    /// Returns the placeholder key.
    #[must_use]
    pub const fn key(&self) -> &VariableKey {
        &self.key
    }

    /// Returns the human-readable name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the author-facing description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the primary source declaration.
    #[must_use]
    pub const fn source(&self) -> &SourceRef {
        &self.source
    }

    /// Returns the primary source record family.
    #[must_use]
    pub const fn source_type(&self) -> SourceType {
        self.source.source_type()
    }

    /// Returns the secondary source declaration, if any.
    #[must_use]
    pub const fn fallback_source(&self) -> Option<&SourceRef> {
        self.fallback_source.as_ref()
    }

    /// Returns the static fallback value, if any.
    #[must_use]
    pub fn fallback_value(&self) -> Option<&str> {
        self.fallback_value.as_deref()
    }

    /// Returns the registration timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
