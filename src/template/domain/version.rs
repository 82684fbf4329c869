//! Immutable template versions and their variable mappings.

use super::{ApprovalStatus, TemplateDomainError, TemplateId, TemplateVersionId};
use crate::catalog::domain::VariableCatalogEntry;
use crate::tenancy::OwnerId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-template version counter, starting at one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionNumber(u32);

impl VersionNumber {
    /// The number given to a template's first version.
    pub const FIRST: Self = Self(1);

    /// Creates a validated version number.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateDomainError::InvalidVersionNumber`] for zero.
    pub fn new(value: u32) -> Result<Self, TemplateDomainError> {
        if value == 0 {
            return Err(TemplateDomainError::InvalidVersionNumber(0));
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Returns the number that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl TryFrom<i32> for VersionNumber {
    type Error = TemplateDomainError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .map_err(|_| TemplateDomainError::InvalidVersionNumber(i64::from(value)))
            .and_then(Self::new)
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One-indexed slot of a variable in the external positional format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(u32);

impl Position {
    /// Creates a validated position.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateDomainError::InvalidPosition`] for zero.
    pub fn new(value: u32) -> Result<Self, TemplateDomainError> {
        if value == 0 {
            return Err(TemplateDomainError::InvalidPosition(0));
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl TryFrom<i32> for Position {
    type Error = TemplateDomainError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .map_err(|_| TemplateDomainError::InvalidPosition(i64::from(value)))
            .and_then(Self::new)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog entry bound to a position within a version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateVariable {
    position: Position,
    entry: VariableCatalogEntry,
}

impl TemplateVariable {
    /// Binds a catalog entry to a position.
    #[must_use]
    pub const fn new(position: Position, entry: VariableCatalogEntry) -> Self {
        Self { position, entry }
    }

    /// Returns the position.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns the bound catalog entry.
    #[must_use]
    pub const fn entry(&self) -> &VariableCatalogEntry {
        &self.entry
    }
}

/// External registry bookkeeping for a version.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExternalSync {
    content_id: Option<String>,
    approval_status: ApprovalStatus,
    last_synced_at: Option<DateTime<Utc>>,
}

impl ExternalSync {
    /// Records a sync outcome.
    #[must_use]
    pub const fn new(
        content_id: Option<String>,
        approval_status: ApprovalStatus,
        last_synced_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            content_id,
            approval_status,
            last_synced_at,
        }
    }

    /// Returns the external content identifier, if exported.
    #[must_use]
    pub fn content_id(&self) -> Option<&str> {
        self.content_id.as_deref()
    }

    /// Returns the mapped approval status.
    #[must_use]
    pub const fn approval_status(&self) -> ApprovalStatus {
        self.approval_status
    }

    /// Returns when the registry was last contacted for this version.
    #[must_use]
    pub const fn last_synced_at(&self) -> Option<DateTime<Utc>> {
        self.last_synced_at
    }
}

/// Immutable body snapshot belonging to one template.
///
/// The body and variables are fixed at construction. Only the active flag and
/// the external sync record change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateVersion {
    id: TemplateVersionId,
    template_id: TemplateId,
    version_number: VersionNumber,
    body: String,
    variables: Vec<TemplateVariable>,
    is_active: bool,
    sync: ExternalSync,
    created_at: DateTime<Utc>,
    created_by: OwnerId,
}

/// Parameter object for reconstructing a persisted version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedVersionData {
    /// Persisted identifier.
    pub id: TemplateVersionId,
    /// Owning template.
    pub template_id: TemplateId,
    /// Version number.
    pub version_number: VersionNumber,
    /// Raw body text.
    pub body: String,
    /// Variables in any order; sorted by position on load.
    pub variables: Vec<TemplateVariable>,
    /// Active flag.
    pub is_active: bool,
    /// External sync record.
    pub sync: ExternalSync,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Author.
    pub created_by: OwnerId,
}

impl TemplateVersion {
    /// Creates a new active version.
    ///
    /// Callers are expected to have validated `body` against `variables`.
    #[must_use]
    pub fn new(
        template_id: TemplateId,
        version_number: VersionNumber,
        body: impl Into<String>,
        mut variables: Vec<TemplateVariable>,
        created_by: OwnerId,
        clock: &impl Clock,
    ) -> Self {
        variables.sort_by_key(TemplateVariable::position);
        Self {
            id: TemplateVersionId::new(),
            template_id,
            version_number,
            body: body.into(),
            variables,
            is_active: true,
            sync: ExternalSync::default(),
            created_at: clock.utc(),
            created_by,
        }
    }

    /// Reconstructs a version from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedVersionData) -> Self {
        let mut variables = data.variables;
        variables.sort_by_key(TemplateVariable::position);
        Self {
            id: data.id,
            template_id: data.template_id,
            version_number: data.version_number,
            body: data.body,
            variables,
            is_active: data.is_active,
            sync: data.sync,
            created_at: data.created_at,
            created_by: data.created_by,
        }
    }

    /// Returns the version identifier.
    #[must_use]
    pub const fn id(&self) -> TemplateVersionId {
        self.id
    }

    /// Returns the owning template identifier.
    #[must_use]
    pub const fn template_id(&self) -> TemplateId {
        self.template_id
    }

    /// Returns the version number.
    #[must_use]
    pub const fn version_number(&self) -> VersionNumber {
        self.version_number
    }

    /// Returns the raw body text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the variables ordered by position.
    #[must_use]
    pub fn variables(&self) -> &[TemplateVariable] {
        &self.variables
    }

    /// Returns whether this is the template's active version.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the external sync record.
    #[must_use]
    pub const fn sync(&self) -> &ExternalSync {
        &self.sync
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the author.
    #[must_use]
    pub const fn created_by(&self) -> OwnerId {
        self.created_by
    }

    /// Clears the active flag when a newer version takes over.
    pub const fn deactivate(&mut self) {
        self.is_active = false;
    }

    /// Replaces the external sync record.
    pub fn record_sync(&mut self, sync: ExternalSync) {
        self.sync = sync;
    }
}
