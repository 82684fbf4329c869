//! Template aggregate root.

use super::{TemplateId, TemplateName, TemplateType};
use crate::tenancy::OwnerId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// An owner's message template. Content lives in its versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    id: TemplateId,
    owner_id: OwnerId,
    name: TemplateName,
    template_type: TemplateType,
    description: String,
    archived_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTemplateData {
    /// Persisted identifier.
    pub id: TemplateId,
    /// Owning operator.
    pub owner_id: OwnerId,
    /// Template name.
    pub name: TemplateName,
    /// Sequence slot.
    pub template_type: TemplateType,
    /// Free-text description.
    pub description: String,
    /// Soft-delete timestamp.
    pub archived_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Template {
    /// Creates a new, non-archived template.
    #[must_use]
    pub fn new(
        owner_id: OwnerId,
        name: TemplateName,
        template_type: TemplateType,
        description: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        let now = clock.utc();
        Self {
            id: TemplateId::new(),
            owner_id,
            name,
            template_type,
            description: description.into().trim().to_owned(),
            archived_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstructs a template from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTemplateData) -> Self {
        Self {
            id: data.id,
            owner_id: data.owner_id,
            name: data.name,
            template_type: data.template_type,
            description: data.description,
            archived_at: data.archived_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the template identifier.
    #[must_use]
    pub const fn id(&self) -> TemplateId {
        self.id
    }

    /// Returns the owning operator.
    #[must_use]
    pub const fn owner_id(&self) -> OwnerId {
        self.owner_id
    }

    /// Returns the template name.
    #[must_use]
    pub const fn name(&self) -> &TemplateName {
        &self.name
    }

    /// Returns the sequence slot.
    #[must_use]
    pub const fn template_type(&self) -> TemplateType {
        self.template_type
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the soft-delete timestamp.
    #[must_use]
    pub const fn archived_at(&self) -> Option<DateTime<Utc>> {
        self.archived_at
    }

    /// Returns `true` when the template is soft-deleted.
    #[must_use]
    pub const fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }

    /// Returns `true` when `owner_id` owns this template.
    #[must_use]
    pub fn is_owned_by(&self, owner_id: OwnerId) -> bool {
        self.owner_id == owner_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Soft-deletes the template. Returns `false` if it was already archived.
    pub fn archive(&mut self, clock: &impl Clock) -> bool {
        if self.is_archived() {
            return false;
        }
        let now = clock.utc();
        self.archived_at = Some(now);
        self.updated_at = now;
        true
    }

    /// Clears the soft-delete marker. Returns `false` if it was not archived.
    pub fn restore(&mut self, clock: &impl Clock) -> bool {
        if !self.is_archived() {
            return false;
        }
        self.archived_at = None;
        self.updated_at = clock.utc();
        true
    }

    /// Sets the last modification timestamp.
    pub const fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}
