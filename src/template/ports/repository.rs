//! Repository port for templates and their version history.

use crate::template::domain::{
    ExternalSync, Template, TemplateDetail, TemplateId, TemplateListFilter, TemplateSummary,
    TemplateType, TemplateVersion, TemplateVersionId, VersionNumber, VersionRecord,
};
use crate::tenancy::OwnerId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for template repository operations.
pub type TemplateRepositoryResult<T> = Result<T, TemplateRepositoryError>;

/// Template persistence contract.
///
/// Multi-row writes are atomic: a reader never observes a template with zero
/// or two active versions.
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// Stores a new template together with its first version.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateRepositoryError::ActiveTypeConflict`] when the owner
    /// already has a non-archived template of the same type, or
    /// [`TemplateRepositoryError::DuplicateTemplate`] when the identifier is
    /// taken.
    async fn create(
        &self,
        template: &Template,
        first_version: &TemplateVersion,
    ) -> TemplateRepositoryResult<()>;

    /// Appends `version` as the new active version of its template.
    ///
    /// The previous active version is deactivated and the template's
    /// `updated_at` is set to the version's creation time in the same
    /// atomic step.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateRepositoryError::VersionConflict`] when
    /// `version.version_number()` is not exactly one past the current
    /// maximum, which happens when another writer won the race, and
    /// [`TemplateRepositoryError::TemplateNotFound`] when the template is
    /// missing or archived.
    async fn append_version(&self, version: &TemplateVersion) -> TemplateRepositoryResult<()>;

    /// Loads a template with all of its versions, archived or not.
    async fn find_by_id(&self, id: TemplateId) -> TemplateRepositoryResult<Option<TemplateDetail>>;

    /// Lists an owner's non-archived templates, newest first.
    async fn list_by_owner(
        &self,
        owner_id: OwnerId,
        filter: TemplateListFilter,
    ) -> TemplateRepositoryResult<Vec<TemplateSummary>>;

    /// Loads a single version with its template.
    async fn find_version(
        &self,
        version_id: TemplateVersionId,
    ) -> TemplateRepositoryResult<Option<VersionRecord>>;

    /// Persists changed template attributes (archive state, timestamps).
    ///
    /// # Errors
    ///
    /// Returns [`TemplateRepositoryError::TemplateNotFound`] when the
    /// template does not exist, or
    /// [`TemplateRepositoryError::ActiveTypeConflict`] when un-archiving
    /// would give the owner two live templates of one type.
    async fn update(&self, template: &Template) -> TemplateRepositoryResult<()>;

    /// Replaces the external sync record of a version.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateRepositoryError::VersionNotFound`] when the version
    /// does not exist.
    async fn record_sync(
        &self,
        version_id: TemplateVersionId,
        sync: &ExternalSync,
    ) -> TemplateRepositoryResult<()>;

    /// Lists every version of the owner's templates that has an external
    /// content identifier.
    async fn list_synced_versions(
        &self,
        owner_id: OwnerId,
    ) -> TemplateRepositoryResult<Vec<VersionRecord>>;
}

/// Errors returned by template repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TemplateRepositoryError {
    /// A template with the same identifier already exists.
    #[error("duplicate template identifier: {0}")]
    DuplicateTemplate(TemplateId),

    /// The owner already has a live template of this type.
    #[error("owner {owner_id} already has an active {template_type} template")]
    ActiveTypeConflict {
        /// Owning operator.
        owner_id: OwnerId,
        /// Conflicting type.
        template_type: TemplateType,
    },

    /// Another writer appended a version first.
    #[error("version {version_number} of template {template_id} conflicts with a concurrent write")]
    VersionConflict {
        /// Template being versioned.
        template_id: TemplateId,
        /// Number the losing writer tried to use.
        version_number: VersionNumber,
    },

    /// The template does not exist.
    #[error("template not found: {0}")]
    TemplateNotFound(TemplateId),

    /// The version does not exist.
    #[error("template version not found: {0}")]
    VersionNotFound(TemplateVersionId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted template data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TemplateRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<diesel::result::Error> for TemplateRepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        Self::persistence(err)
    }
}
