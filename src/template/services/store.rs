//! Template store: validated creation, versioning, archiving, and queries.

use crate::catalog::{
    domain::VariableKey,
    ports::{CatalogRepositoryError, VariableCatalogRepository},
};
use crate::error::ErrorKind;
use crate::template::{
    domain::{
        Template, TemplateDetail, TemplateDomainError, TemplateId, TemplateListFilter,
        TemplateName, TemplateSummary, TemplateType, TemplateVersion, VersionNumber,
        extract_placeholders,
    },
    ports::{TemplateRepository, TemplateRepositoryError},
    validation::{
        CatalogSnapshot, TemplateValidationReport, ValidationLimits, VariableMapping,
        validate_template,
    },
};
use crate::tenancy::OwnerId;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for creating a template with its first version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTemplateRequest {
    owner_id: OwnerId,
    name: String,
    template_type: TemplateType,
    description: String,
    body: String,
    mappings: Vec<VariableMapping>,
}

impl CreateTemplateRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(
        owner_id: OwnerId,
        name: impl Into<String>,
        template_type: TemplateType,
        body: impl Into<String>,
    ) -> Self {
        Self {
            owner_id,
            name: name.into(),
            template_type,
            description: String::new(),
            body: body.into(),
            mappings: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the variable mappings.
    #[must_use]
    pub fn with_mappings(mut self, mappings: impl IntoIterator<Item = VariableMapping>) -> Self {
        self.mappings = mappings.into_iter().collect();
        self
    }

    /// Adds one variable mapping.
    #[must_use]
    pub fn with_variable(mut self, key: impl Into<String>, position: u32) -> Self {
        self.mappings.push(VariableMapping::new(key, position));
        self
    }
}

/// Service-level errors for template store operations.
#[derive(Debug, Error)]
pub enum TemplateStoreError {
    /// The body or mappings failed validation. Nothing was persisted.
    #[error("template validation failed: {0}")]
    Validation(TemplateValidationReport),
    /// A template attribute failed validation.
    #[error(transparent)]
    Domain(#[from] TemplateDomainError),
    /// The template is missing, archived, or owned by someone else.
    #[error("template not found: {0}")]
    NotFound(TemplateId),
    /// Catalog lookup failed.
    #[error(transparent)]
    Catalog(#[from] CatalogRepositoryError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TemplateRepositoryError),
}

impl TemplateStoreError {
    /// Returns the caller-facing category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::Domain(_) => ErrorKind::Validation,
            Self::NotFound(_)
            | Self::Repository(
                TemplateRepositoryError::TemplateNotFound(_)
                | TemplateRepositoryError::VersionNotFound(_),
            ) => ErrorKind::NotFound,
            Self::Repository(
                TemplateRepositoryError::ActiveTypeConflict { .. }
                | TemplateRepositoryError::DuplicateTemplate(_)
                | TemplateRepositoryError::VersionConflict { .. },
            ) => ErrorKind::Conflict,
            Self::Catalog(_) | Self::Repository(_) => ErrorKind::Internal,
        }
    }

    /// Returns `true` when repeating the call may succeed, which is the case
    /// for a lost version-number race.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Repository(TemplateRepositoryError::VersionConflict { .. })
        )
    }
}

/// Result type for template store operations.
pub type TemplateStoreResult<T> = Result<T, TemplateStoreError>;

/// Loads the catalog entries referenced by `body` and `mappings`.
///
/// Keys that are not valid variable keys are skipped; the validator reports
/// them.
///
/// # Errors
///
/// Returns [`CatalogRepositoryError`] when the lookup fails.
pub async fn load_catalog_snapshot<K>(
    catalog: &K,
    body: &str,
    mappings: &[VariableMapping],
) -> Result<CatalogSnapshot, CatalogRepositoryError>
where
    K: VariableCatalogRepository + ?Sized,
{
    let mut keys: Vec<VariableKey> = extract_placeholders(body)
        .into_iter()
        .chain(mappings.iter().map(|mapping| mapping.key.clone()))
        .filter_map(|key| VariableKey::new(key).ok())
        .collect();
    keys.sort_unstable();
    keys.dedup();
    if keys.is_empty() {
        return Ok(CatalogSnapshot::default());
    }
    Ok(CatalogSnapshot::from_entries(catalog.find_by_keys(&keys).await?))
}

/// Template authoring and versioning service.
#[derive(Clone)]
pub struct TemplateStoreService<T, K, C>
where
    T: TemplateRepository,
    K: VariableCatalogRepository,
    C: Clock + Send + Sync,
{
    templates: Arc<T>,
    catalog: Arc<K>,
    clock: Arc<C>,
    limits: ValidationLimits,
}

impl<T, K, C> TemplateStoreService<T, K, C>
where
    T: TemplateRepository,
    K: VariableCatalogRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new template store service with default limits.
    #[must_use]
    pub fn new(templates: Arc<T>, catalog: Arc<K>, clock: Arc<C>) -> Self {
        Self {
            templates,
            catalog,
            clock,
            limits: ValidationLimits::default(),
        }
    }

    /// Replaces the validation limits.
    #[must_use]
    pub const fn with_limits(mut self, limits: ValidationLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Validates a body and its mappings against the catalog.
    ///
    /// Persists nothing. An invalid template is an `Ok` report with errors.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateStoreError::Catalog`] when the catalog lookup fails.
    pub async fn validate(
        &self,
        body: &str,
        mappings: &[VariableMapping],
    ) -> TemplateStoreResult<TemplateValidationReport> {
        let snapshot = load_catalog_snapshot(&*self.catalog, body, mappings).await?;
        Ok(validate_template(body, mappings, &snapshot, &self.limits))
    }

    /// Creates a template and its first, active version.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateStoreError::Validation`] when the body or mappings
    /// are invalid, [`TemplateStoreError::Domain`] for an invalid name, and
    /// a repository conflict when the owner already has a live template of
    /// this type.
    pub async fn create_template(
        &self,
        request: CreateTemplateRequest,
    ) -> TemplateStoreResult<TemplateDetail> {
        let name = TemplateName::new(request.name)?;
        let report = self.validate(&request.body, &request.mappings).await?;
        if !report.is_valid() {
            return Err(TemplateStoreError::Validation(report));
        }

        let template = Template::new(
            request.owner_id,
            name,
            request.template_type,
            request.description,
            &*self.clock,
        );
        let version = TemplateVersion::new(
            template.id(),
            VersionNumber::FIRST,
            request.body,
            report.into_variables(),
            request.owner_id,
            &*self.clock,
        );
        self.templates.create(&template, &version).await?;

        info!(
            template_id = %template.id(),
            owner_id = %template.owner_id(),
            template_type = %template.template_type(),
            "created template"
        );
        Ok(TemplateDetail::new(template, vec![version]))
    }

    /// Appends a new active version to a template.
    ///
    /// This is the only way to change a template's content.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateStoreError::NotFound`] when the template is missing,
    /// archived, or not owned by `owner_id`;
    /// [`TemplateStoreError::Validation`] when the body or mappings are
    /// invalid; and a retryable repository conflict when a concurrent writer
    /// appended first.
    pub async fn create_new_version(
        &self,
        template_id: TemplateId,
        owner_id: OwnerId,
        body: impl Into<String>,
        mappings: &[VariableMapping],
    ) -> TemplateStoreResult<TemplateVersion> {
        let body = body.into();
        let detail = self
            .templates
            .find_by_id(template_id)
            .await?
            .filter(|detail| {
                detail.template().is_owned_by(owner_id) && !detail.template().is_archived()
            })
            .ok_or(TemplateStoreError::NotFound(template_id))?;

        let report = self.validate(&body, mappings).await?;
        if !report.is_valid() {
            return Err(TemplateStoreError::Validation(report));
        }

        let version_number = detail
            .latest_version_number()
            .map_or(VersionNumber::FIRST, VersionNumber::next);
        let version = TemplateVersion::new(
            template_id,
            version_number,
            body,
            report.into_variables(),
            owner_id,
            &*self.clock,
        );
        self.templates.append_version(&version).await?;

        info!(
            %template_id,
            version_number = %version.version_number(),
            "created template version"
        );
        Ok(version)
    }

    /// Soft-deletes a template.
    ///
    /// Returns `false` without error when the template is missing, not
    /// owned, or already archived.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateStoreError::Repository`] when persistence fails.
    pub async fn archive_template(
        &self,
        template_id: TemplateId,
        owner_id: OwnerId,
    ) -> TemplateStoreResult<bool> {
        let Some(mut template) = self.owned_template(template_id, owner_id).await? else {
            return Ok(false);
        };
        if !template.archive(&*self.clock) {
            return Ok(false);
        }
        self.templates.update(&template).await?;
        info!(%template_id, "archived template");
        Ok(true)
    }

    /// Clears the soft-delete marker.
    ///
    /// Returns `false` without error when the template is missing, not
    /// owned, or not archived.
    ///
    /// # Errors
    ///
    /// Returns a repository conflict when the owner has since created another
    /// live template of the same type.
    pub async fn restore_template(
        &self,
        template_id: TemplateId,
        owner_id: OwnerId,
    ) -> TemplateStoreResult<bool> {
        let Some(mut template) = self.owned_template(template_id, owner_id).await? else {
            return Ok(false);
        };
        if !template.restore(&*self.clock) {
            return Ok(false);
        }
        self.templates.update(&template).await?;
        info!(%template_id, "restored template");
        Ok(true)
    }

    /// Returns a template with its full history, newest version first.
    ///
    /// Archived templates are returned too, for audit.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateStoreError::Repository`] when the lookup fails.
    pub async fn get_template(
        &self,
        template_id: TemplateId,
        owner_id: OwnerId,
    ) -> TemplateStoreResult<Option<TemplateDetail>> {
        Ok(self
            .templates
            .find_by_id(template_id)
            .await?
            .filter(|detail| detail.template().is_owned_by(owner_id)))
    }

    /// Returns one version of an owned template.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateStoreError::Repository`] when the lookup fails.
    pub async fn get_version(
        &self,
        template_id: TemplateId,
        owner_id: OwnerId,
        version_number: VersionNumber,
    ) -> TemplateStoreResult<Option<TemplateVersion>> {
        Ok(self
            .get_template(template_id, owner_id)
            .await?
            .and_then(|detail| detail.version(version_number).cloned()))
    }

    /// Lists an owner's live templates with their active version summaries.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateStoreError::Repository`] when the lookup fails.
    pub async fn list_templates(
        &self,
        owner_id: OwnerId,
        filter: TemplateListFilter,
    ) -> TemplateStoreResult<Vec<TemplateSummary>> {
        Ok(self.templates.list_by_owner(owner_id, filter).await?)
    }

    async fn owned_template(
        &self,
        template_id: TemplateId,
        owner_id: OwnerId,
    ) -> TemplateStoreResult<Option<Template>> {
        Ok(self
            .templates
            .find_by_id(template_id)
            .await?
            .map(|detail| detail.into_parts().0)
            .filter(|template| template.is_owned_by(owner_id)))
    }
}
