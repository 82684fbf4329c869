//! Resolves template variables and renders previews.

use crate::catalog::ports::{CatalogRepositoryError, VariableCatalogRepository};
use crate::error::ErrorKind;
use crate::resolution::{
    domain::{
        Resolution, ResolutionRequest, ResolutionWarning, SampleContext, SourceRecords, render,
        resolve_from_records, resolve_from_sample,
    },
    ports::{DirectoryError, RecipientDirectory, SampleDataRepository, SampleDataRepositoryError},
};
use crate::template::{
    domain::{TemplateId, TemplateVariable, TemplateVersionId},
    ports::{TemplateRepository, TemplateRepositoryError},
    services::load_catalog_snapshot,
    validation::{TemplateValidationReport, ValidationLimits, VariableMapping, validate_template},
};
use crate::tenancy::OwnerId;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised while resolving variables.
///
/// Missing data is never an error; it shows up as missing variables and
/// warnings on the [`Resolution`].
#[derive(Debug, Error)]
pub enum ResolverError {
    /// The version is missing, belongs to another owner, or its template is
    /// archived.
    #[error("template version not found: {0}")]
    VersionNotFound(TemplateVersionId),
    /// The template is missing, archived, foreign, or has no active version.
    #[error("template not found: {0}")]
    TemplateNotFound(TemplateId),
    /// A draft preview failed validation.
    #[error("template validation failed: {0}")]
    Validation(TemplateValidationReport),
    /// Template lookup failed.
    #[error(transparent)]
    Templates(#[from] TemplateRepositoryError),
    /// Catalog lookup failed.
    #[error(transparent)]
    Catalog(#[from] CatalogRepositoryError),
    /// Recipient, owner, or agent lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    /// Sample set lookup failed.
    #[error(transparent)]
    Samples(#[from] SampleDataRepositoryError),
}

impl ResolverError {
    /// Returns the caller-facing category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::VersionNotFound(_) | Self::TemplateNotFound(_) => ErrorKind::NotFound,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Templates(_) | Self::Catalog(_) | Self::Directory(_) | Self::Samples(_) => {
                ErrorKind::Internal
            }
        }
    }
}

/// Result type for resolver operations.
pub type ResolverResult<T> = Result<T, ResolverError>;

/// Resolves variables for stored versions and unsaved drafts.
#[derive(Clone)]
pub struct VariableResolver<T, K, D, S>
where
    T: TemplateRepository,
    K: VariableCatalogRepository,
    D: RecipientDirectory,
    S: SampleDataRepository,
{
    templates: Arc<T>,
    catalog: Arc<K>,
    directory: Arc<D>,
    samples: Arc<S>,
    limits: ValidationLimits,
}

impl<T, K, D, S> VariableResolver<T, K, D, S>
where
    T: TemplateRepository,
    K: VariableCatalogRepository,
    D: RecipientDirectory,
    S: SampleDataRepository,
{
    /// Creates a resolver with default validation limits for drafts.
    #[must_use]
    pub fn new(templates: Arc<T>, catalog: Arc<K>, directory: Arc<D>, samples: Arc<S>) -> Self {
        Self {
            templates,
            catalog,
            directory,
            samples,
            limits: ValidationLimits::default(),
        }
    }

    /// Replaces the limits applied to draft previews.
    #[must_use]
    pub const fn with_limits(mut self, limits: ValidationLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Resolves every variable of a stored version.
    ///
    /// In recipient mode an unknown recipient does not fail the call: the
    /// result is degraded, carries the raw body, and has a single warning.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError::VersionNotFound`] when the version is
    /// missing, foreign, or belongs to an archived template, and an internal
    /// error when a lookup fails.
    pub async fn resolve_variables(
        &self,
        owner_id: OwnerId,
        version_id: TemplateVersionId,
        request: &ResolutionRequest,
    ) -> ResolverResult<Resolution> {
        let record = self
            .templates
            .find_version(version_id)
            .await?
            .filter(|record| {
                record.template.is_owned_by(owner_id) && !record.template.is_archived()
            })
            .ok_or(ResolverError::VersionNotFound(version_id))?;

        let version = &record.version;
        self.resolve(
            owner_id,
            Some(version_id),
            version.body(),
            version.variables(),
            request,
        )
        .await
    }

    /// Resolves the active version of an owned, live template.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError::TemplateNotFound`] when the template is
    /// missing, archived, foreign, or has no active version.
    pub async fn preview_template(
        &self,
        template_id: TemplateId,
        owner_id: OwnerId,
        request: &ResolutionRequest,
    ) -> ResolverResult<Resolution> {
        let detail = self
            .templates
            .find_by_id(template_id)
            .await?
            .filter(|detail| {
                detail.template().is_owned_by(owner_id) && !detail.template().is_archived()
            })
            .ok_or(ResolverError::TemplateNotFound(template_id))?;
        let version = detail
            .active_version()
            .ok_or(ResolverError::TemplateNotFound(template_id))?;

        self.resolve(
            owner_id,
            Some(version.id()),
            version.body(),
            version.variables(),
            request,
        )
        .await
    }

    /// Validates and renders a body that has not been saved.
    ///
    /// In sample mode, owner and agent variables are always read from the
    /// caller's own records first, so an author sees their real name and
    /// business in the preview.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError::Validation`] when the draft is invalid.
    pub async fn preview_draft(
        &self,
        owner_id: OwnerId,
        body: &str,
        mappings: &[VariableMapping],
        request: &ResolutionRequest,
    ) -> ResolverResult<Resolution> {
        let snapshot = load_catalog_snapshot(&*self.catalog, body, mappings).await?;
        let report = validate_template(body, mappings, &snapshot, &self.limits);
        if !report.is_valid() {
            return Err(ResolverError::Validation(report));
        }

        let effective = match request {
            ResolutionRequest::Sample(context) => ResolutionRequest::Sample(SampleContext {
                use_owner_profile: true,
                ..context.clone()
            }),
            recipient @ ResolutionRequest::Recipient { .. } => recipient.clone(),
        };
        self.resolve(owner_id, None, body, report.variables(), &effective)
            .await
    }

    async fn resolve(
        &self,
        owner_id: OwnerId,
        version_id: Option<TemplateVersionId>,
        body: &str,
        variables: &[TemplateVariable],
        request: &ResolutionRequest,
    ) -> ResolverResult<Resolution> {
        let resolution = match request {
            ResolutionRequest::Sample(context) => {
                self.resolve_sample(owner_id, version_id, body, variables, context)
                    .await?
            }
            ResolutionRequest::Recipient { recipient_id } => {
                let Some(recipient) = self
                    .directory
                    .find_recipient(owner_id, *recipient_id)
                    .await?
                else {
                    warn!(%owner_id, %recipient_id, "recipient not found; returning raw body");
                    return Ok(Resolution::degraded(
                        version_id,
                        body,
                        ResolutionWarning::new(
                            "recipient",
                            format!("recipient {recipient_id} not found"),
                        ),
                    ));
                };
                let owner = self.directory.find_owner_profile(owner_id).await?;
                let agent = self
                    .directory
                    .find_agent_config(owner_id, recipient.agent_id)
                    .await?;
                let records = SourceRecords {
                    recipient: Some(&recipient),
                    owner: owner.as_ref(),
                    agent: agent.as_ref(),
                };
                let resolved = variables
                    .iter()
                    .map(|variable| resolve_from_records(variable, &records))
                    .collect();
                render(version_id, body, resolved, Vec::new())
            }
        };

        debug!(
            %owner_id,
            variables = resolution.variables.len(),
            warnings = resolution.warnings.len(),
            "resolved template variables"
        );
        Ok(resolution)
    }

    async fn resolve_sample(
        &self,
        owner_id: OwnerId,
        version_id: Option<TemplateVersionId>,
        body: &str,
        variables: &[TemplateVariable],
        context: &SampleContext,
    ) -> ResolverResult<Resolution> {
        let mut warnings = Vec::new();
        let values = match (&context.values, context.sample_set_id) {
            (Some(values), _) => values.clone(),
            (None, Some(set_id)) => {
                let found = self.samples.find(owner_id, set_id).await?;
                if found.is_none() {
                    warnings.push(ResolutionWarning::new(
                        "sample_data_set",
                        format!("sample data set {set_id} not found; using catalog defaults"),
                    ));
                }
                found.map(|set| set.values().clone()).unwrap_or_default()
            }
            (None, None) => self
                .samples
                .find_default(owner_id)
                .await?
                .map(|set| set.values().clone())
                .unwrap_or_default(),
        };

        let (owner, agent) = if context.use_owner_profile {
            (
                self.directory.find_owner_profile(owner_id).await?,
                self.directory.find_agent_config(owner_id, None).await?,
            )
        } else {
            (None, None)
        };
        let caller_records = SourceRecords {
            recipient: None,
            owner: owner.as_ref(),
            agent: agent.as_ref(),
        };
        let profile = context.use_owner_profile.then_some(&caller_records);

        let resolved = variables
            .iter()
            .map(|variable| resolve_from_sample(variable, &values, profile))
            .collect();
        Ok(render(version_id, body, resolved, warnings))
    }
}
