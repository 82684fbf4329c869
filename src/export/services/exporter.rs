//! Pushes template versions to the external registry and tracks approval.

use crate::error::ErrorKind;
use crate::export::{
    ContentApiConfig,
    domain::{
        ContentCredentials, ContentSubmission, CredentialsId, ExportOutcome, FriendlyName,
        SyncFailure, SyncReport, SyncedVersion, convert_to_external_format, map_external_status,
    },
    ports::{ContentRegistry, CredentialStore, CredentialStoreError, RegistryError},
};
use crate::template::{
    domain::{ApprovalStatus, ExternalSync, TemplateId},
    ports::{TemplateRepository, TemplateRepositoryError},
};
use crate::tenancy::OwnerId;
use mockable::Clock;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Why the registry refused an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFailureKind {
    /// The credentials were rejected.
    BadCredentials,
    /// The account is unknown to the registry.
    UnknownAccount,
    /// The friendly name is already registered.
    DuplicateName,
    /// The registry did not answer in time.
    Timeout,
    /// Anything else.
    Other,
}

impl ExportFailureKind {
    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BadCredentials => "bad_credentials",
            Self::UnknownAccount => "unknown_account",
            Self::DuplicateName => "duplicate_name",
            Self::Timeout => "timeout",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ExportFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registry call that failed, classified by cause.
#[derive(Debug, Clone, Error)]
#[error("export failed ({kind}): {reason}")]
pub struct ExportFailure {
    kind: ExportFailureKind,
    reason: String,
}

impl ExportFailure {
    fn timeout(limit: Duration) -> Self {
        Self {
            kind: ExportFailureKind::Timeout,
            reason: format!("no response within {}ms", limit.as_millis()),
        }
    }

    /// Returns the failure category.
    #[must_use]
    pub const fn kind(&self) -> ExportFailureKind {
        self.kind
    }

    /// Returns the registry's explanation.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl From<RegistryError> for ExportFailure {
    fn from(err: RegistryError) -> Self {
        let kind = match &err {
            RegistryError::Unauthorized => ExportFailureKind::BadCredentials,
            RegistryError::NotFound(_) => ExportFailureKind::UnknownAccount,
            RegistryError::DuplicateName(_) => ExportFailureKind::DuplicateName,
            RegistryError::Rejected { .. } | RegistryError::Transport(_) => {
                ExportFailureKind::Other
            }
        };
        Self {
            kind,
            reason: err.to_string(),
        }
    }
}

/// Service-level errors for export operations.
#[derive(Debug, Error)]
pub enum ExportServiceError {
    /// The template is missing, archived, foreign, or has no active version.
    #[error("template not found: {0}")]
    NotFound(TemplateId),
    /// The named credentials are missing, inactive, or foreign.
    #[error("credentials not found: {0}")]
    CredentialsNotFound(CredentialsId),
    /// The owner has no active credentials.
    #[error("no active registry credentials configured for owner {0}")]
    NoCredentials(OwnerId),
    /// The registry refused the export.
    #[error(transparent)]
    Export(#[from] ExportFailure),
    /// Template persistence failed.
    #[error(transparent)]
    Templates(#[from] TemplateRepositoryError),
    /// Credential lookup failed.
    #[error(transparent)]
    Credentials(#[from] CredentialStoreError),
}

impl ExportServiceError {
    /// Returns the caller-facing category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) | Self::CredentialsNotFound(_) => ErrorKind::NotFound,
            Self::NoCredentials(_) => ErrorKind::Configuration,
            Self::Export(failure) => match failure.kind() {
                ExportFailureKind::DuplicateName => ErrorKind::Conflict,
                ExportFailureKind::BadCredentials
                | ExportFailureKind::UnknownAccount
                | ExportFailureKind::Timeout
                | ExportFailureKind::Other => ErrorKind::Export,
            },
            Self::Templates(_) | Self::Credentials(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for export operations.
pub type ExportServiceResult<T> = Result<T, ExportServiceError>;

/// Exports versions and refreshes their approval status.
///
/// Registry calls are bounded by [`ContentApiConfig::request_timeout`] and no
/// lock is held while they run; the outcome is persisted afterwards in a
/// separate write.
#[derive(Clone)]
pub struct TemplateExportService<T, S, R, C>
where
    T: TemplateRepository,
    S: CredentialStore,
    R: ContentRegistry,
    C: Clock + Send + Sync,
{
    templates: Arc<T>,
    credentials: Arc<S>,
    registry: Arc<R>,
    clock: Arc<C>,
    config: ContentApiConfig,
}

impl<T, S, R, C> TemplateExportService<T, S, R, C>
where
    T: TemplateRepository,
    S: CredentialStore,
    R: ContentRegistry,
    C: Clock + Send + Sync,
{
    /// Creates a new export service.
    #[must_use]
    pub const fn new(
        templates: Arc<T>,
        credentials: Arc<S>,
        registry: Arc<R>,
        clock: Arc<C>,
        config: ContentApiConfig,
    ) -> Self {
        Self {
            templates,
            credentials,
            registry,
            clock,
            config,
        }
    }

    /// Exports the active version of a template and submits it for approval.
    ///
    /// When content creation succeeds but the approval call fails, the
    /// version is stored as [`ApprovalStatus::Draft`] and the call still
    /// succeeds: the content exists externally and approval can be retried.
    ///
    /// # Errors
    ///
    /// Returns [`ExportServiceError::NotFound`] for a missing, archived, or
    /// foreign template; [`ExportServiceError::CredentialsNotFound`] or
    /// [`ExportServiceError::NoCredentials`] when no usable credentials
    /// exist; and [`ExportServiceError::Export`] when content creation
    /// fails.
    pub async fn export_version(
        &self,
        template_id: TemplateId,
        owner_id: OwnerId,
        credentials_id: Option<CredentialsId>,
    ) -> ExportServiceResult<ExportOutcome> {
        let detail = self
            .templates
            .find_by_id(template_id)
            .await?
            .filter(|detail| {
                detail.template().is_owned_by(owner_id) && !detail.template().is_archived()
            })
            .ok_or(ExportServiceError::NotFound(template_id))?;
        let version = detail
            .active_version()
            .ok_or(ExportServiceError::NotFound(template_id))?;

        let credentials = self.resolve_credentials(owner_id, credentials_id).await?;
        let converted = convert_to_external_format(version.body(), version.variables());
        let friendly_name = FriendlyName::for_version(
            detail.template().name().as_str(),
            version.version_number(),
            self.config.friendly_name_max_len,
        );
        let submission = ContentSubmission {
            friendly_name: friendly_name.clone(),
            language: self.config.language.clone(),
            body: converted.body,
            variable_descriptions: converted.variable_descriptions,
        };

        let content_id = self
            .bounded(self.registry.create_content(&credentials, &submission))
            .await?;

        let approval = self
            .bounded(self.registry.submit_for_approval(
                &credentials,
                &content_id,
                &friendly_name,
                &self.config.approval_category,
            ))
            .await;
        let (approval_status, message) = match approval {
            Ok(status) => {
                let mapped = map_external_status(&status);
                (mapped, format!("exported as {friendly_name}; approval status {mapped}"))
            }
            Err(failure) => {
                warn!(
                    %template_id,
                    %content_id,
                    error = %failure,
                    "content created but approval submission failed; stored as draft"
                );
                (
                    ApprovalStatus::Draft,
                    format!(
                        "exported as {friendly_name}; approval submission failed ({}), retry later",
                        failure.reason()
                    ),
                )
            }
        };

        let sync = ExternalSync::new(
            Some(content_id.clone()),
            approval_status,
            Some(self.clock.utc()),
        );
        self.templates.record_sync(version.id(), &sync).await?;

        info!(
            %template_id,
            version_number = %version.version_number(),
            %content_id,
            %friendly_name,
            status = %approval_status,
            "exported template version"
        );
        Ok(ExportOutcome {
            template_id,
            version_id: version.id(),
            version_number: version.version_number(),
            content_id,
            friendly_name,
            approval_status,
            message,
        })
    }

    /// Refreshes the approval status of every exported version the owner
    /// has.
    ///
    /// Registry failures for one version are recorded in the report and do
    /// not stop the others.
    ///
    /// # Errors
    ///
    /// Returns credential errors as for [`Self::export_version`], and
    /// [`ExportServiceError::Templates`] when persistence fails.
    pub async fn sync_approval_statuses(
        &self,
        owner_id: OwnerId,
        credentials_id: Option<CredentialsId>,
    ) -> ExportServiceResult<SyncReport> {
        let credentials = self.resolve_credentials(owner_id, credentials_id).await?;
        let mut report = SyncReport::default();

        for record in self.templates.list_synced_versions(owner_id).await? {
            let version = &record.version;
            let Some(content_id) = version.sync().content_id() else {
                continue;
            };
            match self
                .bounded(self.registry.fetch_approval_status(&credentials, content_id))
                .await
            {
                Ok(status) => {
                    let current = map_external_status(&status);
                    let sync = ExternalSync::new(
                        Some(content_id.to_owned()),
                        current,
                        Some(self.clock.utc()),
                    );
                    self.templates.record_sync(version.id(), &sync).await?;
                    report.updated.push(SyncedVersion {
                        version_id: version.id(),
                        previous: version.sync().approval_status(),
                        current,
                    });
                }
                Err(failure) => {
                    warn!(
                        version_id = %version.id(),
                        error = %failure,
                        "approval status refresh failed"
                    );
                    report.failures.push(SyncFailure {
                        version_id: version.id(),
                        reason: failure.to_string(),
                    });
                }
            }
        }

        info!(
            %owner_id,
            refreshed = report.updated.len(),
            changed = report.changed(),
            failed = report.failures.len(),
            "synced approval statuses"
        );
        Ok(report)
    }

    async fn resolve_credentials(
        &self,
        owner_id: OwnerId,
        credentials_id: Option<CredentialsId>,
    ) -> ExportServiceResult<ContentCredentials> {
        match credentials_id {
            Some(id) => self
                .credentials
                .find_active(owner_id, id)
                .await?
                .ok_or(ExportServiceError::CredentialsNotFound(id)),
            None => self
                .credentials
                .find_first_active(owner_id)
                .await?
                .ok_or(ExportServiceError::NoCredentials(owner_id)),
        }
    }

    async fn bounded<V>(
        &self,
        call: impl Future<Output = Result<V, RegistryError>>,
    ) -> Result<V, ExportFailure> {
        let limit = self.config.request_timeout;
        match tokio::time::timeout(limit, call).await {
            Ok(result) => result.map_err(ExportFailure::from),
            Err(_) => Err(ExportFailure::timeout(limit)),
        }
    }
}
