//! Export payloads and results.

use super::FriendlyName;
use crate::template::domain::{ApprovalStatus, TemplateId, TemplateVersionId, VersionNumber};
use serde::Serialize;
use std::collections::BTreeMap;

/// Content submitted to the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentSubmission {
    /// Registry name.
    pub friendly_name: FriendlyName,
    /// Content language code.
    pub language: String,
    /// Body in `{{n}}` form.
    pub body: String,
    /// Position to description.
    pub variable_descriptions: BTreeMap<u32, String>,
}

/// Result of exporting one version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportOutcome {
    /// Exported template.
    pub template_id: TemplateId,
    /// Exported version.
    pub version_id: TemplateVersionId,
    /// Exported version number.
    pub version_number: VersionNumber,
    /// Identifier assigned by the registry.
    pub content_id: String,
    /// Name the content was registered under.
    pub friendly_name: FriendlyName,
    /// Persisted approval status.
    pub approval_status: ApprovalStatus,
    /// Human-readable summary.
    pub message: String,
}

/// One version whose status was refreshed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncedVersion {
    /// Refreshed version.
    pub version_id: TemplateVersionId,
    /// Status before the refresh.
    pub previous: ApprovalStatus,
    /// Status after the refresh.
    pub current: ApprovalStatus,
}

/// One version whose status could not be refreshed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncFailure {
    /// Version that failed.
    pub version_id: TemplateVersionId,
    /// Why it failed.
    pub reason: String,
}

/// Per-version result of an approval status sync.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SyncReport {
    /// Versions refreshed.
    pub updated: Vec<SyncedVersion>,
    /// Versions that could not be refreshed.
    pub failures: Vec<SyncFailure>,
}

impl SyncReport {
    /// Returns the number of versions whose status changed.
    #[must_use]
    pub fn changed(&self) -> usize {
        self.updated
            .iter()
            .filter(|version| version.previous != version.current)
            .count()
    }
}
