//! Read models returned by template queries.

use super::{
    ApprovalStatus, Template, TemplateType, TemplateVersion, TemplateVersionId, VersionNumber,
};
use serde::{Deserialize, Serialize};

/// A template with its full version history, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDetail {
    template: Template,
    versions: Vec<TemplateVersion>,
}

impl TemplateDetail {
    /// Assembles a detail view, ordering versions newest first.
    #[must_use]
    pub fn new(template: Template, mut versions: Vec<TemplateVersion>) -> Self {
        versions.sort_by(|left, right| right.version_number().cmp(&left.version_number()));
        Self { template, versions }
    }

    /// Returns the template.
    #[must_use]
    pub const fn template(&self) -> &Template {
        &self.template
    }

    /// Returns every version, newest first.
    #[must_use]
    pub fn versions(&self) -> &[TemplateVersion] {
        &self.versions
    }

    /// Returns the active version, if any.
    #[must_use]
    pub fn active_version(&self) -> Option<&TemplateVersion> {
        self.versions.iter().find(|version| version.is_active())
    }

    /// Returns the version with the given number.
    #[must_use]
    pub fn version(&self, number: VersionNumber) -> Option<&TemplateVersion> {
        self.versions
            .iter()
            .find(|version| version.version_number() == number)
    }

    /// Returns the highest version number present.
    #[must_use]
    pub fn latest_version_number(&self) -> Option<VersionNumber> {
        self.versions.first().map(TemplateVersion::version_number)
    }

    /// Splits the view into its parts.
    #[must_use]
    pub fn into_parts(self) -> (Template, Vec<TemplateVersion>) {
        (self.template, self.versions)
    }
}

/// Compact view of a template's active version for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveVersionSummary {
    /// Version identifier.
    pub id: TemplateVersionId,
    /// Version number.
    pub version_number: VersionNumber,
    /// Raw body text.
    pub body: String,
    /// External approval status.
    pub approval_status: ApprovalStatus,
    /// Number of mapped variables.
    pub variable_count: usize,
}

impl From<&TemplateVersion> for ActiveVersionSummary {
    fn from(version: &TemplateVersion) -> Self {
        Self {
            id: version.id(),
            version_number: version.version_number(),
            body: version.body().to_owned(),
            approval_status: version.sync().approval_status(),
            variable_count: version.variables().len(),
        }
    }
}

/// Listing row: a template and its active version summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSummary {
    /// The template.
    pub template: Template,
    /// Summary of the active version; `None` only for corrupt data.
    pub active_version: Option<ActiveVersionSummary>,
}

/// Optional filters for template listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TemplateListFilter {
    /// Restrict to one sequence slot.
    pub template_type: Option<TemplateType>,
}

impl TemplateListFilter {
    /// Matches every non-archived template.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            template_type: None,
        }
    }

    /// Matches templates of `template_type`.
    #[must_use]
    pub const fn of_type(template_type: TemplateType) -> Self {
        Self {
            template_type: Some(template_type),
        }
    }

    /// Returns `true` when `template` passes the filter.
    #[must_use]
    pub fn matches(&self, template: &Template) -> bool {
        self.template_type
            .is_none_or(|template_type| template.template_type() == template_type)
    }
}

/// A version together with the template it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    /// The owning template.
    pub template: Template,
    /// The version.
    pub version: TemplateVersion,
}
