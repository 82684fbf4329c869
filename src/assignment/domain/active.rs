//! Result of an assignment lookup.

use crate::template::domain::{Template, TemplateVersion};
use serde::Serialize;
use std::fmt;

/// Why a lookup found nothing usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoAssignmentReason {
    /// No assignment exists for the agent and type.
    NotAssigned,
    /// The assigned template no longer exists.
    TemplateMissing,
    /// The assigned template belongs to someone other than the assigner.
    OwnerMismatch,
    /// The assigned template is archived.
    TemplateArchived,
    /// The assigned template has no active version.
    NoActiveVersion,
}

impl NoAssignmentReason {
    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotAssigned => "not_assigned",
            Self::TemplateMissing => "template_missing",
            Self::OwnerMismatch => "owner_mismatch",
            Self::TemplateArchived => "template_archived",
            Self::NoActiveVersion => "no_active_version",
        }
    }
}

impl fmt::Display for NoAssignmentReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The template an agent should send for a slot, or why the built-in default
/// applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveTemplate {
    /// A usable template and its active version.
    Assigned {
        /// Assigned template.
        template: Box<Template>,
        /// Its active version.
        version: Box<TemplateVersion>,
    },
    /// Fall back to the built-in default.
    NoAssignment(NoAssignmentReason),
}

impl ActiveTemplate {
    /// Returns the active version when one is assigned.
    #[must_use]
    pub fn version(&self) -> Option<&TemplateVersion> {
        match self {
            Self::Assigned { version, .. } => Some(version.as_ref()),
            Self::NoAssignment(_) => None,
        }
    }

    /// Returns `true` when the caller must use its default template.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::NoAssignment(_))
    }
}
