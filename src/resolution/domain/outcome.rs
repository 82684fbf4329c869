//! Resolution results.

use crate::catalog::domain::{SourceRef, VariableCatalogEntry, VariableKey};
use crate::template::domain::{Position, TemplateVersionId};
use serde::Serialize;

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableSource {
    /// A sample data value.
    Sample,
    /// The catalog's static fallback, in sample mode.
    Default,
    /// The caller's own profile or agent record, in sample mode.
    ProfileData,
    /// The primary path of the records loaded for a recipient.
    RecipientData,
    /// The catalog's secondary path.
    FallbackPath,
    /// The catalog's static fallback, in recipient mode.
    StaticFallback,
    /// Nothing matched; the value is the visible `{key}` placeholder.
    Placeholder,
}

impl VariableSource {
    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sample => "sample",
            Self::Default => "default",
            Self::ProfileData => "profile_data",
            Self::RecipientData => "recipient_data",
            Self::FallbackPath => "fallback_path",
            Self::StaticFallback => "static_fallback",
            Self::Placeholder => "placeholder",
        }
    }
}

/// Catalog details echoed next to each resolved value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogMeta {
    /// Human-readable name.
    pub display_name: String,
    /// Author-facing description.
    pub description: String,
    /// Primary source declaration.
    pub source: SourceRef,
}

impl From<&VariableCatalogEntry> for CatalogMeta {
    fn from(entry: &VariableCatalogEntry) -> Self {
        Self {
            display_name: entry.display_name().to_owned(),
            description: entry.description().to_owned(),
            source: entry.source().clone(),
        }
    }
}

/// One variable's resolved value and provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedVariable {
    /// Placeholder key.
    pub key: VariableKey,
    /// Mapped position.
    pub position: Position,
    /// Resolved value, or the `{key}` placeholder when missing.
    pub value: String,
    /// Provenance of the value.
    pub source: VariableSource,
    /// `true` exactly when no real value was found.
    pub missing: bool,
    /// Catalog details.
    pub catalog: CatalogMeta,
}

/// A problem a human reviewer should see before sending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionWarning {
    /// Variable key, or the name of the missing input.
    pub variable: String,
    /// Human-readable explanation.
    pub reason: String,
}

impl ResolutionWarning {
    /// Creates a warning.
    #[must_use]
    pub fn new(variable: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            reason: reason.into(),
        }
    }
}

/// Rendered text plus per-variable provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Resolved version; `None` for unsaved drafts.
    pub version_id: Option<TemplateVersionId>,
    /// Body before substitution.
    pub original_text: String,
    /// Body after substitution.
    pub rendered_text: String,
    /// Variables in position order.
    pub variables: Vec<ResolvedVariable>,
    /// One warning per missing variable, plus input problems.
    pub warnings: Vec<ResolutionWarning>,
    /// `true` when resolution aborted early and `rendered_text` is the raw
    /// body. Callers must not treat a degraded render as final.
    pub degraded: bool,
}

impl Resolution {
    /// Builds the early-abort result: the raw body and a single warning.
    #[must_use]
    pub fn degraded(
        version_id: Option<TemplateVersionId>,
        body: &str,
        warning: ResolutionWarning,
    ) -> Self {
        Self {
            version_id,
            original_text: body.to_owned(),
            rendered_text: body.to_owned(),
            variables: Vec::new(),
            warnings: vec![warning],
            degraded: true,
        }
    }

    /// Returns `true` when any variable fell back to its placeholder.
    #[must_use]
    pub fn has_missing(&self) -> bool {
        self.variables.iter().any(|variable| variable.missing)
    }

    /// Returns `true` when the render is complete and can be sent as is.
    #[must_use]
    pub fn is_final(&self) -> bool {
        !self.degraded && !self.has_missing()
    }
}
