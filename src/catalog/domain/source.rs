//! Source declarations: which record a variable reads and along which path.

use super::{CatalogDomainError, FieldSelector, ParseSourceTypeError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Record family a catalog variable is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// The message recipient (lead) record.
    Recipient,
    /// The operator profile that owns the template.
    Owner,
    /// The configuration of the agent sending on the owner's behalf.
    AgentConfig,
    /// A value derived from the recipient record.
    Computed,
}

impl SourceType {
    /// All source types in canonical listing order.
    pub const ALL: [Self; 4] = [Self::Recipient, Self::Owner, Self::AgentConfig, Self::Computed];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Recipient => "recipient",
            Self::Owner => "owner",
            Self::AgentConfig => "agent_config",
            Self::Computed => "computed",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SourceType {
    type Error = ParseSourceTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "recipient" | "lead" => Ok(Self::Recipient),
            "owner" | "consultant" => Ok(Self::Owner),
            "agent_config" => Ok(Self::AgentConfig),
            "computed" => Ok(Self::Computed),
            _ => Err(ParseSourceTypeError(value.to_owned())),
        }
    }
}

/// Syntactically valid dot-path such as `firstName` or `leadInfo.obiettivi`.
///
/// A path is only syntax. Whether it addresses a real field is decided by
/// [`FieldSelector::bind`], which the catalog service runs at authoring time
/// and the resolver runs again, defensively, at send time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SourcePath {
    segments: Vec<String>,
}

impl SourcePath {
    /// Parses a dot-path.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogDomainError::MalformedSourcePath`] when the path is
    /// blank, has an empty segment, or a segment contains characters outside
    /// `[A-Za-z0-9_]`.
    pub fn parse(value: &str) -> Result<Self, CatalogDomainError> {
        let trimmed = value.trim();
        let segments: Vec<String> = trimmed.split('.').map(str::to_owned).collect();
        let well_formed = !trimmed.is_empty()
            && segments.iter().all(|segment| {
                !segment.is_empty()
                    && segment
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '_')
            });

        if !well_formed {
            return Err(CatalogDomainError::MalformedSourcePath(value.to_owned()));
        }
        Ok(Self { segments })
    }

    /// Returns the path segments in order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns the leading segment, which names a top-level record field.
    #[must_use]
    pub fn head(&self) -> &str {
        self.segments.first().map_or("", String::as_str)
    }

    /// Returns the segments after the head, used to walk nested documents.
    #[must_use]
    pub fn tail(&self) -> &[String] {
        self.segments.get(1..).unwrap_or_default()
    }
}

impl fmt::Display for SourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl TryFrom<String> for SourcePath {
    type Error = CatalogDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SourcePath> for String {
    fn from(value: SourcePath) -> Self {
        value.to_string()
    }
}

/// A source type paired with a path into records of that type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceRef {
    source_type: SourceType,
    path: SourcePath,
}

impl SourceRef {
    /// Creates a source reference.
    #[must_use]
    pub const fn new(source_type: SourceType, path: SourcePath) -> Self {
        Self { source_type, path }
    }

    /// Returns the source record family.
    #[must_use]
    pub const fn source_type(&self) -> SourceType {
        self.source_type
    }

    /// Returns the dot-path into the source record.
    #[must_use]
    pub const fn path(&self) -> &SourcePath {
        &self.path
    }

    /// Binds the path to a typed field selector.
    ///
    /// Returns `None` when the path does not address a known field.
    #[must_use]
    pub fn selector(&self) -> Option<FieldSelector> {
        FieldSelector::bind(self.source_type, &self.path)
    }

    /// Returns `true` when [`Self::selector`] would succeed.
    #[must_use]
    pub fn is_resolvable(&self) -> bool {
        self.selector().is_some()
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source_type, self.path)
    }
}
