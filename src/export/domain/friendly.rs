//! Deterministic registry names for exported versions.

use crate::template::domain::VersionNumber;
use serde::Serialize;
use std::fmt;

const EMPTY_NAME_TOKEN: &str = "template";

/// Registry-safe name: `[a-z0-9_]`, derived from the template name and
/// suffixed with the version number.
///
/// The suffix makes every version's name distinct, so exporting a new
/// version never collides with an earlier export.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FriendlyName(String);

impl FriendlyName {
    /// Builds the name for one version of a template.
    ///
    /// Characters outside `[a-z0-9]` become `_`, runs of `_` collapse, and
    /// leading or trailing `_` are dropped. The sanitised stem is capped at
    /// `max_len` characters; an empty stem becomes `template`.
    ///
    /// # Examples
    ///
    ///     use missive::export::domain::FriendlyName;
    ///     use missive::template::domain::VersionNumber;
    ///
    ///     let name = FriendlyName::for_version("Primo Contatto!!", VersionNumber::FIRST, 64);
    ///     assert_eq!(name.as_str(), "primo_contatto_v1");
    #[must_use]
    pub fn for_version(template_name: &str, version: VersionNumber, max_len: usize) -> Self {
        let mut stem = String::with_capacity(template_name.len());
        for ch in template_name.chars().flat_map(char::to_lowercase) {
            if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
                stem.push(ch);
            } else if !stem.is_empty() && !stem.ends_with('_') {
                stem.push('_');
            }
        }
        let capped: String = stem.chars().take(max_len).collect();
        let trimmed = capped.trim_end_matches('_');
        let base = if trimmed.is_empty() {
            EMPTY_NAME_TOKEN
        } else {
            trimmed
        };
        Self(format!("{base}_v{version}"))
    }

    /// Returns the name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for FriendlyName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FriendlyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
