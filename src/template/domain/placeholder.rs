//! `{key}` placeholder scanning and substitution.

use regex::{Captures, Regex};
use std::collections::HashSet;
use std::sync::LazyLock;

#[expect(clippy::expect_used, reason = "the pattern is a literal checked by tests")]
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("placeholder pattern compiles"));

/// Returns the distinct placeholder keys in `body`, in order of first
/// appearance.
#[must_use]
pub fn extract_placeholders(body: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    PLACEHOLDER
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|key| key.as_str())
        .filter(|key| seen.insert(*key))
        .map(str::to_owned)
        .collect()
}

/// Replaces every `{key}` occurrence for which `lookup` returns a value.
///
/// Placeholders without a value are left verbatim. Substituted values are not
/// rescanned, so a value that itself looks like a placeholder is inserted
/// literally.
pub fn substitute<F>(body: &str, mut lookup: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    PLACEHOLDER
        .replace_all(body, |caps: &Captures<'_>| {
            let key = caps.get(1).map_or("", |m| m.as_str());
            lookup(key).unwrap_or_else(|| caps.get(0).map_or_else(String::new, |m| m.as_str().to_owned()))
        })
        .into_owned()
}
