//! Individual validation rules.
//!
//! Each rule is a pure function over the body's placeholders and the
//! author's mappings, returning the issues it found.

use super::{CatalogSnapshot, ValidationIssue, ValidationLimits, VariableMapping};
use crate::catalog::domain::VariableKey;
use crate::template::domain::{Position, TemplateVariable};
use std::collections::{BTreeMap, HashSet};

/// Rejects blank and overlong bodies.
#[must_use]
pub fn check_body(body: &str, limits: &ValidationLimits) -> Option<ValidationIssue> {
    if body.trim().is_empty() {
        return Some(ValidationIssue::EmptyBody);
    }
    let actual = body.chars().count();
    (actual > limits.max_body_len).then_some(ValidationIssue::BodyTooLong {
        max: limits.max_body_len,
        actual,
    })
}

/// Rejects more mappings than the registry accepts.
#[must_use]
pub fn check_variable_count(
    mappings: &[VariableMapping],
    limits: &ValidationLimits,
) -> Option<ValidationIssue> {
    (mappings.len() > limits.max_variables).then_some(ValidationIssue::TooManyVariables {
        max: limits.max_variables,
        actual: mappings.len(),
    })
}

/// Reports placeholder and mapping keys that are not valid variable keys.
#[must_use]
pub fn check_keys(placeholders: &[String], mappings: &[VariableMapping]) -> Vec<ValidationIssue> {
    let mut seen = HashSet::new();
    placeholders
        .iter()
        .map(String::as_str)
        .chain(mappings.iter().map(|mapping| mapping.key.as_str()))
        .filter(|key| VariableKey::new(*key).is_err())
        .filter(|key| seen.insert(*key))
        .map(|key| ValidationIssue::InvalidVariableKey {
            key: key.to_owned(),
        })
        .collect()
}

/// Reports keys mapped at more than one position.
#[must_use]
pub fn check_duplicate_mappings(mappings: &[VariableMapping]) -> Vec<ValidationIssue> {
    let mut order: Vec<&str> = Vec::new();
    let mut positions: BTreeMap<&str, Vec<u32>> = BTreeMap::new();
    for mapping in mappings {
        let key = mapping.key.trim();
        let slot = positions.entry(key).or_default();
        if slot.is_empty() {
            order.push(key);
        }
        slot.push(mapping.position);
    }

    order
        .into_iter()
        .filter_map(|key| {
            positions
                .remove(key)
                .filter(|found| found.len() > 1)
                .map(|found| ValidationIssue::DuplicateMapping {
                    key: key.to_owned(),
                    positions: found,
                })
        })
        .collect()
}

/// Reports the symmetric difference between placeholders and mapped keys.
#[must_use]
pub fn check_symmetry(placeholders: &[String], mappings: &[VariableMapping]) -> Vec<ValidationIssue> {
    let mapped: HashSet<&str> = mappings.iter().map(|mapping| mapping.key.trim()).collect();
    let written: HashSet<&str> = placeholders.iter().map(String::as_str).collect();

    let unmapped: Vec<String> = placeholders
        .iter()
        .filter(|key| !mapped.contains(key.as_str()))
        .cloned()
        .collect();

    let mut reported = HashSet::new();
    let unused: Vec<String> = mappings
        .iter()
        .map(|mapping| mapping.key.trim())
        .filter(|key| !written.contains(key))
        .filter(|key| reported.insert(*key))
        .map(str::to_owned)
        .collect();

    let mut issues = Vec::new();
    if !unmapped.is_empty() {
        issues.push(ValidationIssue::UnmappedPlaceholders { keys: unmapped });
    }
    if !unused.is_empty() {
        issues.push(ValidationIssue::UnusedMappings { keys: unused });
    }
    issues
}

/// Reports placeholders that name no catalog entry.
///
/// Malformed keys are skipped here; [`check_keys`] reports them.
#[must_use]
pub fn check_catalog(placeholders: &[String], catalog: &CatalogSnapshot) -> Option<ValidationIssue> {
    let unknown: Vec<String> = placeholders
        .iter()
        .filter(|key| VariableKey::new(key.as_str()).is_ok())
        .filter(|key| catalog.get_raw(key).is_none())
        .cloned()
        .collect();
    (!unknown.is_empty()).then_some(ValidationIssue::UnknownVariables { keys: unknown })
}

/// Checks that sorted positions are exactly `1..N`.
///
/// Reports the first mismatch only: either a repeated position or the
/// expected value next to the one actually found.
#[must_use]
pub fn check_positions(mappings: &[VariableMapping]) -> Option<ValidationIssue> {
    let mut sorted: Vec<u32> = mappings.iter().map(|mapping| mapping.position).collect();
    sorted.sort_unstable();

    let mut previous: Option<u32> = None;
    for (expected, found) in (1_u32..).zip(sorted) {
        if found != expected {
            if previous == Some(found) {
                return Some(ValidationIssue::DuplicatePosition { position: found });
            }
            return Some(ValidationIssue::PositionGap { expected, found });
        }
        previous = Some(found);
    }
    None
}

/// Binds each mapping to its catalog entry, ordered by position.
///
/// Mappings with an invalid position or an unknown key are dropped, so this
/// is only meaningful once every other rule has passed.
#[must_use]
pub fn bind_variables(mappings: &[VariableMapping], catalog: &CatalogSnapshot) -> Vec<TemplateVariable> {
    let mut variables: Vec<TemplateVariable> = mappings
        .iter()
        .filter_map(|mapping| {
            let position = Position::new(mapping.position).ok()?;
            let entry = catalog.get_raw(mapping.key.trim())?;
            Some(TemplateVariable::new(position, entry.clone()))
        })
        .collect();
    variables.sort_by_key(TemplateVariable::position);
    variables
}
