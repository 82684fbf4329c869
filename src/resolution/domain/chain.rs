//! The precedence chain that turns a template variable into a value.
//!
//! Sample mode: caller profile (opt-in, owner and agent variables only),
//! then sample value, then static fallback, then placeholder.
//!
//! Recipient mode: primary path, then fallback path, then static fallback,
//! then placeholder.

use super::{
    Resolution, ResolutionWarning, ResolvedVariable, SourceRecords, VariableSource,
};
use crate::catalog::domain::SourceType;
use crate::template::domain::{TemplateVariable, TemplateVersionId, substitute};
use std::collections::BTreeMap;

/// Resolves a variable in sample mode.
///
/// When `profile` is given, owner and agent variables are read from those
/// records first, so previews show the caller's real name and business.
#[must_use]
pub fn resolve_from_sample(
    variable: &TemplateVariable,
    samples: &BTreeMap<String, String>,
    profile: Option<&SourceRecords<'_>>,
) -> ResolvedVariable {
    let entry = variable.entry();

    let from_profile = profile
        .filter(|_| matches!(entry.source_type(), SourceType::Owner | SourceType::AgentConfig))
        .and_then(|records| {
            records.lookup(entry.source()).or_else(|| {
                entry
                    .fallback_source()
                    .and_then(|fallback| records.lookup(fallback))
            })
        });
    if let Some(value) = from_profile {
        return resolved(variable, value, VariableSource::ProfileData);
    }

    let sample = samples
        .get(entry.key().as_str())
        .filter(|value| !value.trim().is_empty());
    if let Some(value) = sample {
        return resolved(variable, value.clone(), VariableSource::Sample);
    }

    match entry.fallback_value() {
        Some(value) => resolved(variable, value.to_owned(), VariableSource::Default),
        None => unresolved(variable),
    }
}

/// Resolves a variable in recipient mode.
#[must_use]
pub fn resolve_from_records(variable: &TemplateVariable, records: &SourceRecords<'_>) -> ResolvedVariable {
    let entry = variable.entry();

    if let Some(value) = records.lookup(entry.source()) {
        return resolved(variable, value, VariableSource::RecipientData);
    }
    if let Some(value) = entry
        .fallback_source()
        .and_then(|fallback| records.lookup(fallback))
    {
        return resolved(variable, value, VariableSource::FallbackPath);
    }
    match entry.fallback_value() {
        Some(value) => resolved(variable, value.to_owned(), VariableSource::StaticFallback),
        None => unresolved(variable),
    }
}

/// Substitutes resolved values into `body` and adds a warning per missing
/// variable.
#[must_use]
pub fn render(
    version_id: Option<TemplateVersionId>,
    body: &str,
    variables: Vec<ResolvedVariable>,
    mut warnings: Vec<ResolutionWarning>,
) -> Resolution {
    warnings.extend(variables.iter().filter(|variable| variable.missing).map(|variable| {
        ResolutionWarning::new(
            variable.key.as_str(),
            format!(
                "no value found for {}; rendered as {}",
                variable.key,
                variable.value
            ),
        )
    }));

    let rendered_text = substitute(body, |key| {
        variables
            .iter()
            .find(|variable| variable.key.as_str() == key)
            .map(|variable| variable.value.clone())
    });

    Resolution {
        version_id,
        original_text: body.to_owned(),
        rendered_text,
        variables,
        warnings,
        degraded: false,
    }
}

fn resolved(variable: &TemplateVariable, value: String, source: VariableSource) -> ResolvedVariable {
    let entry = variable.entry();
    ResolvedVariable {
        key: entry.key().clone(),
        position: variable.position(),
        value,
        source,
        missing: false,
        catalog: entry.into(),
    }
}

fn unresolved(variable: &TemplateVariable) -> ResolvedVariable {
    let entry = variable.entry();
    ResolvedVariable {
        key: entry.key().clone(),
        position: variable.position(),
        value: entry.key().placeholder(),
        source: VariableSource::Placeholder,
        missing: true,
        catalog: entry.into(),
    }
}
