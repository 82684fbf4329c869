//! Named-to-positional placeholder conversion.

use crate::template::domain::{TemplateVariable, substitute};
use serde::Serialize;
use std::collections::BTreeMap;

/// A body in the registry's `{{n}}` convention plus its variable
/// descriptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalBody {
    /// Body with every mapped `{key}` replaced by `{{position}}`.
    pub body: String,
    /// Position to catalog display name.
    pub variable_descriptions: BTreeMap<u32, String>,
}

/// Rewrites `{key}` placeholders as positional `{{n}}` tokens.
///
/// Every occurrence of a mapped key is replaced. Text that is not a mapped
/// placeholder is left untouched.
///
/// # Examples
///
///     use missive::catalog::domain::{CatalogEntryDraft, SourceType};
///     use missive::export::domain::convert_to_external_format;
///     use missive::template::domain::{Position, TemplateVariable};
///     use mockable::DefaultClock;
///
///     let entry = CatalogEntryDraft::new("firstName", "First name", SourceType::Recipient, "firstName")
///         .build(&DefaultClock)
///         .expect("valid");
///     let variables = [TemplateVariable::new(Position::new(1).expect("valid"), entry)];
///
///     let converted = convert_to_external_format("Ciao {firstName}!", &variables);
///     assert_eq!(converted.body, "Ciao {{1}}!");
///     assert_eq!(converted.variable_descriptions[&1], "First name");
#[must_use]
pub fn convert_to_external_format(body: &str, variables: &[TemplateVariable]) -> ExternalBody {
    let converted = substitute(body, |key| {
        variables
            .iter()
            .find(|variable| variable.entry().key().as_str() == key)
            .map(|variable| format!("{{{{{}}}}}", variable.position()))
    });
    let variable_descriptions = variables
        .iter()
        .map(|variable| {
            (
                variable.position().value(),
                variable.entry().display_name().to_owned(),
            )
        })
        .collect();

    ExternalBody {
        body: converted,
        variable_descriptions,
    }
}
