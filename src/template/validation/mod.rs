//! Pure validation pipeline for template bodies and variable mappings.
//!
//! The pipeline is a sequence of rule functions in [`rules`], composed by
//! [`validate_template`]. It never touches storage: callers load the catalog
//! entries the body mentions into a [`CatalogSnapshot`] first, so the whole
//! pipeline is testable without a database.

mod limits;
mod report;
pub mod rules;
mod snapshot;

pub use limits::ValidationLimits;
pub use report::{TemplateValidationReport, ValidationIssue, VariableMapping};
pub use snapshot::CatalogSnapshot;

use crate::template::domain::extract_placeholders;

/// Validates `body` against `mappings` and the catalog entries in `catalog`.
///
/// Every rule runs, so the report lists all problems at once. The report's
/// resolved variables are only populated when it is valid.
#[must_use]
pub fn validate_template(
    body: &str,
    mappings: &[VariableMapping],
    catalog: &CatalogSnapshot,
    limits: &ValidationLimits,
) -> TemplateValidationReport {
    let placeholders = extract_placeholders(body);
    let mut errors = Vec::new();

    errors.extend(rules::check_body(body, limits));
    errors.extend(rules::check_variable_count(mappings, limits));
    errors.extend(rules::check_keys(&placeholders, mappings));
    errors.extend(rules::check_duplicate_mappings(mappings));
    errors.extend(rules::check_symmetry(&placeholders, mappings));
    errors.extend(rules::check_catalog(&placeholders, catalog));
    errors.extend(rules::check_positions(mappings));

    if !errors.is_empty() {
        return TemplateValidationReport::invalid(errors);
    }
    TemplateValidationReport::valid(rules::bind_variables(mappings, catalog))
}
