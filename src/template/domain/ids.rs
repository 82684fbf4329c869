//! Identifier types for templates and versions.

use crate::identifier::uuid_identifier;

uuid_identifier! {
    /// Unique identifier for a template.
    TemplateId
}

uuid_identifier! {
    /// Unique identifier for a template version.
    TemplateVersionId
}
