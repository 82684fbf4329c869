//! Domain model for templates and their versions.

mod error;
mod ids;
mod kinds;
mod name;
mod placeholder;
mod projection;
mod template;
mod version;

pub use error::{ParseApprovalStatusError, ParseTemplateTypeError, TemplateDomainError};
pub use ids::{TemplateId, TemplateVersionId};
pub use kinds::{ApprovalStatus, TemplateType};
pub use name::TemplateName;
pub use placeholder::{extract_placeholders, substitute};
pub use projection::{
    ActiveVersionSummary, TemplateDetail, TemplateListFilter, TemplateSummary, VersionRecord,
};
pub use template::{PersistedTemplateData, Template};
pub use version::{
    ExternalSync, PersistedVersionData, Position, TemplateVariable, TemplateVersion,
    VersionNumber,
};
