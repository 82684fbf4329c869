//! Port contracts for template persistence.

pub mod repository;

pub use repository::{TemplateRepository, TemplateRepositoryError, TemplateRepositoryResult};
