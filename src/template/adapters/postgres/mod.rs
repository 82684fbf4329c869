//! `PostgreSQL` adapters for template persistence.

mod models;
mod repository;
pub(crate) mod schema;

pub use repository::{PostgresTemplateRepository, TemplatePgPool};
