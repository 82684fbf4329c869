//! `PostgreSQL` adapters for the variable catalog.

mod models;
mod repository;
pub(crate) mod schema;

pub(crate) use models::CatalogEntryRow;
pub(crate) use repository::row_to_entry;
pub use repository::{CatalogPgPool, PostgresVariableCatalog};
