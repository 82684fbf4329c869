//! Port contracts for the variable catalog.

pub mod repository;

pub use repository::{CatalogRepositoryError, CatalogRepositoryResult, VariableCatalogRepository};
