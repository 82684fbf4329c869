//! Application services for the variable catalog.

mod registry;

pub use registry::{CatalogServiceError, CatalogServiceResult, VariableCatalogService};
