//! In-memory catalog adapters.

mod catalog;

pub use catalog::InMemoryVariableCatalog;
