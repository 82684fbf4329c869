//! Domain model for the variable catalog.
//!
//! Source declarations are kept declarative (a source type plus a dot-path)
//! but every path is bound to a typed field selector before it is used, so
//! resolution never walks arbitrary object graphs by string.

mod entry;
mod error;
mod field;
mod ids;
mod key;
mod seed;
mod source;

pub use entry::{CatalogEntryDraft, PersistedCatalogEntry, VariableCatalogEntry};
pub use error::{CatalogDomainError, ParseSourceTypeError};
pub use field::{AgentConfigField, ComputedField, FieldSelector, OwnerField, RecipientField, SourceField};
pub use ids::CatalogEntryId;
pub use key::VariableKey;
pub use seed::default_catalog;
pub use source::{SourcePath, SourceRef, SourceType};
