//! Identifier types for the catalog domain.

use crate::identifier::uuid_identifier;

uuid_identifier! {
    /// Unique identifier for a variable catalog entry.
    CatalogEntryId
}
