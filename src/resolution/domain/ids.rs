//! Identifier types for resolution inputs.

use crate::identifier::uuid_identifier;

uuid_identifier! {
    /// Identifier of a message recipient (lead).
    RecipientId
}

uuid_identifier! {
    /// Identifier of a named sample data set.
    SampleDataSetId
}
