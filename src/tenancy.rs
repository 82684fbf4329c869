//! Owner and agent identities shared by every bounded context.
//!
//! Templates, sample data, credentials, and assignments are all scoped to an
//! operator (the owner). Agents are the messaging personas an owner runs;
//! assignments and agent configuration records are keyed by them.

use crate::identifier::uuid_identifier;

uuid_identifier! {
    /// Identifier of the operator who owns templates and related records.
    OwnerId
}

uuid_identifier! {
    /// Identifier of a messaging agent configured by an owner.
    AgentId
}
