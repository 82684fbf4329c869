//! Read-only access to recipient, owner, and agent records.

use crate::resolution::domain::{AgentConfig, OwnerProfile, RecipientId, RecipientRecord};
use crate::tenancy::{AgentId, OwnerId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for directory lookups.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Source of the records the resolver reads.
///
/// Every lookup is scoped to an owner; records belonging to someone else are
/// reported as absent.
#[async_trait]
pub trait RecipientDirectory: Send + Sync {
    /// Finds a recipient owned by `owner_id`.
    async fn find_recipient(
        &self,
        owner_id: OwnerId,
        recipient_id: RecipientId,
    ) -> DirectoryResult<Option<RecipientRecord>>;

    /// Finds the owner's profile.
    async fn find_owner_profile(&self, owner_id: OwnerId) -> DirectoryResult<Option<OwnerProfile>>;

    /// Finds an agent configuration owned by `owner_id`.
    ///
    /// With no `agent_id`, returns the owner's first configured agent.
    async fn find_agent_config(
        &self,
        owner_id: OwnerId,
        agent_id: Option<AgentId>,
    ) -> DirectoryResult<Option<AgentConfig>>;
}

/// Errors returned by directory implementations.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    /// The backing store could not be reached or read.
    #[error("recipient directory unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl DirectoryError {
    /// Wraps a backing-store error.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
