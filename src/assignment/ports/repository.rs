//! Repository port for template assignments.

use crate::assignment::domain::TemplateAssignment;
use crate::template::domain::TemplateType;
use crate::tenancy::AgentId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for assignment repository operations.
pub type AssignmentRepositoryResult<T> = Result<T, AssignmentRepositoryError>;

/// Assignment persistence contract. At most one assignment exists per
/// `(agent, template type)`.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Inserts the assignment, or replaces the template of the existing one
    /// for the same agent and type.
    ///
    /// Fails with [`AssignmentRepositoryError::ForeignSlot`] when the
    /// existing assignment was made by a different owner.
    async fn upsert(&self, assignment: &TemplateAssignment) -> AssignmentRepositoryResult<()>;

    /// Finds the assignment for an agent and type.
    async fn find(
        &self,
        agent_id: AgentId,
        template_type: TemplateType,
    ) -> AssignmentRepositoryResult<Option<TemplateAssignment>>;

    /// Removes the assignment for an agent and type. Returns `false` when
    /// none existed.
    async fn remove(
        &self,
        agent_id: AgentId,
        template_type: TemplateType,
    ) -> AssignmentRepositoryResult<bool>;

    /// Lists an agent's assignments.
    async fn list_by_agent(
        &self,
        agent_id: AgentId,
    ) -> AssignmentRepositoryResult<Vec<TemplateAssignment>>;
}

/// Errors returned by assignment repository implementations.
#[derive(Debug, Clone, Error)]
pub enum AssignmentRepositoryError {
    /// The slot is already held by a different owner.
    #[error("slot {template_type} of agent {agent_id} belongs to another owner")]
    ForeignSlot {
        /// Agent whose slot was targeted.
        agent_id: AgentId,
        /// Slot type.
        template_type: TemplateType,
    },

    /// Stored data could not be converted into a valid assignment.
    #[error("invalid persisted assignment data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AssignmentRepositoryError {
    /// Wraps invalid persisted data.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<diesel::result::Error> for AssignmentRepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        Self::persistence(err)
    }
}
