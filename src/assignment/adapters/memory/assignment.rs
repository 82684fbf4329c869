//! In-memory assignment repository for tests and local runs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::assignment::{
    domain::TemplateAssignment,
    ports::{AssignmentRepository, AssignmentRepositoryError, AssignmentRepositoryResult},
};
use crate::template::domain::TemplateType;
use crate::tenancy::AgentId;

/// Thread-safe in-memory assignment repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssignmentRepository {
    assignments: Arc<RwLock<HashMap<(AgentId, TemplateType), TemplateAssignment>>>,
}

impl InMemoryAssignmentRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> AssignmentRepositoryError {
    AssignmentRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl AssignmentRepository for InMemoryAssignmentRepository {
    async fn upsert(&self, assignment: &TemplateAssignment) -> AssignmentRepositoryResult<()> {
        let mut assignments = self.assignments.write().map_err(lock_error)?;
        let key = (assignment.agent_id(), assignment.template_type());
        if assignments
            .get(&key)
            .is_some_and(|existing| existing.owner_id() != assignment.owner_id())
        {
            return Err(AssignmentRepositoryError::ForeignSlot {
                agent_id: assignment.agent_id(),
                template_type: assignment.template_type(),
            });
        }
        assignments.insert(key, assignment.clone());
        Ok(())
    }

    async fn find(
        &self,
        agent_id: AgentId,
        template_type: TemplateType,
    ) -> AssignmentRepositoryResult<Option<TemplateAssignment>> {
        let assignments = self.assignments.read().map_err(lock_error)?;
        Ok(assignments.get(&(agent_id, template_type)).cloned())
    }

    async fn remove(
        &self,
        agent_id: AgentId,
        template_type: TemplateType,
    ) -> AssignmentRepositoryResult<bool> {
        let mut assignments = self.assignments.write().map_err(lock_error)?;
        Ok(assignments.remove(&(agent_id, template_type)).is_some())
    }

    async fn list_by_agent(
        &self,
        agent_id: AgentId,
    ) -> AssignmentRepositoryResult<Vec<TemplateAssignment>> {
        let assignments = self.assignments.read().map_err(lock_error)?;
        let mut listed: Vec<TemplateAssignment> = assignments
            .values()
            .filter(|assignment| assignment.agent_id() == agent_id)
            .cloned()
            .collect();
        listed.sort_by_key(TemplateAssignment::template_type);
        Ok(listed)
    }
}
