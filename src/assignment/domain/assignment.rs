//! The assignment aggregate.

use crate::identifier::uuid_identifier;
use crate::template::domain::{TemplateId, TemplateType};
use crate::tenancy::{AgentId, OwnerId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

uuid_identifier! {
    /// Identifier of a template assignment.
    AssignmentId
}

/// The template an agent uses for one template type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateAssignment {
    id: AssignmentId,
    owner_id: OwnerId,
    agent_id: AgentId,
    template_type: TemplateType,
    template_id: TemplateId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing persisted assignments.
#[derive(Debug, Clone)]
pub struct PersistedAssignmentData {
    /// Assignment identifier.
    pub id: AssignmentId,
    /// Owner who made the assignment.
    pub owner_id: OwnerId,
    /// Assigned agent.
    pub agent_id: AgentId,
    /// Sequence slot.
    pub template_type: TemplateType,
    /// Assigned template.
    pub template_id: TemplateId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last reassignment timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TemplateAssignment {
    /// Creates a new assignment.
    #[must_use]
    pub fn new(
        owner_id: OwnerId,
        agent_id: AgentId,
        template_type: TemplateType,
        template_id: TemplateId,
        clock: &impl Clock,
    ) -> Self {
        let now = clock.utc();
        Self {
            id: AssignmentId::new(),
            owner_id,
            agent_id,
            template_type,
            template_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstructs an assignment from storage.
    #[must_use]
    pub fn from_persisted(data: PersistedAssignmentData) -> Self {
        Self {
            id: data.id,
            owner_id: data.owner_id,
            agent_id: data.agent_id,
            template_type: data.template_type,
            template_id: data.template_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Points the assignment at another template.
    pub fn reassign(&mut self, template_id: TemplateId, clock: &impl Clock) {
        self.template_id = template_id;
        self.updated_at = clock.utc();
    }

    /// Returns the assignment identifier.
    #[must_use]
    pub const fn id(&self) -> AssignmentId {
        self.id
    }

    /// Returns the owner who made the assignment.
    #[must_use]
    pub const fn owner_id(&self) -> OwnerId {
        self.owner_id
    }

    /// Returns the assigned agent.
    #[must_use]
    pub const fn agent_id(&self) -> AgentId {
        self.agent_id
    }

    /// Returns the sequence slot.
    #[must_use]
    pub const fn template_type(&self) -> TemplateType {
        self.template_type
    }

    /// Returns the assigned template.
    #[must_use]
    pub const fn template_id(&self) -> TemplateId {
        self.template_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last reassignment timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
