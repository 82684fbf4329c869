//! Assigns templates to agents and answers "which template now".

use crate::assignment::{
    domain::{ActiveTemplate, NoAssignmentReason, TemplateAssignment},
    ports::{AssignmentRepository, AssignmentRepositoryError},
};
use crate::error::ErrorKind;
use crate::resolution::ports::{DirectoryError, RecipientDirectory};
use crate::template::{
    domain::{TemplateId, TemplateType},
    ports::{TemplateRepository, TemplateRepositoryError},
};
use crate::tenancy::{AgentId, OwnerId};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Service-level errors for assignment operations.
#[derive(Debug, Error)]
pub enum AssignmentServiceError {
    /// The template is missing, archived, or owned by someone else.
    #[error("template not found: {0}")]
    TemplateNotFound(TemplateId),
    /// The template's type differs from the slot it is assigned to.
    #[error("template {template_id} is a {actual} template, not {expected}")]
    TypeMismatch {
        /// Template being assigned.
        template_id: TemplateId,
        /// Slot type requested.
        expected: TemplateType,
        /// The template's own type.
        actual: TemplateType,
    },
    /// The agent is unknown to the caller, or its slot is held by another
    /// owner.
    #[error("agent not found: {0}")]
    AgentNotFound(AgentId),
    /// Assignment persistence failed.
    #[error(transparent)]
    Assignments(#[from] AssignmentRepositoryError),
    /// Template lookup failed.
    #[error(transparent)]
    Templates(#[from] TemplateRepositoryError),
    /// Agent lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

impl AssignmentServiceError {
    /// Returns the caller-facing category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::TemplateNotFound(_)
            | Self::AgentNotFound(_)
            | Self::Assignments(AssignmentRepositoryError::ForeignSlot { .. }) => {
                ErrorKind::NotFound
            }
            Self::TypeMismatch { .. } => ErrorKind::Validation,
            Self::Assignments(_) | Self::Templates(_) | Self::Directory(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for assignment operations.
pub type AssignmentServiceResult<T> = Result<T, AssignmentServiceError>;

/// Maintains agent assignments and resolves them at send time.
#[derive(Clone)]
pub struct AssignmentRegistryService<A, T, D, C>
where
    A: AssignmentRepository,
    T: TemplateRepository,
    D: RecipientDirectory,
    C: Clock + Send + Sync,
{
    assignments: Arc<A>,
    templates: Arc<T>,
    directory: Arc<D>,
    clock: Arc<C>,
}

impl<A, T, D, C> AssignmentRegistryService<A, T, D, C>
where
    A: AssignmentRepository,
    T: TemplateRepository,
    D: RecipientDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new assignment service.
    ///
    /// `directory` decides which agents belong to which owner.
    #[must_use]
    pub const fn new(
        assignments: Arc<A>,
        templates: Arc<T>,
        directory: Arc<D>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            assignments,
            templates,
            directory,
            clock,
        }
    }

    /// Assigns a template to an agent's slot, replacing any previous one.
    ///
    /// The agent must be configured under `owner_id`, and a slot already held
    /// by another owner is never overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentServiceError::TemplateNotFound`] when the
    /// template is missing, archived, or foreign,
    /// [`AssignmentServiceError::TypeMismatch`] when its type differs from
    /// `template_type`, and [`AssignmentServiceError::AgentNotFound`] when
    /// the agent or its slot belongs to someone else.
    pub async fn assign_template(
        &self,
        owner_id: OwnerId,
        agent_id: AgentId,
        template_type: TemplateType,
        template_id: TemplateId,
    ) -> AssignmentServiceResult<TemplateAssignment> {
        let detail = self
            .templates
            .find_by_id(template_id)
            .await?
            .filter(|detail| {
                detail.template().is_owned_by(owner_id) && !detail.template().is_archived()
            })
            .ok_or(AssignmentServiceError::TemplateNotFound(template_id))?;
        let actual = detail.template().template_type();
        if actual != template_type {
            return Err(AssignmentServiceError::TypeMismatch {
                template_id,
                expected: template_type,
                actual,
            });
        }

        self.require_agent(owner_id, agent_id).await?;

        let assignment = match self.assignments.find(agent_id, template_type).await? {
            Some(existing) if existing.owner_id() != owner_id => {
                warn!(%agent_id, %template_type, "refusing to overwrite a foreign slot");
                return Err(AssignmentServiceError::AgentNotFound(agent_id));
            }
            Some(mut existing) => {
                existing.reassign(template_id, &*self.clock);
                existing
            }
            None => {
                TemplateAssignment::new(owner_id, agent_id, template_type, template_id, &*self.clock)
            }
        };
        self.assignments.upsert(&assignment).await?;

        info!(%agent_id, %template_type, %template_id, "assigned template");
        Ok(assignment)
    }

    /// Removes an agent's assignment for a slot.
    ///
    /// Returns `false` when there is nothing to remove or the assignment was
    /// made by another owner.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentServiceError::Assignments`] when persistence fails.
    pub async fn unassign_template(
        &self,
        owner_id: OwnerId,
        agent_id: AgentId,
        template_type: TemplateType,
    ) -> AssignmentServiceResult<bool> {
        let owned = self
            .assignments
            .find(agent_id, template_type)
            .await?
            .is_some_and(|assignment| assignment.owner_id() == owner_id);
        if !owned {
            return Ok(false);
        }
        let removed = self.assignments.remove(agent_id, template_type).await?;
        if removed {
            info!(%agent_id, %template_type, "removed template assignment");
        }
        Ok(removed)
    }

    /// Lists the caller's assignments for one of their agents, ordered by
    /// template type.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentServiceError::AgentNotFound`] when the agent is
    /// not configured under `owner_id`.
    pub async fn list_agent_assignments(
        &self,
        owner_id: OwnerId,
        agent_id: AgentId,
    ) -> AssignmentServiceResult<Vec<TemplateAssignment>> {
        self.require_agent(owner_id, agent_id).await?;
        let mut assignments = self.assignments.list_by_agent(agent_id).await?;
        assignments.retain(|assignment| assignment.owner_id() == owner_id);
        Ok(assignments)
    }

    /// Returns the template an agent should send for a slot.
    ///
    /// A missing assignment, or an assigned template that is gone, archived,
    /// owned by someone other than the assigner, or without an active
    /// version, yields [`ActiveTemplate::NoAssignment`] rather than an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns an internal error only when storage itself fails.
    pub async fn get_active_template_for_agent(
        &self,
        agent_id: AgentId,
        template_type: TemplateType,
    ) -> AssignmentServiceResult<ActiveTemplate> {
        let Some(assignment) = self.assignments.find(agent_id, template_type).await? else {
            return Ok(ActiveTemplate::NoAssignment(NoAssignmentReason::NotAssigned));
        };
        let template_id = assignment.template_id();

        let reason = match self.templates.find_by_id(template_id).await? {
            None => NoAssignmentReason::TemplateMissing,
            Some(detail) if !detail.template().is_owned_by(assignment.owner_id()) => {
                NoAssignmentReason::OwnerMismatch
            }
            Some(detail) if detail.template().is_archived() => NoAssignmentReason::TemplateArchived,
            Some(detail) => {
                let (template, versions) = detail.into_parts();
                match versions.into_iter().find(|version| version.is_active()) {
                    Some(version) => {
                        return Ok(ActiveTemplate::Assigned {
                            template: Box::new(template),
                            version: Box::new(version),
                        });
                    }
                    None => NoAssignmentReason::NoActiveVersion,
                }
            }
        };

        warn!(
            %agent_id,
            %template_type,
            %template_id,
            %reason,
            "assigned template unusable; falling back to default"
        );
        Ok(ActiveTemplate::NoAssignment(reason))
    }

    async fn require_agent(&self, owner_id: OwnerId, agent_id: AgentId) -> AssignmentServiceResult<()> {
        let configured = self
            .directory
            .find_agent_config(owner_id, Some(agent_id))
            .await?
            .is_some();
        if !configured {
            return Err(AssignmentServiceError::AgentNotFound(agent_id));
        }
        Ok(())
    }
}
