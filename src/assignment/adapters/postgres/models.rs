//! Diesel row models for assignment persistence.

use super::schema::template_assignments;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for assignments.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = template_assignments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AssignmentRow {
    /// Assignment identifier.
    pub id: uuid::Uuid,
    /// Owner who made the assignment.
    pub owner_id: uuid::Uuid,
    /// Assigned agent.
    pub agent_id: uuid::Uuid,
    /// Sequence slot.
    pub template_type: String,
    /// Assigned template.
    pub template_id: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last reassignment timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for assignments.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = template_assignments)]
pub struct NewAssignmentRow {
    /// Assignment identifier.
    pub id: uuid::Uuid,
    /// Owner who made the assignment.
    pub owner_id: uuid::Uuid,
    /// Assigned agent.
    pub agent_id: uuid::Uuid,
    /// Sequence slot.
    pub template_type: String,
    /// Assigned template.
    pub template_id: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last reassignment timestamp.
    pub updated_at: DateTime<Utc>,
}
