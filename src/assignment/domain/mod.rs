//! Domain model for template assignments.

mod active;
mod assignment;

pub use active::{ActiveTemplate, NoAssignmentReason};
pub use assignment::{AssignmentId, PersistedAssignmentData, TemplateAssignment};
