//! Port contracts for assignment persistence.

pub mod repository;

pub use repository::{AssignmentRepository, AssignmentRepositoryError, AssignmentRepositoryResult};
