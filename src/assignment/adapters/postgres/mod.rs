//! `PostgreSQL` assignment adapter.

mod models;
mod repository;
pub(crate) mod schema;

pub use repository::{AssignmentPgPool, PostgresAssignmentRepository};
