//! In-memory assignment adapter.

mod assignment;

pub use assignment::InMemoryAssignmentRepository;
