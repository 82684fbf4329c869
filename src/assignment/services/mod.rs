//! Assignment services.

mod registry;

pub use registry::{AssignmentRegistryService, AssignmentServiceError, AssignmentServiceResult};
