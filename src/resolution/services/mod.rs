//! Resolution services.

mod resolver;
mod samples;

pub use resolver::{ResolverError, ResolverResult, VariableResolver};
pub use samples::{SampleDataService, SampleDataServiceError, SampleDataServiceResult};
