//! Port contracts for resolution inputs.

pub mod directory;
pub mod samples;

pub use directory::{DirectoryError, DirectoryResult, RecipientDirectory};
pub use samples::{SampleDataRepository, SampleDataRepositoryError, SampleDataRepositoryResult};
