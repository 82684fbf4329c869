//! Domain model for variable resolution.

mod chain;
mod error;
mod ids;
mod outcome;
mod records;
mod request;
mod sample;

pub use chain::{render, resolve_from_records, resolve_from_sample};
pub use error::ResolutionDomainError;
pub use ids::{RecipientId, SampleDataSetId};
pub use outcome::{CatalogMeta, Resolution, ResolutionWarning, ResolvedVariable, VariableSource};
pub use records::{AgentConfig, OwnerProfile, RecipientRecord, SourceRecords};
pub use request::{ResolutionRequest, SampleContext};
pub use sample::SampleDataSet;
