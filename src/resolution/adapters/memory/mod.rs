//! In-memory adapters for resolution inputs.

mod directory;
mod samples;

pub use directory::InMemoryRecipientDirectory;
pub use samples::InMemorySampleDataRepository;
