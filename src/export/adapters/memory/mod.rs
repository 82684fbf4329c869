//! In-memory export adapters.

mod credentials;
mod registry;

pub use credentials::InMemoryCredentialStore;
pub use registry::InMemoryContentRegistry;
