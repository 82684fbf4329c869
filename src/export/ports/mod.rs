//! Port contracts for the external registry and its credentials.

pub mod credentials;
pub mod registry;

pub use credentials::{CredentialStore, CredentialStoreError, CredentialStoreResult};
#[cfg(test)]
pub use registry::MockContentRegistry;
pub use registry::{ContentRegistry, RegistryError, RegistryResult};
