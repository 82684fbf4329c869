//! In-memory credential store.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::export::{
    domain::{ContentCredentials, CredentialsId},
    ports::{CredentialStore, CredentialStoreError, CredentialStoreResult},
};
use crate::tenancy::OwnerId;

/// Thread-safe in-memory credential store. Insertion order is preserved, so
/// "first active" is the earliest inserted active set.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    credentials: Arc<RwLock<Vec<ContentCredentials>>>,
}

fn lock_error(err: impl std::fmt::Display) -> CredentialStoreError {
    CredentialStoreError::persistence(std::io::Error::other(err.to_string()))
}

impl InMemoryCredentialStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a credential set.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialStoreError`] when the state lock is poisoned.
    pub fn put(&self, credentials: ContentCredentials) -> CredentialStoreResult<()> {
        let mut stored = self.credentials.write().map_err(lock_error)?;
        stored.retain(|existing| existing.id() != credentials.id());
        stored.push(credentials);
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_active(
        &self,
        owner_id: OwnerId,
        credentials_id: CredentialsId,
    ) -> CredentialStoreResult<Option<ContentCredentials>> {
        let stored = self.credentials.read().map_err(lock_error)?;
        Ok(stored
            .iter()
            .find(|credentials| {
                credentials.id() == credentials_id
                    && credentials.owner_id() == owner_id
                    && credentials.is_active()
            })
            .cloned())
    }

    async fn find_first_active(
        &self,
        owner_id: OwnerId,
    ) -> CredentialStoreResult<Option<ContentCredentials>> {
        let stored = self.credentials.read().map_err(lock_error)?;
        Ok(stored
            .iter()
            .find(|credentials| credentials.owner_id() == owner_id && credentials.is_active())
            .cloned())
    }
}
