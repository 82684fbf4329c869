//! Credential lookup port.

use crate::export::domain::{ContentCredentials, CredentialsId};
use crate::tenancy::OwnerId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for credential lookups.
pub type CredentialStoreResult<T> = Result<T, CredentialStoreError>;

/// Source of registry credentials.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Finds an active credential set owned by `owner_id`.
    async fn find_active(
        &self,
        owner_id: OwnerId,
        credentials_id: CredentialsId,
    ) -> CredentialStoreResult<Option<ContentCredentials>>;

    /// Finds the owner's first active credential set.
    async fn find_first_active(
        &self,
        owner_id: OwnerId,
    ) -> CredentialStoreResult<Option<ContentCredentials>>;
}

/// Errors returned by credential stores.
#[derive(Debug, Clone, Error)]
pub enum CredentialStoreError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CredentialStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
