//! Repository port for catalog persistence and lookup.

use crate::catalog::domain::{CatalogEntryId, VariableCatalogEntry, VariableKey};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for catalog repository operations.
pub type CatalogRepositoryResult<T> = Result<T, CatalogRepositoryError>;

/// Catalog persistence contract.
#[async_trait]
pub trait VariableCatalogRepository: Send + Sync {
    /// Stores a new catalog entry.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogRepositoryError::DuplicateKey`] when the key is
    /// already registered or [`CatalogRepositoryError::DuplicateEntry`] when
    /// the identifier already exists.
    async fn register(&self, entry: &VariableCatalogEntry) -> CatalogRepositoryResult<()>;

    /// Finds an entry by its placeholder key.
    async fn find_by_key(&self, key: &VariableKey)
    -> CatalogRepositoryResult<Option<VariableCatalogEntry>>;

    /// Returns the entries whose keys are in `keys`. Unknown keys are
    /// skipped; callers compare the result against the request.
    async fn find_by_keys(
        &self,
        keys: &[VariableKey],
    ) -> CatalogRepositoryResult<Vec<VariableCatalogEntry>>;

    /// Returns the entries whose identifiers are in `ids`.
    async fn find_by_ids(
        &self,
        ids: &[CatalogEntryId],
    ) -> CatalogRepositoryResult<Vec<VariableCatalogEntry>>;

    /// Returns every registered entry.
    async fn list_all(&self) -> CatalogRepositoryResult<Vec<VariableCatalogEntry>>;
}

/// Errors returned by catalog repository implementations.
#[derive(Debug, Clone, Error)]
pub enum CatalogRepositoryError {
    /// An entry with the same identifier already exists.
    #[error("duplicate catalog entry identifier: {0}")]
    DuplicateEntry(CatalogEntryId),

    /// An entry with the same key already exists.
    #[error("duplicate catalog key: {0}")]
    DuplicateKey(VariableKey),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted catalog data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CatalogRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
