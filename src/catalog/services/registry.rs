//! Catalog registration and listing service.

use crate::catalog::{
    domain::{CatalogDomainError, CatalogEntryDraft, VariableCatalogEntry, default_catalog},
    ports::{CatalogRepositoryError, VariableCatalogRepository},
};
use crate::error::ErrorKind;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Service-level errors for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogServiceError {
    /// The draft entry failed validation.
    #[error(transparent)]
    Domain(#[from] CatalogDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] CatalogRepositoryError),
}

impl CatalogServiceError {
    /// Returns the caller-facing category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::Validation,
            Self::Repository(
                CatalogRepositoryError::DuplicateKey(_) | CatalogRepositoryError::DuplicateEntry(_),
            ) => ErrorKind::Conflict,
            Self::Repository(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for catalog service operations.
pub type CatalogServiceResult<T> = Result<T, CatalogServiceError>;

/// Registers and lists catalog entries.
#[derive(Clone)]
pub struct VariableCatalogService<R, C>
where
    R: VariableCatalogRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> VariableCatalogService<R, C>
where
    R: VariableCatalogRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new catalog service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Validates and registers a new catalog entry.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError::Domain`] when the draft is invalid or
    /// [`CatalogServiceError::Repository`] when the key is already taken or
    /// persistence fails.
    pub async fn register(&self, draft: CatalogEntryDraft) -> CatalogServiceResult<VariableCatalogEntry> {
        let entry = draft.build(&*self.clock)?;
        self.repository.register(&entry).await?;
        info!(key = %entry.key(), source = %entry.source(), "registered catalog entry");
        Ok(entry)
    }

    /// Lists every entry ordered by source type, then display name.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError::Repository`] when the lookup fails.
    pub async fn list_catalog(&self) -> CatalogServiceResult<Vec<VariableCatalogEntry>> {
        let mut entries = self.repository.list_all().await?;
        entries.sort_by(|left, right| {
            left.source_type()
                .cmp(&right.source_type())
                .then_with(|| left.display_name().cmp(right.display_name()))
        });
        Ok(entries)
    }

    /// Registers the built-in entries that are not present yet.
    ///
    /// Returns the entries that were added. Running it twice adds nothing.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError`] when a built-in entry is invalid or
    /// persistence fails.
    pub async fn seed_defaults(&self) -> CatalogServiceResult<Vec<VariableCatalogEntry>> {
        let mut added = Vec::new();
        for entry in default_catalog(&*self.clock)? {
            if self.repository.find_by_key(entry.key()).await?.is_some() {
                continue;
            }
            match self.repository.register(&entry).await {
                Ok(()) => added.push(entry),
                Err(CatalogRepositoryError::DuplicateKey(_)) => {}
                Err(err) => return Err(err.into()),
            }
        }
        if !added.is_empty() {
            info!(count = added.len(), "seeded built-in catalog entries");
        }
        Ok(added)
    }
}
