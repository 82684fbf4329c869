//! Repository port for sample data sets.

use crate::resolution::domain::{SampleDataSet, SampleDataSetId};
use crate::tenancy::OwnerId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for sample data repository operations.
pub type SampleDataRepositoryResult<T> = Result<T, SampleDataRepositoryError>;

/// Sample data persistence contract.
///
/// At most one set per owner is the default. Storing or promoting a default
/// set clears the previous default in the same atomic step.
#[async_trait]
pub trait SampleDataRepository: Send + Sync {
    /// Stores a new set.
    ///
    /// # Errors
    ///
    /// Returns [`SampleDataRepositoryError::DuplicateSet`] when the
    /// identifier is taken.
    async fn store(&self, set: &SampleDataSet) -> SampleDataRepositoryResult<()>;

    /// Makes `set_id` the owner's default. Returns `false` when the set does
    /// not exist or is not owned.
    async fn set_default(
        &self,
        owner_id: OwnerId,
        set_id: SampleDataSetId,
    ) -> SampleDataRepositoryResult<bool>;

    /// Finds an owned set.
    async fn find(
        &self,
        owner_id: OwnerId,
        set_id: SampleDataSetId,
    ) -> SampleDataRepositoryResult<Option<SampleDataSet>>;

    /// Finds the owner's default set.
    async fn find_default(&self, owner_id: OwnerId) -> SampleDataRepositoryResult<Option<SampleDataSet>>;

    /// Lists the owner's sets, oldest first.
    async fn list_by_owner(&self, owner_id: OwnerId) -> SampleDataRepositoryResult<Vec<SampleDataSet>>;
}

/// Errors returned by sample data repository implementations.
#[derive(Debug, Clone, Error)]
pub enum SampleDataRepositoryError {
    /// A set with the same identifier already exists.
    #[error("duplicate sample data set identifier: {0}")]
    DuplicateSet(SampleDataSetId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SampleDataRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
