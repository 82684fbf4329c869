//! Sample data set management.

use crate::error::ErrorKind;
use crate::resolution::{
    domain::{ResolutionDomainError, SampleDataSet, SampleDataSetId},
    ports::{SampleDataRepository, SampleDataRepositoryError},
};
use crate::tenancy::OwnerId;
use mockable::Clock;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Service-level errors for sample data operations.
#[derive(Debug, Error)]
pub enum SampleDataServiceError {
    /// The name or a key is invalid.
    #[error(transparent)]
    Domain(#[from] ResolutionDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] SampleDataRepositoryError),
}

impl SampleDataServiceError {
    /// Returns the caller-facing category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::Validation,
            Self::Repository(SampleDataRepositoryError::DuplicateSet(_)) => ErrorKind::Conflict,
            Self::Repository(SampleDataRepositoryError::Persistence(_)) => ErrorKind::Internal,
        }
    }
}

/// Result type for sample data operations.
pub type SampleDataServiceResult<T> = Result<T, SampleDataServiceError>;

/// Creates and manages an owner's sample data sets.
#[derive(Clone)]
pub struct SampleDataService<S, C>
where
    S: SampleDataRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> SampleDataService<S, C>
where
    S: SampleDataRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new sample data service.
    #[must_use]
    pub const fn new(repository: Arc<S>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a named set. When `make_default` is set, the owner's previous
    /// default is cleared.
    ///
    /// # Errors
    ///
    /// Returns [`SampleDataServiceError::Domain`] for a blank name or an
    /// invalid key.
    pub async fn create_sample_data_set(
        &self,
        owner_id: OwnerId,
        name: impl Into<String>,
        values: BTreeMap<String, String>,
        make_default: bool,
    ) -> SampleDataServiceResult<SampleDataSet> {
        let set = SampleDataSet::new(owner_id, name, values, make_default, &*self.clock)?;
        self.repository.store(&set).await?;
        info!(
            set_id = %set.id(),
            %owner_id,
            is_default = set.is_default(),
            "created sample data set"
        );
        Ok(set)
    }

    /// Makes a set the owner's default. Returns `false` when the set is not
    /// found for this owner.
    ///
    /// # Errors
    ///
    /// Returns [`SampleDataServiceError::Repository`] when persistence fails.
    pub async fn set_default_sample_data_set(
        &self,
        owner_id: OwnerId,
        set_id: SampleDataSetId,
    ) -> SampleDataServiceResult<bool> {
        let changed = self.repository.set_default(owner_id, set_id).await?;
        if changed {
            info!(%set_id, %owner_id, "set default sample data set");
        }
        Ok(changed)
    }

    /// Lists the owner's sets.
    ///
    /// # Errors
    ///
    /// Returns [`SampleDataServiceError::Repository`] when the lookup fails.
    pub async fn list_sample_data_sets(
        &self,
        owner_id: OwnerId,
    ) -> SampleDataServiceResult<Vec<SampleDataSet>> {
        Ok(self.repository.list_by_owner(owner_id).await?)
    }
}
