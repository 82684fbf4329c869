//! In-memory sample data repository for tests and local runs.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::resolution::{
    domain::{SampleDataSet, SampleDataSetId},
    ports::{SampleDataRepository, SampleDataRepositoryError, SampleDataRepositoryResult},
};
use crate::tenancy::OwnerId;

/// Thread-safe in-memory sample data repository.
#[derive(Debug, Clone, Default)]
pub struct InMemorySampleDataRepository {
    sets: Arc<RwLock<Vec<SampleDataSet>>>,
}

impl InMemorySampleDataRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> SampleDataRepositoryError {
    SampleDataRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn clear_default(sets: &mut [SampleDataSet], owner_id: OwnerId) {
    for set in sets.iter_mut().filter(|set| set.owner_id() == owner_id) {
        set.set_default(false);
    }
}

#[async_trait]
impl SampleDataRepository for InMemorySampleDataRepository {
    async fn store(&self, set: &SampleDataSet) -> SampleDataRepositoryResult<()> {
        let mut sets = self.sets.write().map_err(lock_error)?;
        if sets.iter().any(|existing| existing.id() == set.id()) {
            return Err(SampleDataRepositoryError::DuplicateSet(set.id()));
        }
        if set.is_default() {
            clear_default(&mut sets, set.owner_id());
        }
        sets.push(set.clone());
        Ok(())
    }

    async fn set_default(
        &self,
        owner_id: OwnerId,
        set_id: SampleDataSetId,
    ) -> SampleDataRepositoryResult<bool> {
        let mut sets = self.sets.write().map_err(lock_error)?;
        let owned = sets
            .iter()
            .any(|set| set.id() == set_id && set.owner_id() == owner_id);
        if !owned {
            return Ok(false);
        }
        clear_default(&mut sets, owner_id);
        for set in sets.iter_mut().filter(|set| set.id() == set_id) {
            set.set_default(true);
        }
        Ok(true)
    }

    async fn find(
        &self,
        owner_id: OwnerId,
        set_id: SampleDataSetId,
    ) -> SampleDataRepositoryResult<Option<SampleDataSet>> {
        let sets = self.sets.read().map_err(lock_error)?;
        Ok(sets
            .iter()
            .find(|set| set.id() == set_id && set.owner_id() == owner_id)
            .cloned())
    }

    async fn find_default(&self, owner_id: OwnerId) -> SampleDataRepositoryResult<Option<SampleDataSet>> {
        let sets = self.sets.read().map_err(lock_error)?;
        Ok(sets
            .iter()
            .find(|set| set.owner_id() == owner_id && set.is_default())
            .cloned())
    }

    async fn list_by_owner(&self, owner_id: OwnerId) -> SampleDataRepositoryResult<Vec<SampleDataSet>> {
        let sets = self.sets.read().map_err(lock_error)?;
        Ok(sets
            .iter()
            .filter(|set| set.owner_id() == owner_id)
            .cloned()
            .collect())
    }
}
