//! In-memory catalog repository for tests and local runs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::catalog::{
    domain::{CatalogEntryId, VariableCatalogEntry, VariableKey},
    ports::{CatalogRepositoryError, CatalogRepositoryResult, VariableCatalogRepository},
};

/// Thread-safe in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVariableCatalog {
    state: Arc<RwLock<InMemoryCatalogState>>,
}

#[derive(Debug, Default)]
struct InMemoryCatalogState {
    entries: HashMap<CatalogEntryId, VariableCatalogEntry>,
    key_index: HashMap<VariableKey, CatalogEntryId>,
}

impl InMemoryVariableCatalog {
    /// Creates an empty in-memory catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> CatalogRepositoryError {
    CatalogRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl VariableCatalogRepository for InMemoryVariableCatalog {
    async fn register(&self, entry: &VariableCatalogEntry) -> CatalogRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.entries.contains_key(&entry.id()) {
            return Err(CatalogRepositoryError::DuplicateEntry(entry.id()));
        }
        if state.key_index.contains_key(entry.key()) {
            return Err(CatalogRepositoryError::DuplicateKey(entry.key().clone()));
        }
        state.key_index.insert(entry.key().clone(), entry.id());
        state.entries.insert(entry.id(), entry.clone());
        Ok(())
    }

    async fn find_by_key(
        &self,
        key: &VariableKey,
    ) -> CatalogRepositoryResult<Option<VariableCatalogEntry>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .key_index
            .get(key)
            .and_then(|id| state.entries.get(id))
            .cloned())
    }

    async fn find_by_keys(
        &self,
        keys: &[VariableKey],
    ) -> CatalogRepositoryResult<Vec<VariableCatalogEntry>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(keys
            .iter()
            .filter_map(|key| state.key_index.get(key))
            .filter_map(|id| state.entries.get(id))
            .cloned()
            .collect())
    }

    async fn find_by_ids(
        &self,
        ids: &[CatalogEntryId],
    ) -> CatalogRepositoryResult<Vec<VariableCatalogEntry>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(ids
            .iter()
            .filter_map(|id| state.entries.get(id))
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> CatalogRepositoryResult<Vec<VariableCatalogEntry>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.entries.values().cloned().collect())
    }
}
