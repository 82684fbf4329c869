//! In-memory view of the catalog entries a validation run needs.

use crate::catalog::domain::{VariableCatalogEntry, VariableKey};
use std::collections::HashMap;

/// Catalog entries keyed by placeholder key.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    entries: HashMap<VariableKey, VariableCatalogEntry>,
}

impl CatalogSnapshot {
    /// Builds a snapshot from loaded entries.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = VariableCatalogEntry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|entry| (entry.key().clone(), entry))
                .collect(),
        }
    }

    /// Returns the entry for `key`, if known.
    #[must_use]
    pub fn get(&self, key: &VariableKey) -> Option<&VariableCatalogEntry> {
        self.entries.get(key)
    }

    /// Returns the entry for a raw key string, if it parses and is known.
    #[must_use]
    pub fn get_raw(&self, key: &str) -> Option<&VariableCatalogEntry> {
        VariableKey::new(key).ok().and_then(|parsed| self.entries.get(&parsed))
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the snapshot holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
