//! Named sample data sets for preview rendering.

use super::{ResolutionDomainError, SampleDataSetId};
use crate::catalog::domain::VariableKey;
use crate::tenancy::OwnerId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named `key → value` map used when no real recipient exists yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleDataSet {
    id: SampleDataSetId,
    owner_id: OwnerId,
    name: String,
    values: BTreeMap<String, String>,
    is_default: bool,
    created_at: DateTime<Utc>,
}

impl SampleDataSet {
    /// Creates a validated sample set.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionDomainError::EmptySampleSetName`] for a blank
    /// name or [`ResolutionDomainError::InvalidSampleKey`] when a key is not
    /// a valid variable key.
    pub fn new(
        owner_id: OwnerId,
        name: impl Into<String>,
        values: BTreeMap<String, String>,
        is_default: bool,
        clock: &impl Clock,
    ) -> Result<Self, ResolutionDomainError> {
        let raw_name = name.into();
        let trimmed = raw_name.trim();
        if trimmed.is_empty() {
            return Err(ResolutionDomainError::EmptySampleSetName);
        }
        if let Some(bad) = values.keys().find(|key| VariableKey::new(key.as_str()).is_err()) {
            return Err(ResolutionDomainError::InvalidSampleKey(bad.clone()));
        }

        Ok(Self {
            id: SampleDataSetId::new(),
            owner_id,
            name: trimmed.to_owned(),
            values,
            is_default,
            created_at: clock.utc(),
        })
    }

    /// Returns the set identifier.
    #[must_use]
    pub const fn id(&self) -> SampleDataSetId {
        self.id
    }

    /// Returns the owning operator.
    #[must_use]
    pub const fn owner_id(&self) -> OwnerId {
        self.owner_id
    }

    /// Returns the set name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the sample values.
    #[must_use]
    pub const fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    /// Returns `true` when this is the owner's default set.
    #[must_use]
    pub const fn is_default(&self) -> bool {
        self.is_default
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Sets or clears the default flag.
    pub const fn set_default(&mut self, is_default: bool) {
        self.is_default = is_default;
    }
}
