//! In-memory template repository for tests and local runs.
//!
//! Every multi-row mutation runs under a single write-lock acquisition, which
//! is the in-memory equivalent of a transaction.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::template::{
    domain::{
        ActiveVersionSummary, ExternalSync, Template, TemplateDetail, TemplateId,
        TemplateListFilter, TemplateSummary, TemplateVersion, TemplateVersionId, VersionNumber,
        VersionRecord,
    },
    ports::{TemplateRepository, TemplateRepositoryError, TemplateRepositoryResult},
};
use crate::tenancy::OwnerId;

/// Thread-safe in-memory template repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplateRepository {
    state: Arc<RwLock<InMemoryTemplateState>>,
}

#[derive(Debug, Default)]
struct InMemoryTemplateState {
    templates: HashMap<TemplateId, Template>,
    versions: HashMap<TemplateId, Vec<TemplateVersion>>,
    version_index: HashMap<TemplateVersionId, TemplateId>,
}

impl InMemoryTemplateState {
    fn live_type_conflict(&self, candidate: &Template) -> Option<TemplateRepositoryError> {
        self.templates
            .values()
            .any(|existing| {
                existing.id() != candidate.id()
                    && existing.owner_id() == candidate.owner_id()
                    && existing.template_type() == candidate.template_type()
                    && !existing.is_archived()
            })
            .then(|| TemplateRepositoryError::ActiveTypeConflict {
                owner_id: candidate.owner_id(),
                template_type: candidate.template_type(),
            })
    }

    fn record(&self, version_id: TemplateVersionId) -> Option<VersionRecord> {
        let template_id = self.version_index.get(&version_id)?;
        let template = self.templates.get(template_id)?;
        let version = self
            .versions
            .get(template_id)?
            .iter()
            .find(|version| version.id() == version_id)?;
        Some(VersionRecord {
            template: template.clone(),
            version: version.clone(),
        })
    }
}

impl InMemoryTemplateRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> TemplateRepositoryError {
    TemplateRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TemplateRepository for InMemoryTemplateRepository {
    async fn create(
        &self,
        template: &Template,
        first_version: &TemplateVersion,
    ) -> TemplateRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.templates.contains_key(&template.id()) {
            return Err(TemplateRepositoryError::DuplicateTemplate(template.id()));
        }
        if let Some(conflict) = state.live_type_conflict(template) {
            return Err(conflict);
        }

        state.templates.insert(template.id(), template.clone());
        state
            .version_index
            .insert(first_version.id(), template.id());
        state
            .versions
            .insert(template.id(), vec![first_version.clone()]);
        Ok(())
    }

    async fn append_version(&self, version: &TemplateVersion) -> TemplateRepositoryResult<()> {
        let mut guard = self.state.write().map_err(lock_error)?;
        let state = &mut *guard;
        let template_id = version.template_id();

        // Archived templates take no new versions, even if archive landed
        // after the caller's own check.
        let template = state
            .templates
            .get_mut(&template_id)
            .filter(|template| !template.is_archived())
            .ok_or(TemplateRepositoryError::TemplateNotFound(template_id))?;
        let history = state.versions.entry(template_id).or_default();

        let current_max = history.iter().map(TemplateVersion::version_number).max();
        let expected = current_max.map_or(VersionNumber::FIRST, VersionNumber::next);
        if version.version_number() != expected {
            return Err(TemplateRepositoryError::VersionConflict {
                template_id,
                version_number: version.version_number(),
            });
        }

        for existing in history.iter_mut() {
            existing.deactivate();
        }
        history.push(version.clone());
        template.touch(version.created_at());
        state.version_index.insert(version.id(), template_id);
        Ok(())
    }

    async fn find_by_id(&self, id: TemplateId) -> TemplateRepositoryResult<Option<TemplateDetail>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.templates.get(&id).map(|template| {
            let versions = state.versions.get(&id).cloned().unwrap_or_default();
            TemplateDetail::new(template.clone(), versions)
        }))
    }

    async fn list_by_owner(
        &self,
        owner_id: OwnerId,
        filter: TemplateListFilter,
    ) -> TemplateRepositoryResult<Vec<TemplateSummary>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut summaries: Vec<TemplateSummary> = state
            .templates
            .values()
            .filter(|template| template.is_owned_by(owner_id) && !template.is_archived())
            .filter(|template| filter.matches(template))
            .map(|template| TemplateSummary {
                template: template.clone(),
                active_version: state
                    .versions
                    .get(&template.id())
                    .and_then(|history| history.iter().find(|version| version.is_active()))
                    .map(ActiveVersionSummary::from),
            })
            .collect();
        summaries.sort_by(|left, right| right.template.created_at().cmp(&left.template.created_at()));
        Ok(summaries)
    }

    async fn find_version(
        &self,
        version_id: TemplateVersionId,
    ) -> TemplateRepositoryResult<Option<VersionRecord>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.record(version_id))
    }

    async fn update(&self, template: &Template) -> TemplateRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if !state.templates.contains_key(&template.id()) {
            return Err(TemplateRepositoryError::TemplateNotFound(template.id()));
        }
        if !template.is_archived() {
            if let Some(conflict) = state.live_type_conflict(template) {
                return Err(conflict);
            }
        }
        state.templates.insert(template.id(), template.clone());
        Ok(())
    }

    async fn record_sync(
        &self,
        version_id: TemplateVersionId,
        sync: &ExternalSync,
    ) -> TemplateRepositoryResult<()> {
        let mut guard = self.state.write().map_err(lock_error)?;
        let state = &mut *guard;
        let version = state
            .version_index
            .get(&version_id)
            .and_then(|template_id| state.versions.get_mut(template_id))
            .and_then(|history| history.iter_mut().find(|version| version.id() == version_id))
            .ok_or(TemplateRepositoryError::VersionNotFound(version_id))?;
        version.record_sync(sync.clone());
        Ok(())
    }

    async fn list_synced_versions(
        &self,
        owner_id: OwnerId,
    ) -> TemplateRepositoryResult<Vec<VersionRecord>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut records: Vec<VersionRecord> = state
            .templates
            .values()
            .filter(|template| template.is_owned_by(owner_id))
            .flat_map(|template| {
                state
                    .versions
                    .get(&template.id())
                    .into_iter()
                    .flatten()
                    .filter(|version| version.sync().content_id().is_some())
                    .map(move |version| VersionRecord {
                        template: template.clone(),
                        version: version.clone(),
                    })
            })
            .collect();
        records.sort_by_key(|record| (record.template.created_at(), record.version.version_number()));
        Ok(records)
    }
}
