//! In-memory content registry for tests and local runs.
//!
//! Models the registry rules the exporter depends on: friendly names are
//! unique per account, and approval can fail independently of creation.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::export::{
    domain::{ContentCredentials, ContentSubmission, FriendlyName},
    ports::{ContentRegistry, RegistryError, RegistryResult},
};

/// Thread-safe in-memory registry.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContentRegistry {
    state: Arc<RwLock<RegistryState>>,
}

#[derive(Debug, Default)]
struct RegistryState {
    contents: HashMap<String, StoredContent>,
    next_sid: u64,
    creation_failure: Option<RegistryError>,
    approval_failure: Option<RegistryError>,
    status_on_submit: Option<String>,
}

#[derive(Debug, Clone)]
struct StoredContent {
    account_sid: String,
    submission: ContentSubmission,
    status: String,
}

fn lock_error(err: impl std::fmt::Display) -> RegistryError {
    RegistryError::transport(std::io::Error::other(err.to_string()))
}

impl InMemoryContentRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent creation call fail with `err`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the state lock is poisoned.
    pub fn fail_creation_with(&self, err: RegistryError) -> RegistryResult<()> {
        self.state.write().map_err(lock_error)?.creation_failure = Some(err);
        Ok(())
    }

    /// Makes every subsequent approval submission fail with `err`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the state lock is poisoned.
    pub fn fail_approvals_with(&self, err: RegistryError) -> RegistryResult<()> {
        self.state.write().map_err(lock_error)?.approval_failure = Some(err);
        Ok(())
    }

    /// Sets the status reported when content is submitted for approval.
    /// Defaults to `received`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the state lock is poisoned.
    pub fn report_on_submit(&self, status: impl Into<String>) -> RegistryResult<()> {
        self.state.write().map_err(lock_error)?.status_on_submit = Some(status.into());
        Ok(())
    }

    /// Overrides the stored status of existing content, as a reviewer would.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] for unknown content.
    pub fn set_status(&self, content_id: &str, status: impl Into<String>) -> RegistryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let content = state
            .contents
            .get_mut(content_id)
            .ok_or_else(|| RegistryError::NotFound(content_id.to_owned()))?;
        content.status = status.into();
        Ok(())
    }

    /// Returns the submission stored under `content_id`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the state lock is poisoned.
    pub fn submission(&self, content_id: &str) -> RegistryResult<Option<ContentSubmission>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .contents
            .get(content_id)
            .map(|content| content.submission.clone()))
    }

    /// Returns every registered friendly name, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the state lock is poisoned.
    pub fn friendly_names(&self) -> RegistryResult<Vec<String>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut names: Vec<String> = state
            .contents
            .values()
            .map(|content| content.submission.friendly_name.as_str().to_owned())
            .collect();
        names.sort_unstable();
        Ok(names)
    }
}

fn owned_content<'a>(
    state: &'a mut RegistryState,
    credentials: &ContentCredentials,
    content_id: &str,
) -> RegistryResult<&'a mut StoredContent> {
    state
        .contents
        .get_mut(content_id)
        .filter(|content| content.account_sid == credentials.account_sid())
        .ok_or_else(|| RegistryError::NotFound(content_id.to_owned()))
}

#[async_trait]
impl ContentRegistry for InMemoryContentRegistry {
    async fn create_content(
        &self,
        credentials: &ContentCredentials,
        submission: &ContentSubmission,
    ) -> RegistryResult<String> {
        let mut state = self.state.write().map_err(lock_error)?;
        if let Some(err) = state.creation_failure.clone() {
            return Err(err);
        }
        let taken = state.contents.values().any(|content| {
            content.account_sid == credentials.account_sid()
                && content.submission.friendly_name == submission.friendly_name
        });
        if taken {
            return Err(RegistryError::DuplicateName(format!(
                "content with friendly name {} already exists",
                submission.friendly_name
            )));
        }

        state.next_sid = state.next_sid.saturating_add(1);
        let sid = format!("HX{:032x}", state.next_sid);
        state.contents.insert(
            sid.clone(),
            StoredContent {
                account_sid: credentials.account_sid().to_owned(),
                submission: submission.clone(),
                status: "unsubmitted".to_owned(),
            },
        );
        Ok(sid)
    }

    async fn submit_for_approval(
        &self,
        credentials: &ContentCredentials,
        content_id: &str,
        _name: &FriendlyName,
        _category: &str,
    ) -> RegistryResult<String> {
        let mut state = self.state.write().map_err(lock_error)?;
        if let Some(err) = state.approval_failure.clone() {
            return Err(err);
        }
        let status = state
            .status_on_submit
            .clone()
            .unwrap_or_else(|| "received".to_owned());
        let content = owned_content(&mut state, credentials, content_id)?;
        content.status.clone_from(&status);
        Ok(status)
    }

    async fn fetch_approval_status(
        &self,
        credentials: &ContentCredentials,
        content_id: &str,
    ) -> RegistryResult<String> {
        let mut state = self.state.write().map_err(lock_error)?;
        let content = owned_content(&mut state, credentials, content_id)?;
        Ok(content.status.clone())
    }
}
