//! External content registry port.

use crate::export::domain::{ContentCredentials, ContentSubmission, FriendlyName};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for registry calls.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// A messaging platform's template registry.
///
/// Content is created first and then submitted for approval in a separate
/// call. Statuses are returned in the registry's own vocabulary; see
/// [`crate::export::domain::map_external_status`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentRegistry: Send + Sync {
    /// Creates content and returns its registry identifier.
    async fn create_content(
        &self,
        credentials: &ContentCredentials,
        submission: &ContentSubmission,
    ) -> RegistryResult<String>;

    /// Submits content for approval and returns the reported status.
    async fn submit_for_approval(
        &self,
        credentials: &ContentCredentials,
        content_id: &str,
        name: &FriendlyName,
        category: &str,
    ) -> RegistryResult<String>;

    /// Reads the current approval status of content.
    async fn fetch_approval_status(
        &self,
        credentials: &ContentCredentials,
        content_id: &str,
    ) -> RegistryResult<String>;
}

/// Errors returned by registry adapters.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    /// The registry refused the credentials.
    #[error("registry rejected the credentials")]
    Unauthorized,

    /// The account or resource does not exist on the registry.
    #[error("registry account or resource not found: {0}")]
    NotFound(String),

    /// Content with the same friendly name already exists. Carries the
    /// registry message.
    #[error("content name already in use: {0}")]
    DuplicateName(String),

    /// The registry rejected the request for another reason.
    #[error("registry rejected the request ({code}): {message}")]
    Rejected {
        /// Registry error code, when one was returned.
        code: i64,
        /// Registry message.
        message: String,
    },

    /// The call could not be completed.
    #[error("registry transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl RegistryError {
    /// Wraps a transport-level failure.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
