//! `reqwest` client for the content registry.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::wire::{
    ApiErrorBody, ApprovalRequestBody, ApprovalRequests, ApprovalResponse, CreateContentBody,
    CreatedContent, classify_error,
};
use crate::export::{
    ContentApiConfig,
    domain::{ContentCredentials, ContentSubmission, FriendlyName},
    ports::{ContentRegistry, RegistryError, RegistryResult},
};

/// Content registry reached over HTTPS with basic auth.
#[derive(Debug, Clone)]
pub struct HttpContentRegistry {
    http: Client,
    config: ContentApiConfig,
}

impl HttpContentRegistry {
    /// Builds a client whose requests are bounded by
    /// [`ContentApiConfig::request_timeout`].
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Transport`] when the TLS backend cannot be
    /// initialised.
    pub fn new(config: ContentApiConfig) -> RegistryResult<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(RegistryError::transport)?;
        Ok(Self { http, config })
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ContentApiConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        credentials: &ContentCredentials,
    ) -> RegistryResult<T> {
        let response = request
            .basic_auth(credentials.account_sid(), Some(credentials.auth_token()))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(RegistryError::transport)?;
        if !response.status().is_success() {
            return Err(error_from(response).await);
        }
        response.json().await.map_err(RegistryError::transport)
    }
}

async fn error_from(response: Response) -> RegistryError {
    let status = response.status();
    let body: ApiErrorBody = response.json().await.unwrap_or_default();
    let message = body.message.unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("unknown registry error")
            .to_owned()
    });
    classify_error(status.as_u16(), body.code, &message)
}

#[async_trait]
impl ContentRegistry for HttpContentRegistry {
    async fn create_content(
        &self,
        credentials: &ContentCredentials,
        submission: &ContentSubmission,
    ) -> RegistryResult<String> {
        let request = self
            .http
            .post(self.url("/v1/Content"))
            .json(&CreateContentBody::from(submission));
        let created: CreatedContent = self.send(request, credentials).await?;
        Ok(created.sid)
    }

    async fn submit_for_approval(
        &self,
        credentials: &ContentCredentials,
        content_id: &str,
        name: &FriendlyName,
        category: &str,
    ) -> RegistryResult<String> {
        let request = self
            .http
            .post(self.url(&format!("/v1/Content/{content_id}/ApprovalRequests/whatsapp")))
            .json(&ApprovalRequestBody {
                name: name.as_str(),
                category,
            });
        let approval: ApprovalResponse = self.send(request, credentials).await?;
        Ok(approval.status)
    }

    async fn fetch_approval_status(
        &self,
        credentials: &ContentCredentials,
        content_id: &str,
    ) -> RegistryResult<String> {
        let request = self
            .http
            .get(self.url(&format!("/v1/Content/{content_id}/ApprovalRequests")));
        let requests: ApprovalRequests = self.send(request, credentials).await?;
        Ok(requests
            .whatsapp
            .map_or_else(|| "unsubmitted".to_owned(), |approval| approval.status))
    }
}
