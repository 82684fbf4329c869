//! Request and response bodies, and error classification.

use crate::export::{domain::ContentSubmission, ports::RegistryError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const AUTH_FAILED_CODE: i64 = 20003;
const RESOURCE_NOT_FOUND_CODE: i64 = 20404;

#[derive(Debug, Serialize)]
pub(super) struct CreateContentBody<'a> {
    friendly_name: &'a str,
    language: &'a str,
    variables: BTreeMap<String, &'a str>,
    types: ContentTypes<'a>,
}

#[derive(Debug, Serialize)]
struct ContentTypes<'a> {
    #[serde(rename = "twilio/text")]
    text: TextContent<'a>,
}

#[derive(Debug, Serialize)]
struct TextContent<'a> {
    body: &'a str,
}

impl<'a> From<&'a ContentSubmission> for CreateContentBody<'a> {
    fn from(submission: &'a ContentSubmission) -> Self {
        Self {
            friendly_name: submission.friendly_name.as_str(),
            language: &submission.language,
            variables: submission
                .variable_descriptions
                .iter()
                .map(|(position, description)| (position.to_string(), description.as_str()))
                .collect(),
            types: ContentTypes {
                text: TextContent {
                    body: &submission.body,
                },
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct CreatedContent {
    pub(super) sid: String,
}

#[derive(Debug, Serialize)]
pub(super) struct ApprovalRequestBody<'a> {
    pub(super) name: &'a str,
    pub(super) category: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApprovalResponse {
    pub(super) status: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApprovalRequests {
    pub(super) whatsapp: Option<ApprovalResponse>,
}

/// Error document returned by the registry.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ApiErrorBody {
    pub(super) code: Option<i64>,
    pub(super) message: Option<String>,
}

/// Maps an HTTP status and the registry's error code and message to a
/// [`RegistryError`].
///
/// # Examples
///
///     use missive::export::adapters::http::classify_error;
///     use missive::export::ports::RegistryError;
///
///     let err = classify_error(401, Some(20003), "Authenticate");
///     assert!(matches!(err, RegistryError::Unauthorized));
#[must_use]
pub fn classify_error(http_status: u16, code: Option<i64>, message: &str) -> RegistryError {
    if http_status == 401 || code == Some(AUTH_FAILED_CODE) {
        return RegistryError::Unauthorized;
    }
    if http_status == 404 || code == Some(RESOURCE_NOT_FOUND_CODE) {
        return RegistryError::NotFound(message.to_owned());
    }
    if http_status == 409 || message.to_ascii_lowercase().contains("already exists") {
        return RegistryError::DuplicateName(message.to_owned());
    }
    RegistryError::Rejected {
        code: code.unwrap_or_else(|| i64::from(http_status)),
        message: message.to_owned(),
    }
}
