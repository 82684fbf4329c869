//! Content registry client configuration.

use std::time::Duration;

/// Settings for talking to the external content registry.
///
/// # Examples
///
///     use missive::export::ContentApiConfig;
///     use std::time::Duration;
///
///     let config = ContentApiConfig::sandbox("http://127.0.0.1:8080")
///         .with_request_timeout(Duration::from_secs(2));
///     assert_eq!(config.language, "it");
///     assert_eq!(config.request_timeout, Duration::from_secs(2));
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentApiConfig {
    /// Registry base URL without a trailing slash.
    pub base_url: String,
    /// Upper bound on each registry call.
    pub request_timeout: Duration,
    /// Language code declared on submitted content.
    pub language: String,
    /// Category declared on approval requests.
    pub approval_category: String,
    /// Maximum length of the sanitised template name, before the version
    /// suffix.
    pub friendly_name_max_len: usize,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for ContentApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://content.twilio.com".to_owned(),
            request_timeout: Duration::from_secs(10),
            language: "it".to_owned(),
            approval_category: "UTILITY".to_owned(),
            friendly_name_max_len: 64,
            user_agent: concat!("missive/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

impl ContentApiConfig {
    /// Default settings pointed at another base URL, for test servers.
    #[must_use]
    pub fn sandbox(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            ..Self::default()
        }
    }

    /// Replaces the request timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Replaces the content language.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Replaces the approval category.
    #[must_use]
    pub fn with_approval_category(mut self, category: impl Into<String>) -> Self {
        self.approval_category = category.into();
        self
    }
}
