//! Configuration for Linode API clients.
//!
//! A [`ClientConfig`] is built once, validated, and handed to each client at
//! construction. Clients never mutate it.

use crate::Error;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.linode.com/v4/";

/// Configuration for a Linode API client.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ClientConfig {
    /// API base URL, including the version segment
    #[validate(url)]
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Personal access token sent as a bearer credential
    #[serde(skip)]
    pub token: Option<SecretString>,

    /// Request timeout in seconds; the transport default applies when unset
    #[validate(range(min = 1, max = 300))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    /// User-Agent override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Log request and response bodies at debug level
    #[serde(default)]
    pub debug: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl ClientConfig {
    /// Create a new client configuration for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or validation fails.
    pub fn new(base_url: impl Into<String>) -> Result<Self, Error> {
        let config = Self {
            base_url: base_url.into(),
            ..Self::default()
        };

        config
            .validate()
            .map_err(|e| Error::Config(format!("Invalid configuration: {e}")))?;

        Ok(config)
    }

    /// Set the bearer token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = Some(seconds);
        self
    }

    /// Override the User-Agent header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Enable or disable body logging.
    #[must_use]
    pub const fn with_debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Get the request timeout as a Duration, if set.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Parse the base URL, ensuring a trailing slash so relative paths join
    /// beneath the version segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn parse_base_url(&self) -> Result<Url, Error> {
        let mut raw = self.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Url::parse(&raw).map_err(|e| Error::Config(format!("Invalid base URL: {e}")))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            request_timeout_secs: None,
            user_agent: None,
            debug: false,
        }
    }
}
