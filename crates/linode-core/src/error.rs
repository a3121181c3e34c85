//! Error types for Linode API operations.
//!
//! Every failed call produces exactly one [`Error`]. Nothing is retried; the
//! caller decides what a failure means. The `Api` variant keeps the HTTP
//! status so callers can tell a missing resource (404) from other failures.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Main error type for Linode API operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Transport-level failure (connect, DNS, TLS, timeout)
    #[error("Request failed: {0}")]
    Request(String),

    /// The API answered with a non-2xx status
    #[error("API error {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Human-readable message assembled from the error envelope
        message: String,
    },

    /// Response body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Request payload could not be encoded
    #[error("Failed to serialize request: {0}")]
    Serialization(String),

    /// The caller's cancel signal fired before the call completed
    #[error("Request cancelled")]
    Cancelled,

    /// Client configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid endpoint
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Specialized result type for Linode API operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build an [`Error::Api`] from a status code and raw response body.
    #[must_use]
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        Self::Api {
            status: status.as_u16(),
            message: api_error_message(status, body),
        }
    }

    /// Returns true if the API reported the resource as missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }

    /// Returns true for any non-2xx API response.
    #[must_use]
    pub const fn is_api_error(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// Returns the HTTP status for API errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Request(_) => "REQUEST_ERROR",
            Self::Api { status: 404, .. } => "NOT_FOUND",
            Self::Api { .. } => "API_ERROR",
            Self::Decode(_) => "DECODE_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Cancelled => "CANCELLED",
            Self::Config(_) => "CONFIG_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }
}

/// Error envelope returned by the API on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    errors: Vec<ApiErrorReason>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorReason {
    reason: String,
    #[serde(default)]
    field: Option<String>,
}

/// Flatten an error envelope into a single message.
///
/// Falls back to the raw body, then to the status reason phrase, when the
/// body is not an error envelope.
fn api_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
        if !parsed.errors.is_empty() {
            return parsed
                .errors
                .iter()
                .map(|e| match &e.field {
                    Some(field) => format!("{field}: {}", e.reason),
                    None => e.reason.clone(),
                })
                .collect::<Vec<_>>()
                .join("; ");
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    } else {
        trimmed.to_string()
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}
