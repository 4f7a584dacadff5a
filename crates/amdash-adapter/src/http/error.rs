/*
[INPUT]:  Error sources (HTTP, API, serialization, validation, auth)
[OUTPUT]: Structured error types with context
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Backend messages that mean "nothing here yet" when sent with a 4xx
const MISSING_RESOURCE_MESSAGES: [&str; 3] =
    ["Track not found", "No submissions found", "Mentor not found"];

/// Main error type for the mentorship API adapter
#[derive(Error, Debug)]
pub enum AmdashError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error (code {code}): {message}")]
    Api { code: u16, message: String },

    /// Requested resource does not exist (track, submissions, mentor)
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// OTP verification or role check failed
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Input rejected before it reached the network
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection timeout
    #[error("Connection timeout after {duration}s")]
    Timeout { duration: u64 },
}

impl AmdashError {
    /// Missing-resource errors are rendered as empty data, not failures
    pub fn is_not_found(&self) -> bool {
        match self {
            AmdashError::NotFound { .. } => true,
            AmdashError::Http(err) => err.status() == Some(StatusCode::NOT_FOUND),
            _ => false,
        }
    }

    /// Check if error indicates authentication failure
    pub fn is_auth_error(&self) -> bool {
        matches!(self, AmdashError::Authentication { .. })
            || matches!(self, AmdashError::Api { code, .. } if *code == 401 || *code == 403)
    }

    /// Create an error from a non-success status code and response body.
    ///
    /// 404s become `NotFound`, as do other 4xx bodies carrying one of the
    /// backend's missing-resource messages. Server errors never do.
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let missing = status.is_client_error()
            && MISSING_RESOURCE_MESSAGES
                .iter()
                .any(|known| message.contains(known));
        if status == StatusCode::NOT_FOUND || missing {
            return AmdashError::NotFound { message };
        }
        AmdashError::Api {
            code: status.as_u16(),
            message,
        }
    }
}

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, AmdashError>;

/// Collapse a not-found error into an empty value, propagating the rest.
pub fn or_empty<T: Default>(result: Result<T>) -> Result<T> {
    match result {
        Err(err) if err.is_not_found() => {
            tracing::debug!(error = %err, "resource not found; using empty result");
            Ok(T::default())
        }
        other => other,
    }
}
