//! Custom error types for Hubcap with improved type safety and error handling.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Main error type for Hubcap operations.
#[derive(Error, Debug)]
pub enum HubcapError {
    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Caller-side request errors, detected before any network call
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // Network/transport errors
    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network request failed: {0}")]
    NetworkError(String),

    // Non-2xx responses from the GitHub API
    #[error("GitHub rejected {action}: status {status}: {message}")]
    Rejected {
        status: u16,
        message: String,
        action: String,
        rate_limited: bool,
        reset_at: Option<DateTime<Utc>>,
    },

    // Parsing errors - automatic conversions via #[from]
    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Regular expression error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] log::SetLoggerError),

    // Generic wrapper for other errors
    #[error(transparent)]
    Unexpected(#[from] color_eyre::Report),
}

/// Result type alias using HubcapError
pub type Result<T> = std::result::Result<T, HubcapError>;

impl HubcapError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Whether retrying this error with backoff could succeed.
    /// Invalid configuration and invalid requests must be fixed by the
    /// caller instead.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout(_)
                | Self::NetworkError(_)
                | Self::Rejected {
                    rate_limited: true,
                    ..
                }
        )
    }
}

// Implement From for std::io::Error - wraps in Unexpected for generic I/O errors
impl From<std::io::Error> for HubcapError {
    fn from(err: std::io::Error) -> Self {
        Self::Unexpected(color_eyre::Report::from(err))
    }
}

// Implement From for reqwest errors (network/transport)
impl From<reqwest::Error> for HubcapError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else {
            Self::NetworkError(err.to_string())
        }
    }
}

// Implement From for reqwest header errors (needs custom message)
impl From<reqwest::header::InvalidHeaderValue> for HubcapError {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        Self::InvalidConfig(format!("Invalid header value: {}", err))
    }
}
