//! Error types for the GitHub client.

use thiserror::Error;

/// GitHub client errors
#[derive(Debug, Error)]
pub enum GitHubError {
    /// Connection error (network, DNS, timeout)
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Non-success response from the API
    #[error("GitHub API error: HTTP {status}: {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Message from the response body
        message: String,
    },

    /// Token missing, expired or rejected
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Response body did not match the expected shape
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<reqwest::Error> for GitHubError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            GitHubError::ConnectionError(e.to_string())
        } else if e.is_decode() {
            GitHubError::DecodeError(e.to_string())
        } else if let Some(status) = e.status() {
            GitHubError::ApiError {
                status: status.as_u16(),
                message: e.to_string(),
            }
        } else {
            GitHubError::ConnectionError(e.to_string())
        }
    }
}

impl From<serde_json::Error> for GitHubError {
    fn from(e: serde_json::Error) -> Self {
        GitHubError::DecodeError(format!("JSON parsing error: {}", e))
    }
}
