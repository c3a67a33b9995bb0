//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Mode selector other than `all` / `new`
    #[error("{0}")]
    Mode(#[from] dupe_domain::UnsupportedMode),

    /// Detection run failed
    #[error("{0}")]
    Detector(#[from] dupe_detector::DetectorError),

    /// GitHub client error
    #[error("GitHub error: {0}")]
    GitHub(#[from] dupe_github::GitHubError),

    /// Similarity oracle error
    #[error("Oracle error: {0}")]
    Llm(#[from] dupe_llm::LlmError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}
