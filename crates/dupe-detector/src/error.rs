//! Error types for the detector

use dupe_domain::{RelationError, UnsupportedMode};
use thiserror::Error;

/// Errors that abort a detection run
#[derive(Error, Debug)]
pub enum DetectorError {
    /// Similarity oracle failed (network, auth, quota)
    #[error("Oracle error: {0}")]
    Oracle(String),

    /// Issue tracker failed while fetching issues or checking flags
    #[error("Tracker error: {0}")]
    Tracker(String),

    /// A positive verdict carried no usable confidence value
    #[error("Malformed verdict: {0}")]
    MalformedVerdict(String),

    /// Mode selector other than `all` / `new`
    #[error("Unsupported mode {0}, abort")]
    UnsupportedMode(String),

    /// A judged link broke a relation invariant
    #[error("Invalid relation: {0}")]
    InvalidRelation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<UnsupportedMode> for DetectorError {
    fn from(e: UnsupportedMode) -> Self {
        DetectorError::UnsupportedMode(e.0)
    }
}

impl From<RelationError> for DetectorError {
    fn from(e: RelationError) -> Self {
        DetectorError::InvalidRelation(e.to_string())
    }
}
