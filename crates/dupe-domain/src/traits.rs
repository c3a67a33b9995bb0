//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the duplicate-detection core
//! and infrastructure. Implementations live in other crates.

use crate::{Issue, IssueNumber};

/// Pairwise similarity judgement
///
/// Implemented by the infrastructure layer (dupe-llm)
pub trait SimilarityOracle {
    /// Error type for oracle calls
    type Error;

    /// Compare two issues and return the oracle's free-text verdict
    fn compare(&self, a: &Issue, b: &Issue) -> Result<String, Self::Error>;
}

/// Read side of the issue tracker
///
/// Implemented by the infrastructure layer (dupe-github)
pub trait IssueSource {
    /// Error type for tracker reads
    type Error;

    /// Fetch open issues; index 0 is the most recently listed issue
    fn fetch_open_issues(&self) -> Result<Vec<Issue>, Self::Error>;

    /// Whether an issue already carries the duplicate label or a bot annotation comment
    fn is_already_flagged(&self, number: IssueNumber) -> Result<bool, Self::Error>;
}

/// Write side of the issue tracker
///
/// Implemented by the infrastructure layer (dupe-github)
pub trait AnnotationSink {
    /// Error type for tracker writes
    type Error;

    /// Post a comment on an issue
    fn post_comment(&self, number: IssueNumber, body: &str) -> Result<(), Self::Error>;

    /// Add labels to an issue
    fn add_labels(&self, number: IssueNumber, labels: &[String]) -> Result<(), Self::Error>;
}
