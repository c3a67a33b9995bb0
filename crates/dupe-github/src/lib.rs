//! Dupe GitHub Client
//!
//! Issue tracker adapter over the GitHub REST API. Implements the
//! `IssueSource` and `AnnotationSink` traits from `dupe-domain`.
//!
//! # Example
//!
//! ```no_run
//! use dupe_domain::traits::IssueSource;
//! use dupe_github::{GitHubClient, LabelDefinition};
//!
//! let client = GitHubClient::new(
//!     "octo-org/octo-repo",
//!     "ghp_...",
//!     LabelDefinition::default(),
//!     "Potential duplicates detected by dupe.",
//! )
//! .expect("Failed to build client");
//!
//! client.ensure_duplicate_label().expect("Failed to check labels");
//! let issues = client.fetch_open_issues().expect("Failed to fetch issues");
//! ```

#![warn(missing_docs)]

mod client;
mod error;
mod types;

pub use client::{GitHubClient, DEFAULT_API_URL};
pub use error::GitHubError;
pub use types::{GitHubComment, GitHubIssue, GitHubLabel, LabelDefinition};
