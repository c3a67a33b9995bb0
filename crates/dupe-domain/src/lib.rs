//! Dupe Domain Layer
//!
//! This crate contains the domain model for duplicate issue detection.
//! It has ZERO external dependencies and defines the value objects, the
//! duplicate relation shapes, and the trait interfaces that the adapter
//! crates (tracker client, similarity oracle) implement.
//!
//! ## Key Concepts
//!
//! - **Issue**: A tracked ticket, identified by a stable number
//! - **Verdict**: Parsed outcome of one pairwise comparison
//! - **Relation**: The judged "same topic" links for one run, either a full
//!   undirected graph or a star around the newest issue
//! - **Annotation**: The comment + label instruction emitted for one issue
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - No I/O; every collaborator is reached through a trait in [`traits`]
//! - A relation is a value owned by the run that builds it

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod annotation;
pub mod issue;
pub mod mode;
pub mod relation;
pub mod traits;
pub mod verdict;

// Re-exports for convenience
pub use annotation::{AnnotationCommand, DuplicateOf, DuplicateSet, DUPLICATE_LABEL};
pub use issue::{Issue, IssueNumber};
pub use mode::{Mode, UnsupportedMode};
pub use relation::{DuplicateRelation, FullRelation, RelationError, StarRecord, StarRelation};
pub use verdict::{Confidence, Verdict};
