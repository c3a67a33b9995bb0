//! Result types for a detection run

use dupe_domain::{AnnotationCommand, DuplicateRelation, DuplicateSet, IssueNumber, Mode};

/// What the relation builder produced
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    /// The judged duplicate links
    pub relation: DuplicateRelation,

    /// Number of oracle calls made
    pub comparisons: usize,

    /// Issues skipped as comparison sources because they were already flagged
    pub skipped_sources: Vec<IssueNumber>,
}

/// Everything decided by a run before anything is written back
#[derive(Debug, Clone)]
pub struct Detection {
    /// Mode the run used
    pub mode: Mode,

    /// Open issues fetched from the tracker
    pub issues_fetched: usize,

    /// Builder output, `None` when the corpus was too small to compare
    pub outcome: Option<BuildOutcome>,

    /// Duplicate sets in traversal order
    pub sets: Vec<DuplicateSet>,

    /// One command per non-empty duplicate set
    pub commands: Vec<AnnotationCommand>,
}

impl Detection {
    /// A run that stopped before comparing anything
    pub fn insufficient(mode: Mode, issues_fetched: usize) -> Self {
        Self {
            mode,
            issues_fetched,
            outcome: None,
            sets: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Count published as `duplicates-found`
    pub fn duplicates_found(&self) -> usize {
        self.outcome
            .as_ref()
            .map(|o| o.relation.annotated_count())
            .unwrap_or(0)
    }
}

/// An annotation the tracker refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationFailure {
    /// Issue that could not be annotated
    pub issue_number: IssueNumber,

    /// Tracker error message
    pub error: String,
}

/// Summary of a completed run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Mode the run used
    pub mode: Mode,

    /// Open issues fetched from the tracker
    pub issues_fetched: usize,

    /// Number of oracle calls made
    pub comparisons: usize,

    /// Issues skipped as comparison sources
    pub skipped_sources: Vec<IssueNumber>,

    /// Annotations written back
    pub commands_applied: usize,

    /// Annotations the tracker refused
    pub failures: Vec<AnnotationFailure>,

    /// Count published as `duplicates-found`
    pub duplicates_found: usize,
}
