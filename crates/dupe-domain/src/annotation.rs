//! Annotation module - what gets written back to the tracker

use crate::{Confidence, IssueNumber};

/// Label applied to every annotated issue
pub const DUPLICATE_LABEL: &str = "duplicate";

/// One issue reported as a duplicate of another
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateOf {
    /// The other issue
    pub issue: IssueNumber,

    /// Confidence of the link between the two
    pub confidence: Confidence,
}

/// Everything one issue must be declared a duplicate of
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateSet {
    /// The issue being annotated
    pub issue: IssueNumber,

    /// Its duplicates, in traversal order
    pub duplicates: Vec<DuplicateOf>,
}

impl DuplicateSet {
    /// Issue numbers of the duplicates
    pub fn numbers(&self) -> Vec<IssueNumber> {
        self.duplicates.iter().map(|d| d.issue).collect()
    }

    /// Whether there is nothing to annotate
    pub fn is_empty(&self) -> bool {
        self.duplicates.is_empty()
    }
}

/// Comment + label instruction for a single issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationCommand {
    /// Issue to annotate
    pub issue_number: IssueNumber,

    /// Full comment body
    pub comment_body: String,

    /// Labels to add
    pub labels_to_add: Vec<String>,
}
