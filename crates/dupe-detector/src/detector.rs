//! Core duplicate detector

use crate::builder::RelationBuilder;
use crate::config::{DetectorConfig, MIN_CORPUS_SIZE};
use crate::emitter::AnnotationEmitter;
use crate::error::DetectorError;
use crate::traverser::traverse;
use crate::types::{AnnotationFailure, Detection, RunReport};
use dupe_domain::traits::{AnnotationSink, IssueSource, SimilarityOracle};
use dupe_domain::{AnnotationCommand, DuplicateRelation, Mode};
use std::fmt::Display;
use tracing::{debug, info, warn};

/// Runs one detection pass over a tracker
///
/// A run fetches the open issues, builds the duplicate relation for the
/// chosen mode, traverses it, and writes one annotation per affected issue.
/// Nothing is written back until every comparison has succeeded.
pub struct DuplicateDetector<O, T> {
    oracle: O,
    tracker: T,
    config: DetectorConfig,
}

impl<O, T> DuplicateDetector<O, T>
where
    O: SimilarityOracle,
    O::Error: Display,
    T: IssueSource + AnnotationSink,
    <T as IssueSource>::Error: Display,
    <T as AnnotationSink>::Error: Display,
{
    /// Create a new detector
    pub fn new(oracle: O, tracker: T, config: DetectorConfig) -> Self {
        Self {
            oracle,
            tracker,
            config,
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Tracker in use
    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    /// Detect duplicates and annotate them
    pub fn run(&self, mode: Mode) -> Result<RunReport, DetectorError> {
        let detection = self.detect(mode)?;

        let (commands_applied, failures) = if self.config.dry_run {
            info!("Dry run, {} annotations not applied", detection.commands.len());
            (0, Vec::new())
        } else {
            self.annotate(&detection.commands)
        };

        let (comparisons, skipped_sources) = detection
            .outcome
            .as_ref()
            .map(|o| (o.comparisons, o.skipped_sources.clone()))
            .unwrap_or_default();

        Ok(RunReport {
            mode,
            issues_fetched: detection.issues_fetched,
            comparisons,
            skipped_sources,
            commands_applied,
            failures,
            duplicates_found: detection.duplicates_found(),
        })
    }

    /// Fetch, compare and traverse without touching the tracker's issues
    pub fn detect(&self, mode: Mode) -> Result<Detection, DetectorError> {
        let issues = self
            .tracker
            .fetch_open_issues()
            .map_err(|e| DetectorError::Tracker(e.to_string()))?;

        if issues.len() < MIN_CORPUS_SIZE {
            if issues.is_empty() {
                info!("Zero issues retrieved, nothing to compare.");
            } else {
                info!("Less than 2 issues retrieved, cannot compare.");
            }
            return Ok(Detection::insufficient(mode, issues.len()));
        }

        info!("Comparing {} issues in '{}' mode", issues.len(), mode);

        let outcome = RelationBuilder::new(&self.oracle).build(&issues, mode, |number| {
            self.tracker.is_already_flagged(number)
        })?;

        if let DuplicateRelation::Full(graph) = &outcome.relation {
            if !graph.is_empty() {
                debug!("Duplicate graph:\n{}", graph.render_text());
            }
        }

        let sets = traverse(&outcome.relation);
        for set in &sets {
            let numbers: Vec<String> = set.numbers().iter().map(|n| format!("#{}", n)).collect();
            info!("Issue #{} duplicates: {}", set.issue, numbers.join(", "));
        }

        if outcome.relation.is_empty() {
            info!("No new duplicates found in graph.");
        }

        let commands = AnnotationEmitter::new(self.config.comment_header.clone()).emit(&sets);

        Ok(Detection {
            mode,
            issues_fetched: issues.len(),
            outcome: Some(outcome),
            sets,
            commands,
        })
    }

    /// Apply commands in order, comment before labels
    ///
    /// A refused write is logged and recorded; the remaining commands are
    /// still applied.
    pub fn annotate(&self, commands: &[AnnotationCommand]) -> (usize, Vec<AnnotationFailure>) {
        let mut applied = 0;
        let mut failures = Vec::new();

        for command in commands {
            match self.apply(command) {
                Ok(()) => {
                    applied += 1;
                    info!("Duplicate comment and label applied to #{}", command.issue_number);
                }
                Err(error) => {
                    warn!("Failed to annotate #{}: {}", command.issue_number, error);
                    failures.push(AnnotationFailure {
                        issue_number: command.issue_number,
                        error,
                    });
                }
            }
        }

        (applied, failures)
    }

    fn apply(&self, command: &AnnotationCommand) -> Result<(), String> {
        self.tracker
            .post_comment(command.issue_number, &command.comment_body)
            .map_err(|e| e.to_string())?;
        self.tracker
            .add_labels(command.issue_number, &command.labels_to_add)
            .map_err(|e| e.to_string())
    }
}
