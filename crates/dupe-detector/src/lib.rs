//! Dupe Detector
//!
//! Finds open issues that describe the same topic and annotates them.
//!
//! # Overview
//!
//! A run takes the open issues of a tracker, asks a similarity oracle about
//! pairs of them, and records every positive verdict in a duplicate relation.
//! Two modes decide which pairs are asked:
//!
//! - **all** ([`Mode::Full`]): every unordered pair, building an undirected
//!   graph. Duplicates are transitive: every issue in a connected component is
//!   reported as a duplicate of every other.
//! - **new** ([`Mode::Star`]): only the newest issue against each older one.
//!   Only the newest issue is annotated.
//!
//! Issues that already carry the duplicate label or a bot comment are never
//! used as a comparison source.
//!
//! # Architecture
//!
//! ```text
//! IssueSource → RelationBuilder ⇄ SimilarityOracle
//!                    ↓
//!               traverse → AnnotationEmitter → AnnotationSink
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use dupe_detector::{DetectorConfig, DuplicateDetector};
//! use dupe_domain::Mode;
//! use dupe_github::{GitHubClient, LabelDefinition};
//! use dupe_llm::OpenAiOracle;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DetectorConfig::default();
//! let tracker = GitHubClient::new(
//!     "octo/repo",
//!     "ghp_token",
//!     LabelDefinition::default(),
//!     config.comment_header.clone(),
//! )?;
//! let oracle = OpenAiOracle::new("sk-key", "gpt-4o-mini")?;
//!
//! let detector = DuplicateDetector::new(oracle, tracker, config);
//! let report = detector.run("all".parse::<Mode>()?)?;
//!
//! println!("duplicates-found={}", report.duplicates_found);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod builder;
mod config;
mod detector;
mod emitter;
mod error;
mod traverser;
mod types;
mod verdict;


pub use builder::RelationBuilder;
pub use config::{DetectorConfig, DEFAULT_COMMENT_HEADER, MIN_CORPUS_SIZE};
pub use detector::DuplicateDetector;
pub use dupe_domain::Mode;
pub use emitter::AnnotationEmitter;
pub use error::DetectorError;
pub use traverser::traverse;
pub use types::{AnnotationFailure, BuildOutcome, Detection, RunReport};
pub use verdict::{parse_verdict, DUPLICATE_MARKER};
