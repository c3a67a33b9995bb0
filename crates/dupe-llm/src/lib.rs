//! Dupe Similarity Oracle Layer
//!
//! Implementations of the `SimilarityOracle` trait from `dupe-domain`.
//!
//! # Oracles
//!
//! - `MockOracle`: Deterministic, scripted per issue pair, for testing
//! - `OpenAiOracle`: OpenAI chat-completions integration
//!
//! # Examples
//!
//! ```
//! use dupe_llm::MockOracle;
//! use dupe_domain::traits::SimilarityOracle;
//! use dupe_domain::Issue;
//!
//! let mut oracle = MockOracle::new("False");
//! oracle.add_verdict(1, 2, "True (92)");
//!
//! let (a, b, c) = (Issue::new(1), Issue::new(2), Issue::new(3));
//! assert_eq!(oracle.compare(&a, &b).unwrap(), "True (92)");
//! assert_eq!(oracle.compare(&a, &c).unwrap(), "False");
//! ```

#![warn(missing_docs)]

pub mod openai;
pub mod prompt;

use dupe_domain::traits::SimilarityOracle;
use dupe_domain::{Issue, IssueNumber};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

pub use openai::OpenAiOracle;
pub use prompt::{trim_text, ChatMessage, ComparisonPrompt, MAX_TEXT_LENGTH};

/// Errors that can occur while asking the oracle
///
/// Every variant is fatal for a detection run.
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// API key rejected
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// API key lacks access to the model or endpoint
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Invalid response from the API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

type PairKey = (IssueNumber, IssueNumber);

fn pair_key(a: IssueNumber, b: IssueNumber) -> PairKey {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Mock oracle for deterministic testing
///
/// Verdicts are scripted per unordered pair of issue numbers, so
/// `add_verdict(1, 2, ..)` answers both `compare(#1, #2)` and `compare(#2, #1)`.
/// Every call is recorded in order. Clones share the script and the call log.
#[derive(Debug, Clone)]
pub struct MockOracle {
    default_verdict: String,
    verdicts: Arc<Mutex<HashMap<PairKey, String>>>,
    failures: Arc<Mutex<HashSet<PairKey>>>,
    calls: Arc<Mutex<Vec<PairKey>>>,
}

impl MockOracle {
    /// Create a MockOracle answering `default_verdict` for unscripted pairs
    pub fn new(default_verdict: impl Into<String>) -> Self {
        Self {
            default_verdict: default_verdict.into(),
            verdicts: Arc::new(Mutex::new(HashMap::new())),
            failures: Arc::new(Mutex::new(HashSet::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Script the verdict for a pair
    pub fn add_verdict(&mut self, a: u64, b: u64, verdict: impl Into<String>) {
        lock(&self.verdicts).insert(pair_key(a.into(), b.into()), verdict.into());
    }

    /// Configure a pair to fail with an error
    pub fn add_failure(&mut self, a: u64, b: u64) {
        lock(&self.failures).insert(pair_key(a.into(), b.into()));
    }

    /// Number of comparisons made
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Compared pairs, in call order and in the orientation they were asked
    pub fn calls(&self) -> Vec<(IssueNumber, IssueNumber)> {
        lock(&self.calls).clone()
    }

    /// Forget recorded calls
    pub fn reset_calls(&self) {
        lock(&self.calls).clear();
    }
}

impl Default for MockOracle {
    fn default() -> Self {
        Self::new("False")
    }
}

impl SimilarityOracle for MockOracle {
    type Error = LlmError;

    fn compare(&self, a: &Issue, b: &Issue) -> Result<String, Self::Error> {
        lock(&self.calls).push((a.number, b.number));

        let key = pair_key(a.number, b.number);
        if lock(&self.failures).contains(&key) {
            return Err(LlmError::Other("Mock error".to_string()));
        }

        Ok(lock(&self.verdicts)
            .get(&key)
            .cloned()
            .unwrap_or_else(|| self.default_verdict.clone()))
    }
}
