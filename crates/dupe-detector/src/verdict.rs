//! Parse free-text oracle output into a verdict

use crate::error::DetectorError;
use dupe_domain::{Confidence, Verdict};
use regex::Regex;
use std::sync::OnceLock;

/// Token that marks a positive verdict (case-sensitive)
pub const DUPLICATE_MARKER: &str = "True";

static CONFIDENCE_TOKEN: OnceLock<Regex> = OnceLock::new();

fn confidence_token() -> &'static Regex {
    CONFIDENCE_TOKEN
        .get_or_init(|| Regex::new(r"\d+(?:\.\d+)?").expect("confidence regex compiles"))
}

/// Interpret one oracle reply
///
/// Any reply containing `True` is a duplicate whose confidence is the first
/// integer or decimal number in the text. Everything else, including the
/// empty string and `"False"`, is a distinct verdict. A positive reply with
/// no number, or with a number outside `[0, 100]`, is malformed.
///
/// ```
/// use dupe_detector::parse_verdict;
///
/// let verdict = parse_verdict("True, 87%").unwrap();
/// assert_eq!(verdict.confidence().map(|c| c.label()), Some("87%".to_string()));
/// assert!(!parse_verdict("False, 20%").unwrap().is_duplicate());
/// ```
pub fn parse_verdict(raw: &str) -> Result<Verdict, DetectorError> {
    if !raw.contains(DUPLICATE_MARKER) {
        return Ok(Verdict::Distinct);
    }

    let token = confidence_token().find(raw).ok_or_else(|| {
        DetectorError::MalformedVerdict(format!("no confidence value in '{}'", raw))
    })?;

    let confidence = Confidence::from_token(token.as_str()).map_err(DetectorError::MalformedVerdict)?;
    Ok(Verdict::Duplicate(confidence))
}
