//! Issue module - the tickets being compared

use std::fmt;

/// Stable tracker identifier of an issue (the number shown after `#`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IssueNumber(u64);

impl IssueNumber {
    /// Create an issue number from its raw value
    ///
    /// # Examples
    ///
    /// ```
    /// use dupe_domain::IssueNumber;
    ///
    /// let number = IssueNumber::new(42);
    /// assert_eq!(number.value(), 42);
    /// assert_eq!(number.to_string(), "42");
    /// ```
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for IssueNumber {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for IssueNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An open issue as fetched from the tracker at the start of a run
///
/// The core only ever reads issues. Title and body may be absent on the
/// tracker side; both are kept as `Option` so the oracle can decide how to
/// render a missing field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Tracker number
    pub number: IssueNumber,

    /// Issue title
    pub title: Option<String>,

    /// Issue body (markdown)
    pub body: Option<String>,
}

impl Issue {
    /// Create an issue with no title and no body
    pub fn new(number: u64) -> Self {
        Self {
            number: IssueNumber::new(number),
            title: None,
            body: None,
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the body
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Title, or the empty string when absent
    pub fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// Body, or the empty string when absent
    pub fn body_or_empty(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_builder() {
        let issue = Issue::new(7)
            .with_title("Crash on start")
            .with_body("Stack trace attached");

        assert_eq!(issue.number, IssueNumber::new(7));
        assert_eq!(issue.title_or_empty(), "Crash on start");
        assert_eq!(issue.body_or_empty(), "Stack trace attached");
    }

    #[test]
    fn test_missing_fields_render_empty() {
        let issue = Issue::new(3);
        assert_eq!(issue.title_or_empty(), "");
        assert_eq!(issue.body_or_empty(), "");
    }

    #[test]
    fn test_issue_number_ordering() {
        assert!(IssueNumber::new(1) < IssueNumber::new(2));
        assert_eq!(IssueNumber::from(9), IssueNumber::new(9));
    }
}
