//! Annotation emitter: renders duplicate sets into tracker commands

use dupe_domain::{AnnotationCommand, DuplicateSet, DUPLICATE_LABEL};

/// Turns duplicate sets into comment + label commands
#[derive(Debug, Clone)]
pub struct AnnotationEmitter {
    comment_header: String,
}

impl AnnotationEmitter {
    /// Create an emitter that opens every comment with `comment_header`
    pub fn new(comment_header: impl Into<String>) -> Self {
        Self {
            comment_header: comment_header.into(),
        }
    }

    /// One command per non-empty set, in set order
    pub fn emit(&self, sets: &[DuplicateSet]) -> Vec<AnnotationCommand> {
        sets.iter()
            .filter(|set| !set.is_empty())
            .map(|set| AnnotationCommand {
                issue_number: set.issue,
                comment_body: self.render_body(set),
                labels_to_add: vec![DUPLICATE_LABEL.to_string()],
            })
            .collect()
    }

    /// Comment body: the header, then one line per duplicate
    ///
    /// ```text
    /// <header>
    /// This is duplicate of #2 with 92% confidence.
    /// ```
    pub fn render_body(&self, set: &DuplicateSet) -> String {
        let mut body = self.comment_header.clone();
        for duplicate in &set.duplicates {
            body.push_str(&format!(
                "\nThis is duplicate of #{} with {} confidence.\n",
                duplicate.issue,
                duplicate.confidence.label()
            ));
        }
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dupe_domain::{Confidence, DuplicateOf, IssueNumber};

    fn set(issue: u64, dups: &[(u64, &str)]) -> DuplicateSet {
        DuplicateSet {
            issue: IssueNumber::new(issue),
            duplicates: dups
                .iter()
                .map(|(n, t)| DuplicateOf {
                    issue: IssueNumber::new(*n),
                    confidence: Confidence::from_token(t).unwrap(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_body_lists_every_duplicate() {
        let emitter = AnnotationEmitter::new("Possible duplicates:");
        let body = emitter.render_body(&set(1, &[(2, "92"), (3, "80")]));

        assert_eq!(
            body,
            "Possible duplicates:\
             \nThis is duplicate of #2 with 92% confidence.\n\
             \nThis is duplicate of #3 with 80% confidence.\n"
        );
    }

    #[test]
    fn test_emit_one_command_per_set() {
        let emitter = AnnotationEmitter::new("H");
        let commands = emitter.emit(&[set(1, &[(2, "92")]), set(2, &[(1, "92")])]);

        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0].issue_number, IssueNumber::new(1));
        assert_eq!(commands[1].issue_number, IssueNumber::new(2));
        assert!(commands
            .iter()
            .all(|c| c.labels_to_add == vec!["duplicate".to_string()]));
    }

    #[test]
    fn test_empty_sets_emit_nothing() {
        let emitter = AnnotationEmitter::new("H");
        assert!(emitter.emit(&[]).is_empty());
        assert!(emitter.emit(&[set(4, &[])]).is_empty());
    }

    #[test]
    fn test_comment_starts_with_header() {
        let emitter = AnnotationEmitter::new("Potential duplicates detected by dupe.");
        let commands = emitter.emit(&[set(10, &[(11, "70")])]);
        assert!(commands[0]
            .comment_body
            .starts_with("Potential duplicates detected by dupe.\nThis is duplicate of #11"));
    }
}
