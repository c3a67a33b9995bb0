//! Comparison prompt sent to the chat model

use dupe_domain::Issue;
use serde::Serialize;

/// Maximum characters kept from each issue field
pub const MAX_TEXT_LENGTH: usize = 500;

const SYSTEM_PROMPT: &str = "You are a senior software developer.";

const TASK_INSTRUCTION: &str =
    "Detect if these 2 software issues are about the same topic so they can be labeled as duplicate.";

const FORMAT_INSTRUCTION: &str =
    "Simply reply False if they are not, and True (x) if they are, where x is the confidence percentage value.";

/// One chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    /// `system`, `user` or `assistant`
    pub role: String,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Keep at most `max_chars` characters of an optional field
///
/// Counts characters, not bytes, so multi-byte text is never split.
pub fn trim_text(text: Option<&str>, max_chars: usize) -> String {
    text.map(|t| t.chars().take(max_chars).collect())
        .unwrap_or_default()
}

/// Builds the message list for one pairwise comparison
pub struct ComparisonPrompt<'a> {
    a: &'a Issue,
    b: &'a Issue,
    max_text_length: usize,
}

impl<'a> ComparisonPrompt<'a> {
    /// Create a prompt for issues `a` and `b`
    pub fn new(a: &'a Issue, b: &'a Issue) -> Self {
        Self {
            a,
            b,
            max_text_length: MAX_TEXT_LENGTH,
        }
    }

    /// Override the per-field truncation length
    pub fn with_max_text_length(mut self, max_text_length: usize) -> Self {
        self.max_text_length = max_text_length;
        self
    }

    fn topic(&self, tag: &str, issue: &Issue) -> String {
        format!(
            "Topic {}: {}. {}",
            tag,
            trim_text(issue.title.as_deref(), self.max_text_length),
            trim_text(issue.body.as_deref(), self.max_text_length)
        )
    }

    /// Build the complete message list
    pub fn build(&self) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(TASK_INSTRUCTION),
            ChatMessage::user(FORMAT_INSTRUCTION),
            ChatMessage::user(self.topic("A", self.a)),
            ChatMessage::user(self.topic("B", self.b)),
        ]
    }
}
