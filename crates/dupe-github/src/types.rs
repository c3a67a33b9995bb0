//! Typed records for the GitHub REST payloads we read and write.

use crate::error::GitHubError;
use dupe_domain::Issue;
use serde::{Deserialize, Serialize};

/// Issue record from `GET /repos/{owner}/{repo}/issues`
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubIssue {
    /// Issue number
    pub number: u64,
    /// Title
    pub title: Option<String>,
    /// Markdown body
    pub body: Option<String>,
    /// Present only when the record is a pull request
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

impl GitHubIssue {
    /// Whether GitHub listed a pull request in the issues endpoint
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

impl From<GitHubIssue> for Issue {
    fn from(record: GitHubIssue) -> Self {
        Issue {
            number: record.number.into(),
            title: record.title,
            body: record.body,
        }
    }
}

/// Label record
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubLabel {
    /// Label name
    pub name: String,
}

/// Issue comment record
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubComment {
    /// Markdown body
    pub body: Option<String>,
}

/// Repository label to create when the duplicate label is missing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelDefinition {
    /// Label name
    pub name: String,
    /// Hex color without `#`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Short description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl LabelDefinition {
    /// Parse a label definition from its JSON form, e.g.
    /// `{"name":"duplicate","color":"cfd3d7","description":"This issue already exists"}`
    pub fn from_json(json: &str) -> Result<Self, GitHubError> {
        let label: LabelDefinition = serde_json::from_str(json)?;
        if label.name.trim().is_empty() {
            return Err(GitHubError::ConfigError("label name is empty".to_string()));
        }
        Ok(label)
    }
}

impl Default for LabelDefinition {
    fn default() -> Self {
        Self {
            name: "duplicate".to_string(),
            color: Some("cfd3d7".to_string()),
            description: Some("This issue or pull request already exists".to_string()),
        }
    }
}
