//! GitHub REST client implementation.

use crate::error::GitHubError;
use crate::types::{GitHubComment, GitHubIssue, GitHubLabel, LabelDefinition};
use dupe_domain::traits::{AnnotationSink, IssueSource};
use dupe_domain::{Issue, IssueNumber};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

/// Public GitHub API root
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("dupe/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// GitHub issue tracker client for one repository
pub struct GitHubClient {
    api_url: String,
    owner_repo: String,
    label: LabelDefinition,
    comment_header: String,
    http: Client,
}

impl GitHubClient {
    /// Create a client for `owner/repo`
    ///
    /// `label` is the duplicate label looked for (and created if missing);
    /// `comment_header` is the text that opens every bot annotation comment.
    pub fn new(
        owner_repo: impl Into<String>,
        token: &str,
        label: LabelDefinition,
        comment_header: impl Into<String>,
    ) -> Result<Self, GitHubError> {
        let owner_repo = owner_repo.into();
        let valid = owner_repo
            .split_once('/')
            .is_some_and(|(owner, repo)| !owner.is_empty() && !repo.is_empty() && !repo.contains('/'));
        if !valid {
            return Err(GitHubError::ConfigError(format!(
                "repository must be 'owner/repo', got '{}'",
                owner_repo
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            HeaderName::from_static("x-github-api-version"),
            HeaderValue::from_static(API_VERSION),
        );
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| GitHubError::ConfigError(format!("Invalid token: {}", e)))?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| GitHubError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_url: DEFAULT_API_URL.to_string(),
            owner_repo,
            label,
            comment_header: comment_header.into(),
            http,
        })
    }

    /// Use another API root (GitHub Enterprise, tests)
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Duplicate label definition in use
    pub fn label(&self) -> &LabelDefinition {
        &self.label
    }

    fn repo_url(&self, path: &str) -> String {
        format!("{}/repos/{}{}", self.api_url, self.owner_repo, path)
    }

    fn send(&self, request: RequestBuilder) -> Result<Response, GitHubError> {
        let response = request.send()?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .unwrap_or_else(|_| "Unknown error".to_string());
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or(body);

        Err(match status {
            StatusCode::UNAUTHORIZED => GitHubError::AuthError(message),
            _ => GitHubError::ApiError {
                status: status.as_u16(),
                message,
            },
        })
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, GitHubError> {
        debug!("GET {}", url);
        let response = self.send(self.http.get(url))?;
        Ok(response.json()?)
    }

    fn post_json<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<(), GitHubError> {
        debug!("POST {}", url);
        self.send(self.http.post(url).json(body))?;
        Ok(())
    }

    /// Open issues, newest first, pull requests excluded
    pub fn list_open_issues(&self) -> Result<Vec<GitHubIssue>, GitHubError> {
        let records: Vec<GitHubIssue> =
            self.get_json(&self.repo_url("/issues?state=open&per_page=100"))?;
        Ok(records.into_iter().filter(|r| !r.is_pull_request()).collect())
    }

    /// Labels attached to an issue
    pub fn issue_labels(&self, number: IssueNumber) -> Result<Vec<GitHubLabel>, GitHubError> {
        self.get_json(&self.repo_url(&format!("/issues/{}/labels", number)))
    }

    /// Comments on an issue
    pub fn issue_comments(&self, number: IssueNumber) -> Result<Vec<GitHubComment>, GitHubError> {
        self.get_json(&self.repo_url(&format!("/issues/{}/comments", number)))
    }

    /// Whether the issue carries a label whose name contains the duplicate label name
    pub fn has_duplicate_label(&self, number: IssueNumber) -> Result<bool, GitHubError> {
        Ok(self
            .issue_labels(number)?
            .iter()
            .any(|l| l.name.contains(&self.label.name)))
    }

    /// Whether the issue has a comment containing the bot comment header
    pub fn has_duplicate_comment(&self, number: IssueNumber) -> Result<bool, GitHubError> {
        Ok(self.issue_comments(number)?.iter().any(|c| {
            c.body
                .as_deref()
                .is_some_and(|body| body.contains(&self.comment_header))
        }))
    }

    /// Make sure the repository has the duplicate label, creating it if missing
    ///
    /// Returns `true` when the label had to be created.
    pub fn ensure_duplicate_label(&self) -> Result<bool, GitHubError> {
        let labels: Vec<GitHubLabel> = self.get_json(&self.repo_url("/labels?per_page=100"))?;
        if labels.iter().any(|l| l.name.contains(&self.label.name)) {
            return Ok(false);
        }

        self.post_json(&self.repo_url("/labels"), &self.label)?;
        info!("Created repository label '{}'", self.label.name);
        Ok(true)
    }
}

impl IssueSource for GitHubClient {
    type Error = GitHubError;

    fn fetch_open_issues(&self) -> Result<Vec<Issue>, Self::Error> {
        let issues: Vec<Issue> = self
            .list_open_issues()?
            .into_iter()
            .map(Issue::from)
            .collect();
        info!("Retrieved {} open issues from {}", issues.len(), self.owner_repo);
        Ok(issues)
    }

    fn is_already_flagged(&self, number: IssueNumber) -> Result<bool, Self::Error> {
        Ok(self.has_duplicate_label(number)? || self.has_duplicate_comment(number)?)
    }
}

impl AnnotationSink for GitHubClient {
    type Error = GitHubError;

    fn post_comment(&self, number: IssueNumber, body: &str) -> Result<(), Self::Error> {
        self.post_json(
            &self.repo_url(&format!("/issues/{}/comments", number)),
            &serde_json::json!({ "body": body }),
        )
    }

    fn add_labels(&self, number: IssueNumber, labels: &[String]) -> Result<(), Self::Error> {
        if labels.is_empty() {
            return Ok(());
        }
        self.post_json(
            &self.repo_url(&format!("/issues/{}/labels", number)),
            &serde_json::json!({ "labels": labels }),
        )
    }
}
