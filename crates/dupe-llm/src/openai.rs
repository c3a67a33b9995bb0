//! OpenAI Oracle Implementation
//!
//! Judges issue similarity through the OpenAI chat-completions API.
//!
//! # Features
//!
//! - Blocking HTTP communication (the detection core is sequential)
//! - Configurable endpoint, model and field truncation
//! - Failure classes mapped to [`LlmError`] variants; no retries
//!
//! # Examples
//!
//! ```no_run
//! use dupe_llm::OpenAiOracle;
//!
//! let oracle = OpenAiOracle::new("sk-...", "gpt-4o-mini").unwrap();
//! ```

use crate::prompt::{ChatMessage, ComparisonPrompt, MAX_TEXT_LENGTH};
use crate::LlmError;
use dupe_domain::traits::SimilarityOracle;
use dupe_domain::Issue;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default chat-completions endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Default model
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default timeout for one comparison (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// OpenAI-backed similarity oracle
pub struct OpenAiOracle {
    endpoint: String,
    model: String,
    api_key: String,
    max_text_length: usize,
    client: reqwest::blocking::Client,
}

/// Request body for the chat-completions API
#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

/// Response from the chat-completions API
#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

impl OpenAiOracle {
    /// Create a new oracle
    ///
    /// # Parameters
    ///
    /// - `api_key`: OpenAI API key, sent as a bearer token
    /// - `model`: Chat model to use (e.g., "gpt-4o-mini")
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| LlmError::Communication(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: model.into(),
            api_key: api_key.into(),
            max_text_length: MAX_TEXT_LENGTH,
            client,
        })
    }

    /// Point the oracle at another chat-completions URL (proxies, Azure, tests)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the per-field truncation length
    pub fn with_max_text_length(mut self, max_text_length: usize) -> Self {
        self.max_text_length = max_text_length;
        self
    }

    /// Model in use
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a message list and return the first choice's content
    ///
    /// # Errors
    ///
    /// - `Authentication` on HTTP 401
    /// - `PermissionDenied` on HTTP 403
    /// - `ModelNotAvailable` on HTTP 404
    /// - `RateLimitExceeded` on HTTP 429
    /// - `Communication` on transport failures and any other status
    /// - `InvalidResponse` when the body cannot be decoded or has no content
    pub fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let request_body = CompletionRequest {
            model: &self.model,
            messages,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(self.status_error(status, &error_text));
        }

        let completion: CompletionResponse = response
            .json()
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("Response has no message content".to_string()))
    }

    fn status_error(&self, status: StatusCode, body: &str) -> LlmError {
        let message = serde_json::from_str::<ApiErrorResponse>(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| body.to_string());

        match status {
            StatusCode::UNAUTHORIZED => LlmError::Authentication(message),
            StatusCode::FORBIDDEN => LlmError::PermissionDenied(message),
            StatusCode::NOT_FOUND => LlmError::ModelNotAvailable(self.model.clone()),
            StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded,
            _ => LlmError::Communication(format!("HTTP {}: {}", status, message)),
        }
    }
}

impl SimilarityOracle for OpenAiOracle {
    type Error = LlmError;

    fn compare(&self, a: &Issue, b: &Issue) -> Result<String, Self::Error> {
        let messages = ComparisonPrompt::new(a, b)
            .with_max_text_length(self.max_text_length)
            .build();

        debug!("Comparing #{} with #{} using {}", a.number, b.number, self.model);
        self.complete(&messages)
    }
}
