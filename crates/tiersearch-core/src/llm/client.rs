//! HTTP client for the hosted completion API (OpenAI-compatible chat completions)

use crate::config::ServiceConfig;
use crate::error::{Result, TierSearchError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Trait for completion service clients
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Run one chat completion.
    ///
    /// Returns `Ok(None)` when the service answered but produced no usable
    /// content (no choices, or an empty message).
    async fn chat_completion(&self, request: CompletionRequest) -> Result<Option<String>>;
}

/// Chat message for completion requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// One completion call against one model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    fn into_answer(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.is_empty())
    }
}

/// Completion client speaking the `/chat/completions` protocol over HTTPS
pub struct HttpCompletionClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpCompletionClient {
    /// Create client from configuration; fails if no API key is configured
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let api_key = config.require_api_key()?.to_string();

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn chat_completion(&self, request: CompletionRequest) -> Result<Option<String>> {
        let start = Instant::now();
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TierSearchError::ExternalError(format!(
                "Completion service error (HTTP {}): {}",
                status, body
            )));
        }

        let chat_response: ChatResponse = response.json().await?;

        tracing::debug!(
            model = %request.model,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Completion finished"
        );

        Ok(chat_response.into_answer())
    }
}
