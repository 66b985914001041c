//! Narrative generator boundary — the single point of entry for external
//! model calls.
//!
//! ARCHITECTURAL RULE: no other module may call the Anthropic API directly.
//! The generator is invoked at most once per strategy-generation request
//! and never retried; any failure routes the caller to local synthesis.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all narrative calls.
/// Intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("narrative generator is not configured")]
    Unconfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("generator returned empty content")]
    EmptyContent,
}

/// The narrative generation seam. Carried in `AppState` as
/// `Arc<dyn NarrativeGenerator>` and swapped at startup via config.
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, GeneratorError>;

    /// Backend label for startup logs.
    fn backend(&self) -> &'static str;
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct GeneratorResponse {
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

impl GeneratorResponse {
    fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Claude-backed generator over the Anthropic Messages API.
#[derive(Clone)]
pub struct ClaudeGenerator {
    client: Client,
    api_key: String,
}

impl ClaudeGenerator {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }
}

#[async_trait]
impl NarrativeGenerator for ClaudeGenerator {
    /// Makes a single call to the Claude API and returns the narrative text.
    /// No retry: the caller's fallback path is cheaper than a second call.
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, GeneratorError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(GeneratorError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let generator_response: GeneratorResponse =
            response.json().await.map_err(GeneratorError::Http)?;

        debug!(
            "Narrative call succeeded: input_tokens={}, output_tokens={}",
            generator_response.usage.input_tokens, generator_response.usage.output_tokens
        );

        generator_response
            .text()
            .map(str::to_string)
            .filter(|t| !t.trim().is_empty())
            .ok_or(GeneratorError::EmptyContent)
    }

    fn backend(&self) -> &'static str {
        "claude"
    }
}

/// Stand-in generator used when no API key is configured. Always errs, so
/// every strategy request takes the local synthesis path.
pub struct DisabledGenerator;

#[async_trait]
impl NarrativeGenerator for DisabledGenerator {
    async fn generate(&self, _system: &str, _prompt: &str) -> Result<String, GeneratorError> {
        Err(GeneratorError::Unconfigured)
    }

    fn backend(&self) -> &'static str {
        "disabled"
    }
}
