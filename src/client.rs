//! Chat-completion client for the reframe pipeline.
//!
//! One outbound call per invocation, no retries at this layer; retry
//! policy belongs to the caller, which re-enters the full pipeline.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::CompletionConfig;
use crate::error::{ReframeError, Result};

/// Seam between the orchestrator and the completion endpoint.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send a two-message (system + user) request and return the raw
    /// completion text. No post-processing happens here.
    async fn complete(&self, system_prompt: &str, thought: &str) -> Result<String>;
}

fn user_message(thought: &str) -> String {
    format!(
        "Please help me reframe this negative thought: \"{}\"",
        thought
    )
}

// OpenAI-compatible chat-completions implementation
#[derive(Debug)]
pub struct OpenAiCompletion {
    client: reqwest::Client,
    api_key: String,
    config: CompletionConfig,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorBody>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl OpenAiCompletion {
    /// Build the client, failing with a Config error when no credential is
    /// present. The check happens here, before any network attempt.
    pub fn new(config: CompletionConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| ReframeError::Config {
                message: "OPENAI_API_KEY is not set".to_string(),
            })?;
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ReframeError::Config {
                message: format!("failed to build HTTP client: {}", e),
            })?;
        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    /// Upstream error bodies carry `{"error":{"message":...}}`; fall back
    /// to the raw body when that shape does not parse.
    fn upstream_message(body: &str) -> String {
        serde_json::from_str::<ErrorEnvelope>(body)
            .ok()
            .and_then(|e| e.error)
            .map(|e| e.message)
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    "Unknown error".to_string()
                } else {
                    body.trim().to_string()
                }
            })
    }
}

#[async_trait]
impl CompletionBackend for OpenAiCompletion {
    async fn complete(&self, system_prompt: &str, thought: &str) -> Result<String> {
        debug!(
            model = %self.config.model,
            thought_chars = thought.len(),
            "requesting completion"
        );

        let user_content = user_message(thought);
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &user_content,
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = Self::upstream_message(&text);
            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                return Err(ReframeError::RateLimit { message });
            }
            return Err(ReframeError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ChatResponse =
            response
                .json()
                .await
                .map_err(|e| ReframeError::Upstream {
                    status: status.as_u16(),
                    message: format!("malformed response envelope: {}", e),
                })?;

        envelope
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(ReframeError::EmptyResponse)
    }
}

// Deterministic, local backend for tests/dev (no network)
pub struct FixedCompletion {
    body: String,
}

impl FixedCompletion {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

impl Default for FixedCompletion {
    fn default() -> Self {
        Self::new(
            "Your feelings make sense, and this thought is not the whole story.\n\n\
             **Reframed thought:** \"I can meet this moment with patience and effort\"",
        )
    }
}

#[async_trait]
impl CompletionBackend for FixedCompletion {
    async fn complete(&self, _system_prompt: &str, _thought: &str) -> Result<String> {
        Ok(self.body.clone())
    }
}

/// Choose a backend from the environment-derived config.
///
/// `REFRAME_FAKE_COMPLETION=1|true` selects the deterministic local
/// backend; otherwise a missing credential is a Config error at first use,
/// never a silent fallback.
pub fn create_backend(config: &CompletionConfig) -> Result<Arc<dyn CompletionBackend>> {
    let is_true = |s: &str| s == "1" || s.eq_ignore_ascii_case("true");
    if std::env::var("REFRAME_FAKE_COMPLETION").is_ok_and(|v| is_true(&v)) {
        info!("Using FixedCompletion (deterministic, no network)");
        return Ok(Arc::new(FixedCompletion::default()));
    }
    info!(model = %config.model, "Using chat-completions backend");
    Ok(Arc::new(OpenAiCompletion::new(config.clone())?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_completion_is_deterministic() {
        let backend = FixedCompletion::new("same text every time");
        let a = backend.complete("sys", "thought").await.unwrap();
        let b = backend.complete("sys", "thought").await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a, "same text every time");
    }

    #[test]
    fn missing_key_is_a_config_error() {
        let config = CompletionConfig::default();
        assert!(config.api_key.is_none());
        let err = OpenAiCompletion::new(config).unwrap_err();
        assert!(matches!(err, ReframeError::Config { .. }));
    }

    #[test]
    fn user_message_quotes_the_thought() {
        assert_eq!(
            user_message("I'm stuck"),
            "Please help me reframe this negative thought: \"I'm stuck\""
        );
    }

    #[test]
    fn upstream_message_prefers_error_envelope() {
        let body = r#"{"error":{"message":"model overloaded"}}"#;
        assert_eq!(OpenAiCompletion::upstream_message(body), "model overloaded");
        assert_eq!(OpenAiCompletion::upstream_message("plain text"), "plain text");
        assert_eq!(OpenAiCompletion::upstream_message("  "), "Unknown error");
    }
}
