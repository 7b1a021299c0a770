//! Claude API client for structured generation.
//!
//! Provides non-streaming access to the Anthropic Messages API. Structured
//! replies are requested by offering a single tool and forcing Claude to call
//! it; the tool input is the reply.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::instrument;

use crate::config::ClaudeConfig;

use super::error::{ApiErrorResponse, ClaudeError};
use super::types::{ChatRequest, ChatResponse, Message, StopReason, Tool, ToolChoice};
use super::{OutputSchema, StructuredGenerator};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Claude API client.
#[derive(Clone)]
pub struct ClaudeClient {
    inner: Arc<ClaudeClientInner>,
}

struct ClaudeClientInner {
    client: reqwest::Client,
    model: String,
    messages_url: String,
}

impl ClaudeClient {
    /// Create a new Claude client.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not a valid header value or the
    /// HTTP client fails to build.
    pub fn new(config: &ClaudeConfig) -> Result<Self, ClaudeError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(config.api_key.expose_secret()).map_err(|_| {
                ClaudeError::Unauthorized("API key contains invalid header characters".to_string())
            })?,
        );
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(ClaudeClientInner {
                client,
                model: config.model.clone(),
                messages_url: format!("{}/v1/messages", config.api_url.trim_end_matches('/')),
            }),
        })
    }

    /// Send a chat request and get a complete response.
    ///
    /// # Arguments
    ///
    /// * `messages` - Conversation history
    /// * `tools` - Optional list of available tools
    /// * `tool_choice` - Optional tool selection policy
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self, messages, tools), fields(model = %self.inner.model))]
    pub async fn chat(
        &self,
        messages: Vec<Message>,
        tools: Option<Vec<Tool>>,
        tool_choice: Option<ToolChoice>,
    ) -> Result<ChatResponse, ClaudeError> {
        let request = ChatRequest {
            model: self.inner.model.clone(),
            max_tokens: DEFAULT_MAX_TOKENS,
            messages,
            tools,
            tool_choice,
        };

        let response = self
            .inner
            .client
            .post(&self.inner.messages_url)
            .json(&request)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Handle a response, decoding success bodies and mapping error statuses.
    async fn handle_response(response: reqwest::Response) -> Result<ChatResponse, ClaudeError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body)
                .map_err(|e| ClaudeError::Parse(format!("Failed to parse response: {e}")))
        } else {
            Err(Self::handle_error_status(status, response).await)
        }
    }

    /// Handle an error status code.
    async fn handle_error_status(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ClaudeError {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return ClaudeError::RateLimited(retry_after);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return ClaudeError::Unauthorized("Invalid API key".to_string());
        }

        match response.text().await {
            Ok(body) => {
                if let Ok(api_error) = serde_json::from_str::<ApiErrorResponse>(&body) {
                    ClaudeError::Api {
                        error_type: api_error.error.error_type,
                        message: api_error.error.message,
                    }
                } else {
                    ClaudeError::Api {
                        error_type: "unknown".to_string(),
                        message: body,
                    }
                }
            }
            Err(e) => ClaudeError::Http(e),
        }
    }
}

#[async_trait]
impl StructuredGenerator for ClaudeClient {
    #[instrument(skip(self, prompt, output), fields(tool = output.name))]
    async fn generate(
        &self,
        prompt: &str,
        output: &OutputSchema,
    ) -> Result<Option<serde_json::Value>, ClaudeError> {
        let response = self
            .chat(
                vec![Message::user(prompt)],
                Some(vec![output.as_tool()]),
                Some(ToolChoice::Tool {
                    name: output.name.to_string(),
                }),
            )
            .await?;

        tracing::debug!(
            response_id = %response.id,
            model = %response.model,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "Claude response received"
        );

        if response.stop_reason == Some(StopReason::MaxTokens) {
            tracing::warn!(response_id = %response.id, "Claude response truncated at max tokens");
        }

        Ok(response.tool_input(output.name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn config(api_url: &str) -> ClaudeConfig {
        ClaudeConfig {
            api_key: SecretString::from("sk-ant-test-9fK2mQx7LpZ4"),
            model: "claude-sonnet-4-20250514".to_string(),
            api_url: api_url.to_string(),
        }
    }

    #[test]
    fn test_messages_url_trims_trailing_slash() {
        let client = ClaudeClient::new(&config("https://api.anthropic.com/")).expect("client");
        assert_eq!(
            client.inner.messages_url,
            "https://api.anthropic.com/v1/messages"
        );
    }

    #[test]
    fn test_invalid_header_key_rejected() {
        let mut config = config("https://api.anthropic.com");
        config.api_key = SecretString::from("bad\nkey");
        assert!(matches!(
            ClaudeClient::new(&config),
            Err(ClaudeError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_claude_client_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<ClaudeClient>();
    }

    #[test]
    fn test_claude_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ClaudeClient>();
    }
}
