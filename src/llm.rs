//! Chat completion client for OpenAI-compatible backends
//!
//! This module provides the [`ChatClient`] trait used by every pipeline
//! stage and an HTTP implementation targeting OpenAI-compatible
//! `/chat/completions` endpoints (DeepSeek and friends). Each call is a
//! single blocking round-trip: no caching, no retry, no backoff.

use crate::Result;
use crate::config::LlmConfig;
use crate::error::TripsmithError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

/// A chat completion backend.
///
/// `json_mode` requests a constrained JSON response format from the
/// backend; the adapter does not validate that the returned text actually
/// parses. That is the caller's responsibility.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send one prompt under the given system role and return the raw
    /// textual response.
    async fn complete(&self, prompt: &str, system_role: &str, json_mode: bool) -> Result<String>;
}

/// One chat message on the wire
#[derive(Debug, Clone, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

/// Response format constraint, sent only when JSON mode is requested
#[derive(Debug, Clone, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

/// Chat completion request body
#[derive(Debug, Clone, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// HTTP client for an OpenAI-compatible chat completion endpoint
pub struct ChatApiClient {
    /// HTTP client
    client: Client,
    /// Backend configuration
    config: LlmConfig,
}

impl ChatApiClient {
    /// Create a new chat API client
    pub fn new(config: LlmConfig) -> Result<Self> {
        if config.api_key.as_deref().is_none_or(str::is_empty) {
            return Err(TripsmithError::config(
                "Chat backend API key is required. Set TRIPSMITH_LLM__API_KEY or add it to config.toml.",
            ));
        }

        let timeout = Duration::from_secs(config.timeout_seconds.into());

        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Tripsmith/0.1.0")
            .build()
            .map_err(|e| TripsmithError::backend(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Build the API URL for chat completions
    fn api_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn build_request(&self, prompt: &str, system_role: &str, json_mode: bool) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_role.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt.to_string(),
                },
            ],
            temperature: self.config.temperature,
            response_format: json_mode.then_some(ResponseFormat {
                format_type: "json_object",
            }),
        }
    }
}

#[async_trait]
impl ChatClient for ChatApiClient {
    #[instrument(skip(self, prompt, system_role))]
    async fn complete(&self, prompt: &str, system_role: &str, json_mode: bool) -> Result<String> {
        let url = self.api_url();
        let request = self.build_request(prompt, system_role, json_mode);

        debug!(
            "Sending chat completion request ({} prompt chars, json_mode: {})",
            prompt.len(),
            json_mode
        );
        let start_time = Instant::now();

        let api_key = self.config.api_key.as_deref().unwrap_or_default();
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Chat completion request failed: {}", e);
                TripsmithError::backend(format!("Network error: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = match status.as_u16() {
                401 => "Invalid API key. Please check your chat backend API key.".to_string(),
                429 => "Rate limit or quota exceeded on the chat backend.".to_string(),
                _ => format!(
                    "Chat completion request failed with status: {} - {}",
                    status,
                    status.canonical_reason().unwrap_or("Unknown error")
                ),
            };
            error!("Chat backend returned HTTP {}: {}", status, message);
            return Err(TripsmithError::backend(message));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            error!("Failed to parse chat completion envelope: {}", e);
            TripsmithError::backend(format!("Invalid response envelope from chat backend: {e}"))
        })?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        if content.is_empty() {
            warn!("Chat backend returned an empty completion");
            return Err(TripsmithError::backend(
                "Chat backend returned an empty completion",
            ));
        }

        let total_duration = start_time.elapsed();
        info!(
            "Chat completion returned {} chars in {:.3}s",
            content.len(),
            total_duration.as_secs_f64()
        );

        if total_duration.as_secs() > 60 {
            warn!(
                "Slow chat backend response: {:.3}s",
                total_duration.as_secs_f64()
            );
        }

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> LlmConfig {
        LlmConfig {
            api_key: Some("test_key_12345678".to_string()),
            ..LlmConfig::default()
        }
    }

    #[test]
    fn test_client_requires_api_key() {
        let config = LlmConfig::default();
        let result = ChatApiClient::new(config);
        assert!(matches!(result, Err(TripsmithError::Config { .. })));
    }

    #[test]
    fn test_api_url_join() {
        let mut config = test_config();
        config.base_url = "https://api.deepseek.com/v1/".to_string();
        let client = ChatApiClient::new(config).unwrap();
        assert_eq!(client.api_url(), "https://api.deepseek.com/v1/chat/completions");
    }

    #[test]
    fn test_request_body_json_mode() {
        let client = ChatApiClient::new(test_config()).unwrap();
        let request = client.build_request("prompt", "role", true);
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["model"], "deepseek-chat");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "role");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "prompt");
        assert_eq!(body["response_format"]["type"], "json_object");
    }

    #[test]
    fn test_request_body_text_mode_omits_format() {
        let client = ChatApiClient::new(test_config()).unwrap();
        let request = client.build_request("prompt", "role", false);
        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("response_format").is_none());
    }

    #[test]
    fn test_response_envelope_parsing() {
        let raw = r#"{"choices": [{"message": {"role": "assistant", "content": "你好"}}]}"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("你好")
        );
    }
}
