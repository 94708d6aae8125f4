//! OpenAI-compatible provider implementation.
//!
//! Works with: OpenAI, OpenRouter, Ollama, vLLM, Together AI, and any
//! endpoint exposing `/v1/chat/completions`. The decision protocol rides
//! on plain message text, so requests carry no function-calling fields:
//! one non-streaming completion per call.

use async_trait::async_trait;
use benchhand_core::error::ProviderError;
use benchhand_core::message::{Role, Turn};
use benchhand_core::provider::{CompletionRequest, CompletionResponse, Provider, Usage};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// An OpenAI-compatible completion client.
///
/// This handles the vast majority of completion services since most expose
/// an OpenAI-compatible chat endpoint.
pub struct OpenAiCompatProvider {
    name: String,
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl OpenAiCompatProvider {
    /// Create a new OpenAI-compatible provider.
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {e}")))?;

        Ok(Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        })
    }

    /// Create an OpenAI provider (convenience constructor).
    pub fn openai(api_key: impl Into<String>) -> Result<Self, ProviderError> {
        Self::new("openai", "https://api.openai.com/v1", api_key)
    }

    /// Create an Ollama provider (convenience constructor).
    pub fn ollama(base_url: Option<&str>) -> Result<Self, ProviderError> {
        Self::new(
            "ollama",
            base_url.unwrap_or("http://localhost:11434/v1"),
            "ollama", // Ollama doesn't need a real key
        )
    }

    /// Convert transcript turns to OpenAI API format.
    fn to_api_messages(messages: &[Turn]) -> Vec<ApiMessage> {
        messages
            .iter()
            .map(|t| ApiMessage {
                role: match t.role {
                    Role::User => "user".into(),
                    Role::Assistant => "assistant".into(),
                    Role::System => "system".into(),
                },
                content: Some(t.content.clone()),
            })
            .collect()
    }
}

#[async_trait]
impl Provider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<CompletionResponse, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);

        let body = serde_json::json!({
            "model": request.model,
            "messages": Self::to_api_messages(&request.messages),
            "temperature": request.temperature,
            "stream": false,
        });

        debug!(provider = %self.name, model = %request.model, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(ProviderError::RateLimited {
                retry_after_secs: 5,
            });
        }

        if status == 401 || status == 403 {
            return Err(ProviderError::AuthenticationFailed(
                "Invalid API key or insufficient permissions".into(),
            ));
        }

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Provider returned error");
            return Err(ProviderError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_response: ApiResponse =
            response.json().await.map_err(|e| ProviderError::ApiError {
                status_code: 200,
                message: format!("Failed to parse response: {e}"),
            })?;

        let choice =
            api_response
                .choices
                .into_iter()
                .next()
                .ok_or_else(|| ProviderError::ApiError {
                    status_code: 200,
                    message: "No choices in response".into(),
                })?;

        let usage = api_response.usage.map(|u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(CompletionResponse {
            text: choice.message.content.unwrap_or_default(),
            usage,
            model: api_response.model,
        })
    }

    async fn health_check(&self) -> std::result::Result<bool, ProviderError> {
        let url = format!("{}/models", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(response.status().is_success())
    }
}

// --- OpenAI API types (internal) ---

#[derive(Debug, Serialize, Deserialize)]
struct ApiMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    model: String,
    choices: Vec<ApiChoice>,
    usage: Option<ApiUsage>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Debug, Deserialize)]
struct ApiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openai_constructor() {
        let provider = OpenAiCompatProvider::openai("sk-test").unwrap();
        assert_eq!(provider.name(), "openai");
        assert!(provider.base_url.contains("api.openai.com"));
    }

    #[test]
    fn ollama_constructor() {
        let provider = OpenAiCompatProvider::ollama(None).unwrap();
        assert_eq!(provider.name(), "ollama");
        assert!(provider.base_url.contains("localhost:11434"));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let provider =
            OpenAiCompatProvider::new("custom", "https://llm.internal/v1/", "key").unwrap();
        assert_eq!(provider.base_url, "https://llm.internal/v1");
    }

    #[test]
    fn message_conversion() {
        let messages = vec![Turn::system("You are helpful"), Turn::user("Hello")];
        let api_messages = OpenAiCompatProvider::to_api_messages(&messages);
        assert_eq!(api_messages.len(), 2);
        assert_eq!(api_messages[0].role, "system");
        assert_eq!(api_messages[1].role, "user");
        assert_eq!(api_messages[1].content.as_deref(), Some("Hello"));
    }

    #[test]
    fn parse_completion_response() {
        let data = r#"{
            "id": "chatcmpl-123",
            "model": "gpt-4o",
            "choices": [
                {
                    "index": 0,
                    "message": { "role": "assistant", "content": "Hello, how can I help?" },
                    "finish_reason": "stop"
                }
            ],
            "usage": { "prompt_tokens": 57, "completion_tokens": 9, "total_tokens": 66 }
        }"#;
        let parsed: ApiResponse = serde_json::from_str(data).unwrap();
        assert_eq!(parsed.model, "gpt-4o");
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("Hello, how can I help?")
        );
        let usage = parsed.usage.unwrap();
        assert_eq!(usage.prompt_tokens, 57);
        assert_eq!(usage.total_tokens, 66);
    }

    #[test]
    fn parse_response_without_usage() {
        let data = r#"{
            "model": "local",
            "choices": [
                { "message": { "role": "assistant", "content": "ok" } }
            ]
        }"#;
        let parsed: ApiResponse = serde_json::from_str(data).unwrap();
        assert!(parsed.usage.is_none());
        assert_eq!(parsed.choices[0].message.content.as_deref(), Some("ok"));
    }

    #[test]
    fn parse_response_with_null_content() {
        let data = r#"{
            "model": "gpt-4o",
            "choices": [
                { "message": { "role": "assistant", "content": null } }
            ]
        }"#;
        let parsed: ApiResponse = serde_json::from_str(data).unwrap();
        assert!(parsed.choices[0].message.content.is_none());
    }
}
