//! LLM Client: the single point of entry for all Claude API calls.
//!
//! Automations receive a `TextGenerator`; `LlmClient` is the Anthropic Messages
//! API implementation. Requests are sent once; failures are not retried.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// Model used when the configuration does not name one.
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20240620";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response format from Claude API")]
    MalformedResponse,
}

/// One single-turn completion: a system prompt and one user message.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: &'static str,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Produces model text for a completion request.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// The trimmed text of the first content block. A response without an id,
    /// or whose first block carries no text, is malformed.
    pub fn into_text(self) -> Result<String, LlmError> {
        if self.id.as_deref().map_or(true, str::is_empty) {
            return Err(LlmError::MalformedResponse);
        }
        self.content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .filter(|text| !text.is_empty())
            .map(|text| text.trim().to_string())
            .ok_or(LlmError::MalformedResponse)
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

/// Wraps the Anthropic Messages API.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    api_url: String,
    model: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()?,
            api_key,
            api_url: ANTHROPIC_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        })
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Makes a raw call to the Claude API, returning the full response object.
    pub async fn call(&self, request: &CompletionRequest) -> Result<LlmResponse, LlmError> {
        let request_body = AnthropicRequest {
            model: &self.model,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            system: request.system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: &request.prompt,
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse error message
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let llm_response: LlmResponse = response
            .json()
            .await
            .map_err(|_| LlmError::MalformedResponse)?;

        if let Some(usage) = &llm_response.usage {
            debug!(
                "LLM call succeeded: input_tokens={}, output_tokens={}",
                usage.input_tokens, usage.output_tokens
            );
        }

        Ok(llm_response)
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        self.call(request).await?.into_text()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn request() -> CompletionRequest {
        CompletionRequest {
            system: "You are terse.",
            prompt: "Summarize: hello".to_string(),
            max_tokens: 2000,
            temperature: 0.1,
        }
    }

    #[test]
    fn test_into_text_trims_first_block() {
        let response: LlmResponse = serde_json::from_value(json!({
            "id": "msg_1",
            "content": [{"type": "text", "text": "  Languages: Rust \n"}, {"type": "text", "text": "ignored"}]
        }))
        .unwrap();
        assert_eq!(response.into_text().unwrap(), "Languages: Rust");
    }

    #[test]
    fn test_into_text_requires_id() {
        let response: LlmResponse = serde_json::from_value(json!({
            "content": [{"type": "text", "text": "hi"}]
        }))
        .unwrap();
        assert!(matches!(response.into_text(), Err(LlmError::MalformedResponse)));
    }

    #[test]
    fn test_into_text_requires_content() {
        let response: LlmResponse =
            serde_json::from_value(json!({"id": "msg_1", "content": []})).unwrap();
        assert!(matches!(response.into_text(), Err(LlmError::MalformedResponse)));
    }

    #[test]
    fn test_into_text_first_block_without_text_is_malformed() {
        let response: LlmResponse = serde_json::from_value(json!({
            "id": "msg_1",
            "content": [{"type": "tool_use"}, {"type": "text", "text": "late"}]
        }))
        .unwrap();
        assert!(matches!(response.into_text(), Err(LlmError::MalformedResponse)));
    }

    #[tokio::test]
    async fn test_generate_sends_messages_request() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/messages")
                    .header("x-api-key", "sk-test")
                    .header("anthropic-version", "2023-06-01")
                    .json_body(json!({
                        "model": DEFAULT_MODEL,
                        "max_tokens": 2000,
                        "temperature": 0.1,
                        "system": "You are terse.",
                        "messages": [{"role": "user", "content": "Summarize: hello"}]
                    }));
                then.status(200).json_body(json!({
                    "id": "msg_1",
                    "content": [{"type": "text", "text": "hello\n"}],
                    "usage": {"input_tokens": 10, "output_tokens": 2}
                }));
            })
            .await;

        let client = LlmClient::new("sk-test".to_string())
            .unwrap()
            .with_api_url(server.url("/v1/messages"));
        let text = client.generate(&request()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(text, "hello");
    }

    #[tokio::test]
    async fn test_generate_surfaces_api_error_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/messages");
                then.status(400).json_body(json!({
                    "type": "error",
                    "error": {"type": "invalid_request_error", "message": "max_tokens too large"}
                }));
            })
            .await;

        let client = LlmClient::new("sk-test".to_string())
            .unwrap()
            .with_api_url(server.url("/v1/messages"));
        let err = client.generate(&request()).await.unwrap_err();

        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "max_tokens too large");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_generate_does_not_retry_server_errors() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/messages");
                then.status(529).body("overloaded");
            })
            .await;

        let client = LlmClient::new("sk-test".to_string())
            .unwrap()
            .with_api_url(server.url("/v1/messages"));
        let err = client.generate(&request()).await.unwrap_err();

        mock.assert_hits_async(1).await;
        assert!(matches!(err, LlmError::Api { status: 529, .. }));
    }
}
