//! Chat client implementation for OpenAI-compatible endpoints.
//!
//! This adapter implements the `ChatClient` port against a
//! `/chat/completions` endpoint. Attachments are encoded as base64
//! `data:` URLs here, at the transport boundary; nothing upstream ever
//! sees the encoded form.

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use optic_application::ports::{ChatClient, ChatClientError};
use optic_domain::{ChatCompletion, ChatRequest, ImageAttachment};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the OpenAI-compatible chat client.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    /// Endpoint base URL, without the `/chat/completions` suffix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token for the `Authorization` header.
    pub api_key: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl OpenAiConfig {
    /// Creates a configuration for the public OpenAI endpoint.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: default_base_url(),
            api_key: api_key.into(),
        }
    }

    /// Sets a custom base URL (e.g. a proxy or compatible server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Reads the configuration from the `OPENAI_API_KEY` environment
    /// variable. Returns `None` if the variable is unset.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        std::env::var("OPENAI_API_KEY").ok().map(Self::new)
    }
}

/// Chat client implementation using reqwest.
pub struct OpenAiChatClient {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiChatClient {
    /// Creates a new chat client.
    ///
    /// Default configuration: 30 second timeout, `Optic/0.1.0` user agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be created.
    pub fn new(config: OpenAiConfig) -> Result<Self, ChatClientError> {
        let client = Client::builder()
            .user_agent("Optic/0.1.0")
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ChatClientError::Other(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Creates a chat client with a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: Client, config: OpenAiConfig) -> Self {
        Self { client, config }
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Maps reqwest errors to port errors.
    fn map_error(error: &reqwest::Error) -> ChatClientError {
        if error.is_timeout() {
            return ChatClientError::Timeout {
                timeout_ms: u64::try_from(REQUEST_TIMEOUT.as_millis()).unwrap_or(u64::MAX),
            };
        }
        if error.is_connect() {
            return ChatClientError::Connection(error.to_string());
        }
        ChatClientError::Other(error.to_string())
    }
}

impl ChatClient for OpenAiChatClient {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatCompletion, ChatClientError> {
        let payload = WireRequest::from_request(request);

        tracing::debug!(
            model = %request.model,
            attachments = request.attachments.len(),
            "sending chat completion request"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Self::map_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|e| e.to_string());
            return Err(ChatClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: WireResponse = response
            .json()
            .await
            .map_err(|e| ChatClientError::InvalidResponse(e.to_string()))?;

        if body.choices.is_empty() {
            return Err(ChatClientError::InvalidResponse(
                "response contained no choices".to_string(),
            ));
        }

        let content = body
            .choices
            .into_iter()
            .map(|choice| choice.message.content)
            .collect::<Vec<_>>()
            .join("");

        Ok(ChatCompletion::new(content))
    }
}

/// Encodes an attachment as a base64 `data:` URL.
fn data_url(attachment: &ImageAttachment) -> String {
    format!(
        "data:{};base64,{}",
        attachment.mime_type,
        BASE64.encode(&attachment.data)
    )
}

#[derive(Debug, Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
}

impl<'a> WireRequest<'a> {
    fn from_request(request: &'a ChatRequest) -> Self {
        let mut messages = Vec::new();

        if let Some(system_prompt) = &request.system_prompt {
            messages.push(WireMessage {
                role: "system",
                content: WireContent::Text(system_prompt),
            });
        }

        let mut parts = vec![WirePart::Text {
            text: &request.query,
        }];
        parts.extend(request.attachments.iter().map(|attachment| {
            WirePart::ImageUrl {
                image_url: WireImageUrl {
                    url: data_url(attachment),
                },
            }
        }));
        messages.push(WireMessage {
            role: "user",
            content: WireContent::Parts(parts),
        });

        Self {
            model: &request.model,
            messages,
        }
    }
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: WireContent<'a>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum WireContent<'a> {
    Text(&'a str),
    Parts(Vec<WirePart<'a>>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WirePart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: WireImageUrl },
}

#[derive(Debug, Serialize)]
struct WireImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    choices: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireReplyMessage,
}

#[derive(Debug, Deserialize)]
struct WireReplyMessage {
    content: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_data_url_encoding() {
        let attachment = ImageAttachment::new("image/png", vec![0x89, 0x50, 0x4e, 0x47]).unwrap();
        assert_eq!(data_url(&attachment), "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn test_wire_request_shape() {
        let attachment = ImageAttachment::new("image/png", vec![1]).unwrap();
        let request = ChatRequest::new("what is [#img](#img-context)?")
            .with_system_prompt("You are a vision assistant.")
            .with_attachments(vec![attachment]);

        let wire = serde_json::to_value(WireRequest::from_request(&request)).unwrap();
        assert_eq!(
            wire,
            serde_json::json!({
                "model": "gpt-4o",
                "messages": [
                    { "role": "system", "content": "You are a vision assistant." },
                    { "role": "user", "content": [
                        { "type": "text", "text": "what is [#img](#img-context)?" },
                        { "type": "image_url", "image_url": { "url": "data:image/png;base64,AQ==" } }
                    ]}
                ]
            })
        );
    }

    #[test]
    fn test_wire_request_without_system_prompt() {
        let request = ChatRequest::new("hello");
        let wire = serde_json::to_value(WireRequest::from_request(&request)).unwrap();
        assert_eq!(wire["messages"].as_array().unwrap().len(), 1);
        assert_eq!(wire["messages"][0]["role"], "user");
    }

    #[test]
    fn test_completions_url_trims_trailing_slash() {
        let config = OpenAiConfig::new("sk-test").with_base_url("http://localhost:8080/v1/");
        let client = OpenAiChatClient::new(config).unwrap();
        assert_eq!(
            client.completions_url(),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn test_config_defaults_to_public_endpoint() {
        let config = OpenAiConfig::new("sk-test");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
