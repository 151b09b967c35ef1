//! Completion provider client
//!
//! Direct HTTP client for an OpenAI-compatible chat completion API.
//! Failures are classified by HTTP status into [`ProviderError`] so callers
//! never have to inspect message text.

use async_trait::async_trait;
use thiserror::Error;

use crate::chat::types::{
    ChatMessage, CompletionRequest, CompletionResponse, ErrorEnvelope,
};
use crate::config::ChatConfig;

/// Sampling temperature for every request
pub const TEMPERATURE: f32 = 0.7;

/// Upper bound on generated tokens per reply
pub const MAX_TOKENS: u32 = 500;

/// Classified completion provider failures
#[derive(Error, Debug)]
pub enum ProviderError {
    /// No API key configured
    #[error("completion provider API key is not configured")]
    MissingApiKey,

    /// Provider rejected the credentials (401/403)
    #[error("completion provider rejected credentials (HTTP {status})")]
    Authentication {
        /// HTTP status returned
        status: u16,
    },

    /// Provider rejected the request shape (400)
    #[error("completion provider rejected the request: {0}")]
    InvalidRequest(String),

    /// Any other non-success status
    #[error("completion provider returned HTTP {status}: {message}")]
    Status {
        /// HTTP status returned
        status: u16,
        /// Provider error message, or the raw body
        message: String,
    },

    /// Network or TLS failure
    #[error("failed to reach completion provider: {0}")]
    Transport(#[from] reqwest::Error),

    /// Success status with an unusable body
    #[error("unexpected completion provider response: {0}")]
    Malformed(String),
}

/// Map a non-success HTTP status and body to a [`ProviderError`]
pub fn classify_status(status: u16, body: &str) -> ProviderError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.to_string());

    match status {
        401 | 403 => ProviderError::Authentication { status },
        400 => ProviderError::InvalidRequest(message),
        _ => ProviderError::Status { status, message },
    }
}

/// Something that can turn a message exchange into a reply
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Complete `messages` and return the reply text unmodified
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ProviderError>;
}

/// Client for `POST {base_url}/chat/completions`
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    /// Build a client with a shared connection pool and request timeout
    pub fn new(config: &ChatConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::MissingApiKey);
        }

        let url = format!("{}/chat/completions", self.base_url);
        let request_body = CompletionRequest {
            model: &self.model,
            messages,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            stream: false,
        };

        tracing::debug!(
            url = %url,
            model = %self.model,
            message_count = messages.len(),
            "Calling completion provider"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let status_code = status.as_u16();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());

            tracing::error!(
                status_code = status_code,
                error_body = %error_body,
                "Completion provider returned error status"
            );

            return Err(classify_status(status_code, &error_body));
        }

        let response_body = response.text().await?;
        let parsed: CompletionResponse = serde_json::from_str(&response_body).map_err(|e| {
            ProviderError::Malformed(format!("failed to parse JSON response: {}", e))
        })?;

        let reply = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::Malformed("response contains no choices".to_string()))?;

        tracing::debug!(
            response_len = reply.len(),
            "Received reply from completion provider"
        );

        Ok(reply)
    }
}
