//! Chat completion API types
//!
//! Structs that mirror the OpenAI-compatible chat completion JSON format.

use serde::{Deserialize, Serialize};

/// Role of a message in a completion exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Fixed instructions and context
    System,
    /// Visitor input
    User,
    /// Model output
    Assistant,
}

/// A single message sent to the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who is speaking
    pub role: MessageRole,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// System message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// User message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Request body for `POST /chat/completions`
#[derive(Serialize, Debug)]
pub struct CompletionRequest<'a> {
    /// Model name
    pub model: &'a str,
    /// Conversation to complete
    pub messages: &'a [ChatMessage],
    /// Sampling temperature
    pub temperature: f32,
    /// Upper bound on generated tokens
    pub max_tokens: u32,
    /// Streaming is never requested
    pub stream: bool,
}

/// Top-level completion response
#[derive(Deserialize, Debug)]
pub struct CompletionResponse {
    /// Candidate completions
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// A single candidate completion
#[derive(Deserialize, Debug)]
pub struct Choice {
    /// Generated message
    pub message: ResponseMessage,
    /// Why generation stopped
    #[serde(default)]
    #[allow(dead_code)] // Part of API response format
    pub finish_reason: Option<String>,
}

/// Message inside a choice
#[derive(Deserialize, Debug)]
pub struct ResponseMessage {
    /// Text content; absent for tool calls
    #[serde(default)]
    pub content: Option<String>,
}

/// Error envelope returned with non-2xx statuses
#[derive(Deserialize, Debug)]
pub struct ErrorEnvelope {
    /// Error details
    pub error: ErrorBody,
}

/// Provider error details
#[derive(Deserialize, Debug)]
pub struct ErrorBody {
    /// Human-readable message
    pub message: String,
}
