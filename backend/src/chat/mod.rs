//! Chat module
//!
//! Stateless relay between a visitor and a hosted completion model. Each
//! call sends the fixed portfolio context plus the latest visitor message;
//! no transcript is kept server-side.

pub mod context;
pub mod provider;
pub mod types;

pub use provider::{CompletionProvider, OpenAiClient, ProviderError};
pub use types::{ChatMessage, MessageRole};

/// Build the two-message exchange sent for a visitor message
pub fn build_exchange(message: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(context::PORTFOLIO_CONTEXT),
        ChatMessage::user(message),
    ]
}

/// Forward `message` to `provider` and return the reply unmodified
pub async fn relay(
    provider: &dyn CompletionProvider,
    message: &str,
) -> Result<String, ProviderError> {
    provider.complete(&build_exchange(message)).await
}
