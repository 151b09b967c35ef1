//! Chat relay API handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::chat;
use crate::error::AppError;
use crate::state::AppState;

#[allow(missing_docs)]
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[allow(missing_docs)]
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub success: bool,
    pub reply: String,
}

/// POST /api/chat - Relay a visitor message to the completion provider
///
/// Stateless: only the latest message is forwarded, behind the fixed
/// portfolio context. The provider call runs on its own task and is not
/// cancelled if the client goes away.
pub async fn relay_chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let message = payload
        .map_err(|rejection| {
            debug!(error = %rejection.body_text(), "Rejected malformed chat payload");
            AppError::ChatMessageRequired
        })?
        .0
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or(AppError::ChatMessageRequired)?;

    info!(message_len = message.len(), "Chat request received");

    let provider = state.chat.clone();
    let reply = tokio::spawn(async move {
        let reply = chat::relay(provider.as_ref(), &message).await?;
        info!(reply_len = reply.len(), "Chat reply received");
        Ok::<_, chat::ProviderError>(reply)
    })
    .await
    .map_err(|e| anyhow::Error::new(e).context("chat relay task failed"))??;

    Ok(Json(ChatResponse {
        success: true,
        reply,
    }))
}
