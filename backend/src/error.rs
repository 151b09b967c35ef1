//! Error types and error handling for the application
//!
//! All request-level failures are represented by [`AppError`], which renders
//! a `{success: false, ...}` JSON body. Contact and system routes report
//! under `message`; the chat route reports under `error`. Internal details
//! are logged here and never serialized.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::chat::ProviderError;
use crate::contact::ValidationError;
use crate::store::StoreError;

/// Shown when the document store is not connected
pub const SERVICE_UNAVAILABLE_MESSAGE: &str =
    "Service temporarily unavailable. Please try again later.";

/// Shown when a submission could not be persisted
pub const SUBMISSION_FAILED_MESSAGE: &str = "Failed to send message. Please try again later.";

/// Shown for unexpected failures and panics
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error. Please try again later.";

/// Shown when the chat request carries no usable message
pub const CHAT_MESSAGE_REQUIRED: &str = "Message is required";

/// Shown when the provider rejects our credentials
pub const CHAT_AUTH_FAILED: &str = "AI service authentication failed";

/// Shown when the provider rejects the request shape
pub const CHAT_INVALID_REQUEST: &str = "Invalid request format";

/// Application-level error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Contact payload failed a validation rule
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Contact payload was not a JSON object with string fields
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Document store has not been connected yet
    #[error("Document store is not connected")]
    StoreUnavailable,

    /// Writing a submission failed
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// Chat request had no message
    #[error("{}", CHAT_MESSAGE_REQUIRED)]
    ChatMessageRequired,

    /// Completion provider call failed
    #[error("Completion provider error: {0}")]
    Provider(#[from] ProviderError),

    /// No route matched
    #[error("Endpoint not found")]
    NotFound,

    /// Internal server error (catch-all for unexpected errors)
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, field, message) = match &self {
            AppError::Validation(e) => (StatusCode::BAD_REQUEST, "message", e.to_string()),
            AppError::InvalidBody(_) => (StatusCode::BAD_REQUEST, "message", self.to_string()),
            AppError::StoreUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "message",
                SERVICE_UNAVAILABLE_MESSAGE.to_string(),
            ),
            AppError::Storage(e) => {
                tracing::error!(error = %e, "Failed to persist contact submission");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "message",
                    SUBMISSION_FAILED_MESSAGE.to_string(),
                )
            }
            AppError::ChatMessageRequired => (
                StatusCode::BAD_REQUEST,
                "error",
                CHAT_MESSAGE_REQUIRED.to_string(),
            ),
            AppError::Provider(e) => {
                tracing::error!(error = %e, "Chat relay failed");
                match e {
                    ProviderError::MissingApiKey | ProviderError::Authentication { .. } => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "error",
                        CHAT_AUTH_FAILED.to_string(),
                    ),
                    ProviderError::InvalidRequest(_) => (
                        StatusCode::BAD_REQUEST,
                        "error",
                        CHAT_INVALID_REQUEST.to_string(),
                    ),
                    other => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "error",
                        format!("Failed to get AI response: {}", other),
                    ),
                }
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, "message", self.to_string()),
            AppError::Internal(e) => {
                tracing::error!(error = %e, "Unhandled internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "message",
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        let body = Json(json!({
            "success": false,
            field: message,
        }));

        (status, body).into_response()
    }
}
