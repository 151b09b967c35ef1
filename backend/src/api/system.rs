//! Liveness, health, fallback and panic handlers

use std::any::Any;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::AppError;
use crate::state::AppState;

/// Plain-text body for `GET /`
pub const LIVENESS_TEXT: &str = "Portfolio backend is running";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: String,
    version: String,
    store_ready: bool,
}

/// GET / - Liveness probe
pub async fn liveness() -> &'static str {
    LIVENESS_TEXT
}

/// GET /api/health - Reports whether the document store is connected
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let store_ready = state.store.is_ready();
    Json(HealthResponse {
        status: if store_ready { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store_ready,
    })
}

/// Fallback for unmatched routes
pub async fn not_found() -> AppError {
    AppError::NotFound
}

/// Converts a handler panic into the generic 500 response
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::Internal(anyhow::anyhow!("handler panicked: {}", detail)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_panic_is_reported_generically() {
        let response = handle_panic(Box::new("index out of bounds: secret detail".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = to_bytes(response.into_body(), 1024).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], crate::error::INTERNAL_ERROR_MESSAGE);
        assert!(!body.to_string().contains("secret detail"));
    }
}
