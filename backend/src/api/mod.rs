//! API module
//!
//! Contains HTTP request handlers and the router that wires them together

pub mod chat;
pub mod contact;
pub mod middleware;
pub mod system;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::config::CorsConfig;
use crate::state::AppState;

/// Build the application router with all routes and middleware
pub fn router(state: AppState, cors: &CorsConfig) -> Router {
    Router::new()
        // Liveness and health
        .route("/", get(system::liveness))
        .route("/api/health", get(system::health_check))
        // Contact form
        .route("/api/contact", post(contact::submit_contact))
        // Chat relay
        .route("/api/chat", post(chat::relay_chat))
        .fallback(system::not_found)
        // Middleware (order matters - request_id should be first)
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(CatchPanicLayer::custom(system::handle_panic))
        .layer(middleware::cors_layer(cors))
        .with_state(state)
}
