//! HTTP middleware: request ids and the CORS allow-list

use std::time::Instant;

use axum::{
    extract::Request,
    http::{header, request::Parts, HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::config::CorsConfig;

/// Request ID middleware - adds unique ID to each request for tracing
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        uri = %uri,
    );

    let response = next.run(request).instrument(span).await;

    let duration = start.elapsed();
    info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        status = %response.status().as_u16(),
        duration_ms = duration.as_millis(),
        "Request completed"
    );

    response
}

/// Whether `origin` is in the exact list or matches a `scheme://*.domain` pattern
pub fn origin_allowed(origin: &str, exact: &[String], patterns: &[String]) -> bool {
    if exact.iter().any(|allowed| allowed == origin) {
        return true;
    }

    patterns.iter().any(|pattern| {
        let Some((prefix, suffix)) = pattern.split_once("*.") else {
            return pattern == origin;
        };
        origin
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_suffix(suffix))
            .and_then(|label| label.strip_suffix('.'))
            .is_some_and(|label| !label.is_empty() && !label.contains(['/', ':']))
    })
}

/// Credentialed CORS restricted to the configured origins
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let exact = config.allowed_origins.clone();
    let patterns = config.allowed_patterns.clone();

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                origin
                    .to_str()
                    .map(|o| origin_allowed(o, &exact, &patterns))
                    .unwrap_or(false)
            },
        ))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}
