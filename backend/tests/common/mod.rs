//! Shared helpers for router-level tests

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use portfolio_backend::api;
use portfolio_backend::chat::{ChatMessage, CompletionProvider, ProviderError};
use portfolio_backend::config::CorsConfig;
use portfolio_backend::contact::ContactSubmission;
use portfolio_backend::state::AppState;
use portfolio_backend::store::{StoreError, StoreHandle, SubmissionStore};
use serde_json::Value;
use tokio::sync::Mutex;
use tower::ServiceExt;

/// Completion provider returning a scripted outcome and recording requests
pub struct MockProvider {
    outcome: Box<dyn Fn() -> Result<String, ProviderError> + Send + Sync>,
    pub requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockProvider {
    pub fn replying(reply: &str) -> Arc<Self> {
        let reply = reply.to_string();
        Arc::new(Self {
            outcome: Box::new(move || Ok(reply.clone())),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(make_error: fn() -> ProviderError) -> Arc<Self> {
        Arc::new(Self {
            outcome: Box::new(move || Err(make_error())),
            requests: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ProviderError> {
        self.requests.lock().await.push(messages.to_vec());
        (self.outcome)()
    }
}

/// Store whose writes always fail
pub struct FailingStore;

#[async_trait]
impl SubmissionStore for FailingStore {
    async fn insert(&self, _submission: &ContactSubmission) -> Result<(), StoreError> {
        Err(StoreError::Backend(
            "connection reset by peer (mongo-internal-7:27017)".to_string(),
        ))
    }
}

pub fn app(store: StoreHandle, provider: Arc<dyn CompletionProvider>) -> Router {
    api::router(AppState::new(store, provider), &CorsConfig::default())
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("user-agent", "integration-test")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
