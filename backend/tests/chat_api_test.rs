//! Integration tests for the chat relay and system routes

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use common::{app, post_json, send, MockProvider};
use portfolio_backend::chat::context::PORTFOLIO_CONTEXT;
use portfolio_backend::chat::{MessageRole, OpenAiClient, ProviderError};
use portfolio_backend::config::ChatConfig;
use portfolio_backend::store::StoreHandle;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

#[tokio::test]
async fn test_chat_requires_message() {
    for payload in [json!({}), json!({"message": ""}), json!({"message": "   "})] {
        let provider = MockProvider::replying("unused");
        let (status, body) = send(
            app(StoreHandle::new(), provider.clone()),
            post_json("/api/chat", payload.clone()),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "payload: {}", payload);
        assert_eq!(body, json!({"success": false, "error": "Message is required"}));
        assert!(provider.requests.lock().await.is_empty());
    }
}

#[tokio::test]
async fn test_chat_returns_reply_verbatim() {
    let provider = MockProvider::replying("Hi!");
    let (status, body) = send(
        app(StoreHandle::new(), provider.clone()),
        post_json("/api/chat", json!({"message": "Hello"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "reply": "Hi!"}));

    let requests = provider.requests.lock().await;
    assert_eq!(requests.len(), 1);
    let exchange = &requests[0];
    assert_eq!(exchange.len(), 2);
    assert_eq!(exchange[0].role, MessageRole::System);
    assert_eq!(exchange[0].content, PORTFOLIO_CONTEXT);
    assert_eq!(exchange[1].role, MessageRole::User);
    assert_eq!(exchange[1].content, "Hello");
}

#[tokio::test]
async fn test_chat_is_stateless_between_calls() {
    let provider = MockProvider::replying("ok");
    let router = app(StoreHandle::new(), provider.clone());

    send(router.clone(), post_json("/api/chat", json!({"message": "first"}))).await;
    send(router, post_json("/api/chat", json!({"message": "second"}))).await;

    let requests = provider.requests.lock().await;
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].len(), 2);
    assert_eq!(requests[1][1].content, "second");
}

async fn assert_provider_mapping(
    make_error: fn() -> ProviderError,
    expected_status: StatusCode,
    expected_text: &str,
) {
    let (status, body) = send(
        app(StoreHandle::new(), MockProvider::failing(make_error)),
        post_json("/api/chat", json!({"message": "Hello"})),
    )
    .await;

    assert_eq!(status, expected_status);
    assert_eq!(body["success"], false);
    assert!(
        body["error"].as_str().unwrap().starts_with(expected_text),
        "got: {}",
        body
    );
}

#[tokio::test]
async fn test_chat_provider_error_mapping() {
    assert_provider_mapping(
        || ProviderError::Authentication { status: 401 },
        StatusCode::INTERNAL_SERVER_ERROR,
        "AI service authentication failed",
    )
    .await;

    assert_provider_mapping(
        || ProviderError::InvalidRequest("messages[1] is invalid".to_string()),
        StatusCode::BAD_REQUEST,
        "Invalid request format",
    )
    .await;

    assert_provider_mapping(
        || ProviderError::Status {
            status: 503,
            message: "The server is overloaded".to_string(),
        },
        StatusCode::INTERNAL_SERVER_ERROR,
        "Failed to get AI response",
    )
    .await;
}

#[tokio::test]
async fn test_chat_against_mocked_provider_http() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .with_status(200)
        .with_body(r#"{"choices": [{"message": {"role": "assistant", "content": "Hi!"}}]}"#)
        .create_async()
        .await;

    let client = OpenAiClient::new(&ChatConfig {
        api_key: "test-key".to_string(),
        base_url: server.url(),
        ..ChatConfig::default()
    })
    .unwrap();

    let (status, body) = send(
        app(StoreHandle::new(), Arc::new(client)),
        post_json("/api/chat", json!({"message": "Hello"})),
    )
    .await;

    mock.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "reply": "Hi!"}));
}

#[tokio::test]
async fn test_liveness_and_unknown_route() {
    let router = app(StoreHandle::new(), MockProvider::replying("unused"));

    let response = router
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let text = to_bytes(response.into_body(), 1024).await.unwrap();
    assert_eq!(&text[..], b"Portfolio backend is running");

    let (status, body) = send(
        router.clone(),
        Request::builder()
            .uri("/api/unknown")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"success": false, "message": "Endpoint not found"}));

    let (status, body) = send(
        router,
        Request::builder().uri("/api/health").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["storeReady"], false);
}

#[tokio::test]
async fn test_cors_allows_only_listed_origins() {
    let router = app(StoreHandle::new(), MockProvider::replying("unused"));

    let preflight = |origin: &str| {
        Request::builder()
            .method("OPTIONS")
            .uri("/api/chat")
            .header("origin", origin)
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap()
    };

    let allowed = router
        .clone()
        .oneshot(preflight("https://my-portfolio.vercel.app"))
        .await
        .unwrap();
    assert_eq!(
        allowed.headers()["access-control-allow-origin"],
        "https://my-portfolio.vercel.app"
    );
    assert_eq!(allowed.headers()["access-control-allow-credentials"], "true");

    let denied = router
        .oneshot(preflight("https://attacker.example"))
        .await
        .unwrap();
    assert!(denied
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}
