//! Integration tests for the HTTP API.
//!
//! The full router is driven with `oneshot` against in-memory adapters:
//! 1. Health check is public
//! 2. API routes require a bearer token
//! 3. Chat without an AI provider serves the fallback reply
//! 4. Template listing, search, and filling

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use samvaad::adapters::ai::MockAIProvider;
use samvaad::adapters::auth::MockSessionValidator;
use samvaad::adapters::http::{build_router, AppState, RouterSettings};
use samvaad::adapters::memory::{InMemoryInsightRepository, InMemoryProfileRepository};
use samvaad::adapters::InMemoryEventBus;
use samvaad::application::{AnalysisDispatcher, AnalyzeSessionHandler, SendChatMessageHandler};
use samvaad::domain::prompt::FALLBACK_NOTE;

const TOKEN: &str = "learner-token";

// =============================================================================
// Test Infrastructure
// =============================================================================

fn chat_handler(provider: Option<MockAIProvider>) -> SendChatMessageHandler {
    let profiles = Arc::new(InMemoryProfileRepository::new());
    let bus = Arc::new(InMemoryEventBus::new());
    let analyzer = Arc::new(AnalyzeSessionHandler::new(
        profiles.clone(),
        Arc::new(InMemoryInsightRepository::new()),
        bus.clone(),
    ));
    let dispatcher = Arc::new(AnalysisDispatcher::spawn(analyzer, bus, 4));

    let handler = SendChatMessageHandler::new(profiles, dispatcher);
    match provider {
        Some(provider) => handler.with_provider(Arc::new(provider)),
        None => handler,
    }
}

fn app_with(provider: Option<MockAIProvider>) -> Router {
    let validator = Arc::new(MockSessionValidator::new().with_test_user(TOKEN, "learner-1"));
    build_router(
        AppState::new(Arc::new(chat_handler(provider))),
        validator,
        &RouterSettings::default(),
    )
}

fn app() -> Router {
    app_with(None)
}

fn get(uri: &str, authenticated: bool) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if authenticated {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {TOKEN}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// =============================================================================
// Health and Auth
// =============================================================================

#[tokio::test]
async fn health_check_needs_no_token() {
    let response = app().oneshot(get("/health", false)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn templates_require_authentication() {
    let response = app()
        .oneshot(get("/api/advocacy/templates", false))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn unknown_token_is_rejected() {
    let request = Request::builder()
        .uri("/api/advocacy/templates")
        .header(header::AUTHORIZATION, "Bearer nope")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Chat
// =============================================================================

#[tokio::test]
async fn chat_without_provider_serves_fallback() {
    let response = app()
        .oneshot(post_json(
            "/api/chat",
            json!({
                "messages": [{ "role": "user", "content": "Can you explain fractions?" }],
                "mode": "learning"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["mode"], "learning");
    assert_eq!(body["note"], FALLBACK_NOTE);
    assert_eq!(body["profile"]["learningStyle"], "Visual");
    assert_eq!(body["profile"]["communicationPreference"], "Professional");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("visual learning style"));
}

#[tokio::test]
async fn chat_with_provider_returns_completion_without_note() {
    let provider = MockAIProvider::new().with_response("Fractions are parts of a whole.");

    let response = app_with(Some(provider))
        .oneshot(post_json(
            "/api/chat",
            json!({ "messages": [{ "role": "user", "content": "What is a fraction?" }] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Fractions are parts of a whole.");
    assert_eq!(body["mode"], "general");
    assert!(body.get("note").is_none());
}

#[tokio::test]
async fn malformed_chat_body_is_a_validation_error() {
    let response = app()
        .oneshot(post_json("/api/chat", json!({ "mode": "learning" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_FAILED");
}

// =============================================================================
// Advocacy Templates
// =============================================================================

#[tokio::test]
async fn lists_every_template() {
    let response = app()
        .oneshot(get("/api/advocacy/templates", true))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let templates = body["templates"].as_array().unwrap();
    assert_eq!(templates.len(), 8);
    assert!(templates[0].get("templateContent").is_some());
    assert!(templates[0].get("keywords").is_none());
}

#[tokio::test]
async fn filters_templates_by_category() {
    let response = app()
        .oneshot(get("/api/advocacy/templates?category=career", true))
        .await
        .unwrap();

    let body = body_json(response).await;
    let templates = body["templates"].as_array().unwrap();
    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0]["id"], "salary_negotiation");
}

#[tokio::test]
async fn unknown_category_lists_nothing() {
    let response = app()
        .oneshot(get("/api/advocacy/templates?category=astrology", true))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["templates"], json!([]));
}

#[tokio::test]
async fn search_suggests_matching_templates() {
    let response = app()
        .oneshot(get("/api/advocacy/templates?search=I%20want%20a%20raise", true))
        .await
        .unwrap();

    let body = body_json(response).await;
    let ids: Vec<&str> = body["templates"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|t| t["id"].as_str())
        .collect();
    assert!(ids.contains(&"salary_negotiation"));
}

#[tokio::test]
async fn fills_template_and_marks_missing_values() {
    let response = app()
        .oneshot(post_json(
            "/api/advocacy/templates",
            json!({
                "templateId": "salary_negotiation",
                "values": { "manager_name": "Priya", "sender_name": "" }
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["template"], "Salary Negotiation");
    let content = body["content"].as_str().unwrap();
    assert!(content.starts_with("Dear Priya,"));
    assert!(content.contains("[sender_name]"));
    assert!(content.contains("[requested_salary]"));
    assert!(!content.contains("{{"));
    assert!(!body["tips"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn filling_unknown_template_is_not_found() {
    let response = app()
        .oneshot(post_json(
            "/api/advocacy/templates",
            json!({ "templateId": "does_not_exist" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["code"], "TEMPLATE_NOT_FOUND");
    assert_eq!(body["error"], "Template not found");
}
