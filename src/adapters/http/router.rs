//! Application router.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::FromRef,
    http::{HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use super::advocacy::advocacy_routes;
use super::chat::chat_routes;
use super::middleware::{auth_middleware, AuthState};
use crate::application::{FillTemplateHandler, ListTemplatesHandler, SendChatMessageHandler};

/// Shared state handed to every route.
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<SendChatMessageHandler>,
    pub list_templates: ListTemplatesHandler,
    pub fill_template: FillTemplateHandler,
}

impl AppState {
    pub fn new(chat: Arc<SendChatMessageHandler>) -> Self {
        Self {
            chat,
            list_templates: ListTemplatesHandler::new(),
            fill_template: FillTemplateHandler::new(),
        }
    }
}

impl FromRef<AppState> for Arc<SendChatMessageHandler> {
    fn from_ref(state: &AppState) -> Self {
        state.chat.clone()
    }
}

impl FromRef<AppState> for ListTemplatesHandler {
    fn from_ref(state: &AppState) -> Self {
        state.list_templates
    }
}

impl FromRef<AppState> for FillTemplateHandler {
    fn from_ref(state: &AppState) -> Self {
        state.fill_template
    }
}

/// Router settings taken from server configuration.
#[derive(Debug, Clone, Default)]
pub struct RouterSettings {
    /// Allowed origins; empty allows any origin.
    pub cors_origins: Vec<String>,
    pub request_timeout: Option<Duration>,
}

/// Assembles API routes behind auth, plus the public health check.
pub fn build_router(state: AppState, validator: AuthState, settings: &RouterSettings) -> Router {
    let api = Router::new()
        .merge(chat_routes())
        .merge(advocacy_routes())
        .layer(from_fn_with_state(validator, auth_middleware))
        .with_state(state);

    let mut app = Router::new()
        .route("/health", get(health))
        .merge(api)
        .layer(cors_layer(&settings.cors_origins));

    if let Some(timeout) = settings.request_timeout {
        app = app.layer(TimeoutLayer::new(timeout));
    }

    app.layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str {
    "ok"
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if parsed.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(parsed)
    }
}
