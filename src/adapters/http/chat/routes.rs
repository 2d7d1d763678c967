//! Router for the chat endpoint.

use axum::{routing::post, Router};

use super::handlers::send_message;
use crate::adapters::http::AppState;

/// `POST /api/chat` (requires authentication)
pub fn chat_routes() -> Router<AppState> {
    Router::new().route("/api/chat", post(send_message))
}
