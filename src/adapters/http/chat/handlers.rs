//! HTTP handlers for the chat endpoint.

use std::sync::Arc;

use axum::extract::{rejection::JsonRejection, State};
use axum::Json;

use super::dto::{ChatRequest, ChatResponse};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::SendChatMessageHandler;
use crate::domain::foundation::CommandMetadata;

/// POST /api/chat
pub async fn send_message(
    State(handler): State<Arc<SendChatMessageHandler>>,
    RequireAuth(user): RequireAuth,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = payload?;
    let metadata = CommandMetadata::new(user.id).ensure_correlation_id();

    let reply = handler.handle(request.into(), metadata).await?;

    Ok(Json(reply.into()))
}
