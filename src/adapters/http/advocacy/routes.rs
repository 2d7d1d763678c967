//! Router for advocacy templates.

use axum::{routing::get, Router};

use super::handlers::{fill_template, list_templates};
use crate::adapters::http::AppState;

/// # Routes (require authentication)
/// - `GET /api/advocacy/templates` - List, filter by category, or search
/// - `POST /api/advocacy/templates` - Fill a template by id
pub fn advocacy_routes() -> Router<AppState> {
    Router::new().route(
        "/api/advocacy/templates",
        get(list_templates).post(fill_template),
    )
}
