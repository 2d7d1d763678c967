//! HTTP handlers for advocacy templates.

use axum::extract::{
    rejection::{JsonRejection, QueryRejection},
    Query, State,
};
use axum::Json;

use super::dto::{FillTemplateRequest, FilledTemplateResponse, TemplatesParams, TemplatesResponse};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::{FillTemplateHandler, ListTemplatesHandler};

/// GET /api/advocacy/templates?category=&search=
pub async fn list_templates(
    State(handler): State<ListTemplatesHandler>,
    RequireAuth(_user): RequireAuth,
    params: Result<Query<TemplatesParams>, QueryRejection>,
) -> Result<Json<TemplatesResponse>, ApiError> {
    let Query(params) = params?;
    let templates = handler.handle(params.into());
    Ok(Json(TemplatesResponse { templates }))
}

/// POST /api/advocacy/templates
pub async fn fill_template(
    State(handler): State<FillTemplateHandler>,
    RequireAuth(user): RequireAuth,
    payload: Result<Json<FillTemplateRequest>, JsonRejection>,
) -> Result<Json<FilledTemplateResponse>, ApiError> {
    let Json(request) = payload?;
    tracing::debug!(user_id = %user.id, template_id = %request.template_id, "Filling template");

    let filled = handler.handle(request.into())?;

    Ok(Json(filled.into()))
}
