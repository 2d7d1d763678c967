//! Request/response bodies for `/api/advocacy/templates`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::application::{FillTemplateQuery, ListTemplatesQuery};
use crate::domain::advocacy::{AdvocacyTemplate, FilledTemplate};

/// Query string of `GET /api/advocacy/templates`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplatesParams {
    pub category: Option<String>,
    pub search: Option<String>,
}

impl From<TemplatesParams> for ListTemplatesQuery {
    fn from(params: TemplatesParams) -> Self {
        ListTemplatesQuery {
            category: params.category,
            search: params.search,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplatesResponse {
    pub templates: Vec<&'static AdvocacyTemplate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillTemplateRequest {
    pub template_id: String,
    #[serde(default)]
    pub values: HashMap<String, String>,
}

impl From<FillTemplateRequest> for FillTemplateQuery {
    fn from(request: FillTemplateRequest) -> Self {
        FillTemplateQuery {
            template_id: request.template_id,
            values: request.values,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilledTemplateResponse {
    /// Template title.
    pub template: String,
    pub content: String,
    pub tips: Vec<String>,
}

impl From<FilledTemplate> for FilledTemplateResponse {
    fn from(filled: FilledTemplate) -> Self {
        Self {
            template: filled.title,
            content: filled.content,
            tips: filled.tips,
        }
    }
}
