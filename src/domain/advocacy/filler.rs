//! Placeholder substitution for advocacy templates.

use serde::Serialize;
use std::collections::HashMap;

use super::{find_template, AdvocacyTemplate};
use crate::domain::foundation::{DomainError, ErrorCode};

/// A template filled with user-supplied values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilledTemplate {
    pub template_id: String,
    pub title: String,
    pub content: String,
    pub tips: Vec<String>,
}

/// Replaces every `{{name}}` of each declared variable.
///
/// Missing or empty values become `[name]` so the gap stays visible.
pub fn fill_template(template: &AdvocacyTemplate, values: &HashMap<String, String>) -> String {
    template
        .variables
        .iter()
        .fold(template.template_content.clone(), |content, variable| {
            let placeholder = format!("{{{{{variable}}}}}");
            let value = match values.get(variable) {
                Some(value) if !value.is_empty() => value.clone(),
                _ => format!("[{variable}]"),
            };
            content.replace(&placeholder, &value)
        })
}

/// Looks up a template by id and fills it.
pub fn fill_template_by_id(
    id: &str,
    values: &HashMap<String, String>,
) -> Result<FilledTemplate, DomainError> {
    let template = find_template(id).ok_or_else(|| {
        DomainError::new(ErrorCode::TemplateNotFound, "Template not found")
            .with_detail("template_id", id)
    })?;

    Ok(FilledTemplate {
        template_id: template.id.clone(),
        title: template.title.clone(),
        content: fill_template(template, values),
        tips: template.tips.clone(),
    })
}
