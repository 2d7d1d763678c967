//! FillTemplate query handler.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::advocacy::{fill_template_by_id, FilledTemplate};
use crate::domain::foundation::DomainError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillTemplateQuery {
    pub template_id: String,
    pub values: HashMap<String, String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FillTemplateHandler;

impl FillTemplateHandler {
    pub fn new() -> Self {
        Self
    }

    /// Fails with `TEMPLATE_NOT_FOUND` for an unknown id.
    pub fn handle(&self, query: FillTemplateQuery) -> Result<FilledTemplate, DomainError> {
        let filled = fill_template_by_id(&query.template_id, &query.values)?;
        debug!(template_id = %filled.template_id, "Advocacy template filled");
        Ok(filled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[test]
    fn fills_known_template() {
        let filled = FillTemplateHandler::new()
            .handle(FillTemplateQuery {
                template_id: "social_boundary".to_string(),
                values: HashMap::new(),
            })
            .unwrap();

        assert_eq!(filled.template_id, "social_boundary");
        assert!(!filled.tips.is_empty());
        assert!(!filled.content.contains("{{"));
    }

    #[test]
    fn unknown_template_is_not_found() {
        let err = FillTemplateHandler::new()
            .handle(FillTemplateQuery {
                template_id: "nope".to_string(),
                values: HashMap::new(),
            })
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::TemplateNotFound);
        assert_eq!(err.message, "Template not found");
    }
}
