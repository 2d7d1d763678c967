//! ListTemplates query handler.

use tracing::debug;

use crate::domain::advocacy::{
    all_templates, suggest_templates, templates_by_category, AdvocacyCategory, AdvocacyTemplate,
};

/// Filters for the template listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTemplatesQuery {
    /// Category name such as `career`; unknown names match nothing.
    pub category: Option<String>,
    /// Free text matched against template keywords. Takes precedence over
    /// `category` when non-empty.
    pub search: Option<String>,
}

/// Reads the static template catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListTemplatesHandler;

impl ListTemplatesHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, query: ListTemplatesQuery) -> Vec<&'static AdvocacyTemplate> {
        if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
            return suggest_templates(search);
        }

        match query.category.as_deref().filter(|c| !c.is_empty()) {
            Some(category) => match category.parse::<AdvocacyCategory>() {
                Ok(category) => templates_by_category(category),
                Err(_) => {
                    debug!(category = %category, "Unknown advocacy category");
                    Vec::new()
                }
            },
            None => all_templates().iter().collect(),
        }
    }
}
