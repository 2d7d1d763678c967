//! The built-in advocacy template catalog.

use once_cell::sync::Lazy;

use super::{AdvocacyCategory, AdvocacyTemplate};

static CATALOG: Lazy<Vec<AdvocacyTemplate>> = Lazy::new(|| {
    serde_yaml::from_str(include_str!("catalog.yaml")).expect("embedded advocacy catalog is valid")
});

/// Every template, in catalog order.
pub fn all_templates() -> &'static [AdvocacyTemplate] {
    &CATALOG
}

pub fn find_template(id: &str) -> Option<&'static AdvocacyTemplate> {
    CATALOG.iter().find(|template| template.id == id)
}

pub fn templates_by_category(category: AdvocacyCategory) -> Vec<&'static AdvocacyTemplate> {
    CATALOG
        .iter()
        .filter(|template| template.category == category)
        .collect()
}

/// Templates whose keywords appear in `text`, case-insensitively, in
/// catalog order.
pub fn suggest_templates(text: &str) -> Vec<&'static AdvocacyTemplate> {
    let text = text.to_lowercase();
    CATALOG
        .iter()
        .filter(|template| template.matches(&text))
        .collect()
}
