//! Advocacy template queries.

mod fill_template;
mod list_templates;

pub use fill_template::{FillTemplateHandler, FillTemplateQuery};
pub use list_templates::{ListTemplatesHandler, ListTemplatesQuery};
