//! Advocacy domain - the template catalog and placeholder filling.

mod catalog;
mod filler;
mod template;

pub use catalog::{all_templates, find_template, suggest_templates, templates_by_category};
pub use filler::{fill_template, fill_template_by_id, FilledTemplate};
pub use template::{AdvocacyCategory, AdvocacyTemplate, FormalityLevel};
