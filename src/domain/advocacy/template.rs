use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Situation family an advocacy template belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvocacyCategory {
    Financial,
    Career,
    Services,
    CustomerService,
    Healthcare,
    Education,
    Legal,
    Social,
}

impl AdvocacyCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdvocacyCategory::Financial => "financial",
            AdvocacyCategory::Career => "career",
            AdvocacyCategory::Services => "services",
            AdvocacyCategory::CustomerService => "customer_service",
            AdvocacyCategory::Healthcare => "healthcare",
            AdvocacyCategory::Education => "education",
            AdvocacyCategory::Legal => "legal",
            AdvocacyCategory::Social => "social",
        }
    }
}

impl fmt::Display for AdvocacyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdvocacyCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "financial" => Ok(AdvocacyCategory::Financial),
            "career" => Ok(AdvocacyCategory::Career),
            "services" => Ok(AdvocacyCategory::Services),
            "customer_service" => Ok(AdvocacyCategory::CustomerService),
            "healthcare" => Ok(AdvocacyCategory::Healthcare),
            "education" => Ok(AdvocacyCategory::Education),
            "legal" => Ok(AdvocacyCategory::Legal),
            "social" => Ok(AdvocacyCategory::Social),
            other => Err(ValidationError::invalid_format(
                "category",
                format!("unknown advocacy category '{other}'"),
            )),
        }
    }
}

/// Register a message is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormalityLevel {
    Casual,
    Professional,
    Formal,
    Diplomatic,
}

/// A reusable message skeleton with `{{name}}` placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvocacyTemplate {
    pub id: String,
    pub title: String,
    pub category: AdvocacyCategory,
    pub description: String,
    pub template_content: String,
    pub variables: Vec<String>,
    pub cultural_context: String,
    pub formality_level: FormalityLevel,
    pub tips: Vec<String>,
    /// Lowercase cues used for suggestions.
    #[serde(default, skip_serializing)]
    pub keywords: Vec<String>,
}

impl AdvocacyTemplate {
    /// True when `lowercase_text` contains any of the template's keywords.
    pub fn matches(&self, lowercase_text: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| lowercase_text.contains(keyword.as_str()))
    }
}
