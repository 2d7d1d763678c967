//! Insights: human-readable observations emitted by session analysis.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{InsightId, Timestamp, UserId, ValidationError};

/// Kind of insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightType {
    Pattern,
    Recommendation,
    Achievement,
    Warning,
}

impl fmt::Display for InsightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InsightType::Pattern => "pattern",
            InsightType::Recommendation => "recommendation",
            InsightType::Achievement => "achievement",
            InsightType::Warning => "warning",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for InsightType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pattern" => Ok(InsightType::Pattern),
            "recommendation" => Ok(InsightType::Recommendation),
            "achievement" => Ok(InsightType::Achievement),
            "warning" => Ok(InsightType::Warning),
            other => Err(ValidationError::invalid_format(
                "insight_type",
                format!("unknown insight type '{other}'"),
            )),
        }
    }
}

/// How prominently an insight should be surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightPriority {
    Low,
    Medium,
    High,
}

impl fmt::Display for InsightPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InsightPriority::Low => "low",
            InsightPriority::Medium => "medium",
            InsightPriority::High => "high",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for InsightPriority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(InsightPriority::Low),
            "medium" => Ok(InsightPriority::Medium),
            "high" => Ok(InsightPriority::High),
            other => Err(ValidationError::invalid_format(
                "priority",
                format!("unknown insight priority '{other}'"),
            )),
        }
    }
}

/// A generated observation about a user's session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    pub title: String,
    pub description: String,
    pub priority: InsightPriority,
    pub actionable: bool,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, JsonValue>,
}

impl Insight {
    /// Creates a non-actionable insight without metadata.
    pub fn new(
        insight_type: InsightType,
        title: impl Into<String>,
        description: impl Into<String>,
        priority: InsightPriority,
    ) -> Self {
        Self {
            insight_type,
            title: title.into(),
            description: description.into(),
            priority,
            actionable: false,
            metadata: Map::new(),
        }
    }

    /// Marks the insight as something the user can act on.
    pub fn actionable(mut self) -> Self {
        self.actionable = true;
        self
    }

    /// Adds a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// An insight persisted for a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredInsight {
    pub id: InsightId,
    pub user_id: UserId,
    #[serde(flatten)]
    pub insight: Insight,
    pub is_read: bool,
    pub created_at: Timestamp,
}

impl StoredInsight {
    /// Wraps a freshly generated insight for persistence.
    pub fn new(user_id: UserId, insight: Insight) -> Self {
        Self {
            id: InsightId::new(),
            user_id,
            insight,
            is_read: false,
            created_at: Timestamp::now(),
        }
    }
}
