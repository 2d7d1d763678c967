//! Session records: the ephemeral input to session analysis.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// One exchanged chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }
}

/// Difficulty of the material covered in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Difficulty {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            other => Err(ValidationError::invalid_format(
                "difficulty",
                format!("unknown difficulty '{}'", other),
            )),
        }
    }
}

/// Engagement measurements collected during a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementMetrics {
    /// Response-time samples in milliseconds.
    pub response_times_ms: Vec<f64>,
    pub question_frequency: u32,
    pub clarification_requests: u32,
}

impl EngagementMetrics {
    /// Mean response time in milliseconds, if any samples exist.
    pub fn mean_response_time_ms(&self) -> Option<f64> {
        if self.response_times_ms.is_empty() {
            return None;
        }
        let total: f64 = self.response_times_ms.iter().sum();
        Some(total / self.response_times_ms.len() as f64)
    }
}

/// A completed interaction session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub messages: Vec<ChatMessage>,
    pub duration_minutes: f64,
    pub topic: String,
    pub difficulty: Difficulty,
    pub mistakes: Vec<String>,
    pub corrections: Vec<String>,
    pub engagement: EngagementMetrics,
}

/// Topic used when the caller does not name one.
pub const DEFAULT_TOPIC: &str = "General Learning";

/// Phrases (lowercase) that mark a user message as a clarification request.
pub const CLARIFICATION_PHRASES: [&str; 3] =
    ["what do you mean", "can you explain", "i don't understand"];

impl SessionRecord {
    /// Rejects records whose numeric fields cannot be analyzed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.duration_minutes.is_finite() || self.duration_minutes < 0.0 {
            return Err(ValidationError::invalid_format(
                "duration_minutes",
                "must be a finite, non-negative number",
            ));
        }
        if let Some(bad) = self
            .engagement
            .response_times_ms
            .iter()
            .find(|t| !t.is_finite() || **t < 0.0)
        {
            return Err(ValidationError::invalid_format(
                "response_times_ms",
                format!("sample {} is not a finite, non-negative number", bad),
            ));
        }
        Ok(())
    }

    /// Builds a session record from a chat transcript plus caller context.
    ///
    /// Questions are user messages containing `?`; clarification requests
    /// are user messages containing one of [`CLARIFICATION_PHRASES`].
    /// Duration is unknown at chat time and recorded as zero.
    pub fn from_conversation(messages: Vec<ChatMessage>, context: &SessionContext) -> Self {
        let question_frequency = messages
            .iter()
            .filter(|m| m.is_user() && m.content.contains('?'))
            .count() as u32;

        let clarification_requests = messages
            .iter()
            .filter(|m| m.is_user())
            .filter(|m| {
                let lowered = m.content.to_lowercase();
                CLARIFICATION_PHRASES.iter().any(|p| lowered.contains(p))
            })
            .count() as u32;

        Self {
            messages,
            duration_minutes: 0.0,
            topic: context
                .topic
                .clone()
                .unwrap_or_else(|| DEFAULT_TOPIC.to_string()),
            difficulty: context.difficulty.unwrap_or_default(),
            mistakes: context.mistakes.clone(),
            corrections: context.corrections.clone(),
            engagement: EngagementMetrics {
                response_times_ms: context.response_times_ms.clone(),
                question_frequency,
                clarification_requests,
            },
        }
    }
}

/// Learning details a client may attach to a chat request context.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionContext {
    pub topic: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub mistakes: Vec<String>,
    pub corrections: Vec<String>,
    pub response_times_ms: Vec<f64>,
}

impl SessionContext {
    /// Reads known keys from a free-form JSON context object.
    ///
    /// Keys: `topic`, `difficulty`, `mistakes`, `corrections`,
    /// `responseTimes`. Values of the wrong type are ignored.
    pub fn from_json(context: &JsonValue) -> Self {
        let strings = |key: &str| -> Vec<String> {
            context
                .get(key)
                .and_then(JsonValue::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(|v| v.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default()
        };

        Self {
            topic: context
                .get("topic")
                .and_then(JsonValue::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            difficulty: context
                .get("difficulty")
                .and_then(JsonValue::as_str)
                .and_then(|s| s.parse().ok()),
            mistakes: strings("mistakes"),
            corrections: strings("corrections"),
            response_times_ms: context
                .get("responseTimes")
                .and_then(JsonValue::as_array)
                .map(|items| items.iter().filter_map(JsonValue::as_f64).collect())
                .unwrap_or_default(),
        }
    }
}
