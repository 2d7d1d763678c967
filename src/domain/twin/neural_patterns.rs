//! Neural patterns: the qualitative and quantitative traits nested in a
//! cognitive twin.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::fmt;

use crate::domain::foundation::Affinity;

/// Preferred length of explanations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExplanationLength {
    Brief,
    Moderate,
    Detailed,
}

impl ExplanationLength {
    /// Messages shorter than this many characters prefer brief explanations.
    pub const BRIEF_BELOW: f64 = 50.0;

    /// Messages shorter than this many characters prefer moderate explanations.
    pub const MODERATE_BELOW: f64 = 200.0;

    /// Classifies a (mean) message length in characters.
    pub fn from_message_length(length: f64) -> Self {
        if length < Self::BRIEF_BELOW {
            ExplanationLength::Brief
        } else if length < Self::MODERATE_BELOW {
            ExplanationLength::Moderate
        } else {
            ExplanationLength::Detailed
        }
    }
}

impl fmt::Display for ExplanationLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExplanationLength::Brief => "brief",
            ExplanationLength::Moderate => "moderate",
            ExplanationLength::Detailed => "detailed",
        };
        write!(f, "{}", s)
    }
}

/// How the learner prefers to receive feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackStyle {
    Encouraging,
    Direct,
    Analytical,
}

impl fmt::Display for FeedbackStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FeedbackStyle::Encouraging => "encouraging",
            FeedbackStyle::Direct => "direct",
            FeedbackStyle::Analytical => "analytical",
        };
        write!(f, "{}", s)
    }
}

/// How the user tends to respond under stress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StressResponse {
    Calm,
    Anxious,
    Focused,
}

impl fmt::Display for StressResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StressResponse::Calm => "calm",
            StressResponse::Anxious => "anxious",
            StressResponse::Focused => "focused",
        };
        write!(f, "{}", s)
    }
}

/// Nested trait record inside a cognitive twin.
///
/// Stored as a JSON object with camelCase keys. Any key missing from a
/// stored record takes its default, so partially written rows still load.
/// Keys this service does not model are carried in `extra` and written back
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NeuralPatterns {
    pub preferred_explanation_length: ExplanationLength,
    pub visual_learning_affinity: Affinity,
    pub abstract_thinking_level: Affinity,
    pub practical_application_preference: Affinity,
    pub repetition_needed: u32,
    pub feedback_response_type: FeedbackStyle,
    pub stress_response_pattern: StressResponse,
    pub social_interaction_comfort: Affinity,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl NeuralPatterns {
    /// Hydrates a stored object key by key.
    ///
    /// A known key whose value does not parse keeps its default; the other
    /// keys still load.
    pub fn from_stored(object: &Map<String, JsonValue>) -> Self {
        let mut patterns = Self::default();
        for (key, value) in object {
            let parsed = match key.as_str() {
                "preferredExplanationLength" => {
                    assign(&mut patterns.preferred_explanation_length, value)
                }
                "visualLearningAffinity" => assign(&mut patterns.visual_learning_affinity, value),
                "abstractThinkingLevel" => assign(&mut patterns.abstract_thinking_level, value),
                "practicalApplicationPreference" => {
                    assign(&mut patterns.practical_application_preference, value)
                }
                "repetitionNeeded" => assign(&mut patterns.repetition_needed, value),
                "feedbackResponseType" => assign(&mut patterns.feedback_response_type, value),
                "stressResponsePattern" => assign(&mut patterns.stress_response_pattern, value),
                "socialInteractionComfort" => {
                    assign(&mut patterns.social_interaction_comfort, value)
                }
                _ => {
                    patterns.extra.insert(key.clone(), value.clone());
                    true
                }
            };
            if !parsed {
                tracing::debug!(key = %key, "Stored neural pattern unreadable, using default");
            }
        }
        patterns
    }
}

fn assign<T: DeserializeOwned>(slot: &mut T, value: &JsonValue) -> bool {
    match T::deserialize(value) {
        Ok(parsed) => {
            *slot = parsed;
            true
        }
        Err(_) => false,
    }
}

impl Default for NeuralPatterns {
    fn default() -> Self {
        Self {
            preferred_explanation_length: ExplanationLength::Moderate,
            visual_learning_affinity: Affinity::new(7.0),
            abstract_thinking_level: Affinity::new(6.0),
            practical_application_preference: Affinity::new(7.0),
            repetition_needed: 2,
            feedback_response_type: FeedbackStyle::Encouraging,
            stress_response_pattern: StressResponse::Calm,
            social_interaction_comfort: Affinity::new(6.0),
            extra: Map::new(),
        }
    }
}
