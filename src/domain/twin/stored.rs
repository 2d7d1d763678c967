//! Hydration of persisted twin rows into a `CognitiveProfile`.
//!
//! Stored rows come from a loosely-typed store: columns may be missing,
//! zero, or hold JSON of an unexpected shape. Each such field falls back to
//! the new-user default instead of failing the load.

use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::domain::foundation::{Score, UserId};

use super::{CognitiveProfile, LearningHours, LearningVelocity, NeuralPatterns};

/// Raw values read from the `profiles` and `cognitive_twins` tables.
#[derive(Debug, Clone, Default)]
pub struct StoredTwin {
    pub learning_style: Option<String>,
    pub communication_preference: Option<String>,
    pub comprehension_score: Option<f64>,
    pub communication_score: Option<f64>,
    pub adaptability_score: Option<f64>,
    pub learning_velocity: Option<f64>,
    pub optimal_learning_hours: Option<JsonValue>,
    pub strengths: Option<JsonValue>,
    pub areas_for_improvement: Option<JsonValue>,
    pub neural_patterns: Option<JsonValue>,
}

impl StoredTwin {
    /// Builds a profile, substituting defaults for unusable fields.
    ///
    /// A numeric score of zero is treated as unset.
    pub fn into_profile(self, user_id: UserId) -> CognitiveProfile {
        let mut profile = CognitiveProfile::default_for(user_id);

        if let Some(style) = self.learning_style.as_deref().and_then(|s| s.parse().ok()) {
            profile = profile.with_learning_style(style);
        }
        if let Some(preference) = self
            .communication_preference
            .as_deref()
            .and_then(|s| s.parse().ok())
        {
            profile = profile.with_communication_preference(preference);
        }

        profile = profile.with_scores(
            score_or(self.comprehension_score, CognitiveProfile::DEFAULT_COMPREHENSION),
            score_or(self.communication_score, CognitiveProfile::DEFAULT_COMMUNICATION),
            score_or(self.adaptability_score, CognitiveProfile::DEFAULT_ADAPTABILITY),
        );

        if let Some(velocity) = usable(self.learning_velocity) {
            profile = profile.with_learning_velocity(LearningVelocity::new(velocity));
        }
        if let Some(hours) = parse_json::<LearningHours>(self.optimal_learning_hours) {
            if let Ok(hours) = LearningHours::new(hours.start, hours.end) {
                profile = profile.with_optimal_learning_hours(hours);
            }
        }
        if let Some(strengths) = parse_json::<Vec<String>>(self.strengths) {
            profile = profile.with_strengths(strengths);
        }
        if let Some(areas) = parse_json::<Vec<String>>(self.areas_for_improvement) {
            profile = profile.with_areas_for_improvement(areas);
        }
        if let Some(JsonValue::Object(object)) = &self.neural_patterns {
            profile = profile.with_neural_patterns(NeuralPatterns::from_stored(object));
        }

        profile
    }
}

fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v != 0.0)
}

fn score_or(value: Option<f64>, default: f64) -> Score {
    Score::new(usable(value).unwrap_or(default))
}

fn parse_json<T: DeserializeOwned>(value: Option<JsonValue>) -> Option<T> {
    value.and_then(|v| serde_json::from_value(v).ok())
}
