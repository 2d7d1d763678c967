//! Partial profile updates produced by session analysis.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Score;

use super::{LearningHours, LearningVelocity, NeuralPatterns};

/// A partial cognitive profile. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comprehension_score: Option<Score>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_velocity: Option<LearningVelocity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimal_learning_hours: Option<LearningHours>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub strengths: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub areas_for_improvement: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub neural_patterns: Option<NeuralPatterns>,
}

impl ProfileUpdate {
    /// Returns true when no field would change.
    pub fn is_empty(&self) -> bool {
        self.comprehension_score.is_none()
            && self.learning_velocity.is_none()
            && self.optimal_learning_hours.is_none()
            && self.strengths.is_none()
            && self.areas_for_improvement.is_none()
            && self.neural_patterns.is_none()
    }
}

/// Appends `additions` to `existing`, keeping first occurrences only.
///
/// Order is preserved: existing labels first, then novel additions in the
/// order they arrive.
pub fn merge_unique<I>(existing: &[String], additions: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut merged: Vec<String> = Vec::with_capacity(existing.len());
    for label in existing.iter().cloned().chain(additions) {
        if !merged.contains(&label) {
            merged.push(label);
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn merge_unique_appends_only_novel_labels() {
        let merged = merge_unique(
            &labels(&["Numerical accuracy"]),
            labels(&["Language precision", "Numerical accuracy"]),
        );
        assert_eq!(merged, labels(&["Numerical accuracy", "Language precision"]));
    }

    #[test]
    fn merge_unique_collapses_duplicates_already_present() {
        let merged = merge_unique(&labels(&["a", "a", "b"]), Vec::new());
        assert_eq!(merged, labels(&["a", "b"]));
    }

    #[test]
    fn default_update_is_empty_and_serializes_to_empty_object() {
        let update = ProfileUpdate::default();
        assert!(update.is_empty());
        assert_eq!(serde_json::to_value(&update).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn update_with_score_is_not_empty() {
        let update = ProfileUpdate {
            comprehension_score: Some(Score::new(70.0)),
            ..ProfileUpdate::default()
        };
        assert!(!update.is_empty());
    }
}
