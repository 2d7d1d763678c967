//! CognitiveProfile aggregate - the per-user cognitive twin.
//!
//! A profile is owned by exactly one user. Analysis never mutates it
//! directly; it produces a [`ProfileUpdate`] that the caller persists and
//! that can be applied here with [`CognitiveProfile::apply_update`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{bounded_f64, Score, UserId, ValidationError};

use super::{merge_unique, NeuralPatterns, ProfileUpdate};

bounded_f64!(
    /// Relative learning pace, 1.0 being average.
    LearningVelocity,
    field = "learning_velocity",
    min = 0.5,
    max = 2.0
);

impl Default for LearningVelocity {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Declared learning style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LearningStyle {
    Visual,
    Auditory,
    Kinesthetic,
    #[serde(rename = "Reading/Writing")]
    ReadingWriting,
}

impl LearningStyle {
    /// Returns the label used in prompts and storage.
    pub fn label(&self) -> &'static str {
        match self {
            LearningStyle::Visual => "Visual",
            LearningStyle::Auditory => "Auditory",
            LearningStyle::Kinesthetic => "Kinesthetic",
            LearningStyle::ReadingWriting => "Reading/Writing",
        }
    }
}

impl fmt::Display for LearningStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for LearningStyle {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Visual" => Ok(LearningStyle::Visual),
            "Auditory" => Ok(LearningStyle::Auditory),
            "Kinesthetic" => Ok(LearningStyle::Kinesthetic),
            "Reading/Writing" => Ok(LearningStyle::ReadingWriting),
            other => Err(ValidationError::invalid_format(
                "learning_style",
                format!("unknown learning style '{}'", other),
            )),
        }
    }
}

/// Preferred tone when the assistant communicates for the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommunicationPreference {
    Professional,
    Casual,
    Empathetic,
    Direct,
}

impl CommunicationPreference {
    /// Returns the label used in prompts and storage.
    pub fn label(&self) -> &'static str {
        match self {
            CommunicationPreference::Professional => "Professional",
            CommunicationPreference::Casual => "Casual",
            CommunicationPreference::Empathetic => "Empathetic",
            CommunicationPreference::Direct => "Direct",
        }
    }
}

impl fmt::Display for CommunicationPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for CommunicationPreference {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Professional" => Ok(CommunicationPreference::Professional),
            "Casual" => Ok(CommunicationPreference::Casual),
            "Empathetic" => Ok(CommunicationPreference::Empathetic),
            "Direct" => Ok(CommunicationPreference::Direct),
            other => Err(ValidationError::invalid_format(
                "communication_preference",
                format!("unknown communication preference '{}'", other),
            )),
        }
    }
}

/// Window of the day (hours, 0-23) in which the user learns best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningHours {
    pub start: u8,
    pub end: u8,
}

impl LearningHours {
    /// Creates a window, validating both hours.
    pub fn new(start: u8, end: u8) -> Result<Self, ValidationError> {
        for (field, hour) in [("optimal_learning_hours.start", start), ("optimal_learning_hours.end", end)] {
            if hour > 23 {
                return Err(ValidationError::out_of_range(field, 0.0, 23.0, f64::from(hour)));
            }
        }
        Ok(Self { start, end })
    }
}

impl Default for LearningHours {
    fn default() -> Self {
        Self { start: 9, end: 11 }
    }
}

/// The cognitive twin of a single user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CognitiveProfile {
    user_id: UserId,
    learning_style: LearningStyle,
    communication_preference: CommunicationPreference,
    comprehension_score: Score,
    communication_score: Score,
    adaptability_score: Score,
    learning_velocity: LearningVelocity,
    optimal_learning_hours: LearningHours,
    strengths: Vec<String>,
    areas_for_improvement: Vec<String>,
    neural_patterns: NeuralPatterns,
}

impl CognitiveProfile {
    pub const DEFAULT_COMPREHENSION: f64 = 75.0;
    pub const DEFAULT_COMMUNICATION: f64 = 75.0;
    pub const DEFAULT_ADAPTABILITY: f64 = 80.0;

    /// Creates the profile a brand-new user starts with.
    pub fn default_for(user_id: UserId) -> Self {
        Self {
            user_id,
            learning_style: LearningStyle::Visual,
            communication_preference: CommunicationPreference::Professional,
            comprehension_score: Score::new(Self::DEFAULT_COMPREHENSION),
            communication_score: Score::new(Self::DEFAULT_COMMUNICATION),
            adaptability_score: Score::new(Self::DEFAULT_ADAPTABILITY),
            learning_velocity: LearningVelocity::default(),
            optimal_learning_hours: LearningHours::default(),
            strengths: Vec::new(),
            areas_for_improvement: Vec::new(),
            neural_patterns: NeuralPatterns::default(),
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Builders
    // ───────────────────────────────────────────────────────────────

    pub fn with_learning_style(mut self, style: LearningStyle) -> Self {
        self.learning_style = style;
        self
    }

    pub fn with_communication_preference(mut self, preference: CommunicationPreference) -> Self {
        self.communication_preference = preference;
        self
    }

    pub fn with_scores(mut self, comprehension: Score, communication: Score, adaptability: Score) -> Self {
        self.comprehension_score = comprehension;
        self.communication_score = communication;
        self.adaptability_score = adaptability;
        self
    }

    pub fn with_learning_velocity(mut self, velocity: LearningVelocity) -> Self {
        self.learning_velocity = velocity;
        self
    }

    pub fn with_optimal_learning_hours(mut self, hours: LearningHours) -> Self {
        self.optimal_learning_hours = hours;
        self
    }

    pub fn with_neural_patterns(mut self, patterns: NeuralPatterns) -> Self {
        self.neural_patterns = patterns;
        self
    }

    /// Sets strengths, dropping duplicates.
    pub fn with_strengths<I, S>(mut self, strengths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.strengths = merge_unique(&[], strengths.into_iter().map(Into::into));
        self
    }

    /// Sets areas for improvement, dropping duplicates.
    pub fn with_areas_for_improvement<I, S>(mut self, areas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.areas_for_improvement = merge_unique(&[], areas.into_iter().map(Into::into));
        self
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn learning_style(&self) -> LearningStyle {
        self.learning_style
    }

    pub fn communication_preference(&self) -> CommunicationPreference {
        self.communication_preference
    }

    pub fn comprehension_score(&self) -> Score {
        self.comprehension_score
    }

    pub fn communication_score(&self) -> Score {
        self.communication_score
    }

    pub fn adaptability_score(&self) -> Score {
        self.adaptability_score
    }

    pub fn learning_velocity(&self) -> LearningVelocity {
        self.learning_velocity
    }

    pub fn optimal_learning_hours(&self) -> LearningHours {
        self.optimal_learning_hours
    }

    pub fn strengths(&self) -> &[String] {
        &self.strengths
    }

    pub fn areas_for_improvement(&self) -> &[String] {
        &self.areas_for_improvement
    }

    pub fn neural_patterns(&self) -> &NeuralPatterns {
        &self.neural_patterns
    }

    // ───────────────────────────────────────────────────────────────
    // Mutation
    // ───────────────────────────────────────────────────────────────

    /// Merges a partial update into this profile.
    ///
    /// Scalar fields are overwritten; list fields are merged without
    /// introducing duplicates.
    pub fn apply_update(&mut self, update: &ProfileUpdate) {
        if let Some(score) = update.comprehension_score {
            self.comprehension_score = score;
        }
        if let Some(velocity) = update.learning_velocity {
            self.learning_velocity = velocity;
        }
        if let Some(hours) = update.optimal_learning_hours {
            self.optimal_learning_hours = hours;
        }
        if let Some(strengths) = &update.strengths {
            self.strengths = merge_unique(&self.strengths, strengths.iter().cloned());
        }
        if let Some(areas) = &update.areas_for_improvement {
            self.areas_for_improvement =
                merge_unique(&self.areas_for_improvement, areas.iter().cloned());
        }
        if let Some(patterns) = &update.neural_patterns {
            self.neural_patterns = patterns.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user_id() -> UserId {
        UserId::new("user-123").unwrap()
    }

    #[test]
    fn default_profile_matches_new_user_values() {
        let profile = CognitiveProfile::default_for(test_user_id());

        assert_eq!(profile.learning_style(), LearningStyle::Visual);
        assert_eq!(profile.communication_preference(), CommunicationPreference::Professional);
        assert_eq!(profile.comprehension_score().value(), 75.0);
        assert_eq!(profile.communication_score().value(), 75.0);
        assert_eq!(profile.adaptability_score().value(), 80.0);
        assert_eq!(profile.learning_velocity().value(), 1.0);
        assert_eq!(profile.optimal_learning_hours(), LearningHours { start: 9, end: 11 });
        assert!(profile.strengths().is_empty());
        assert!(profile.areas_for_improvement().is_empty());
    }

    #[test]
    fn learning_velocity_clamps_to_bounds() {
        assert_eq!(LearningVelocity::new(0.1).value(), 0.5);
        assert_eq!(LearningVelocity::new(3.0).value(), 2.0);
        assert!((LearningVelocity::new(1.0).adjusted_by(-0.05).value() - 0.95).abs() < 1e-9);
        assert!(LearningVelocity::try_new(2.5).is_err());
    }

    #[test]
    fn reading_writing_uses_slash_label() {
        let json = serde_json::to_string(&LearningStyle::ReadingWriting).unwrap();
        assert_eq!(json, "\"Reading/Writing\"");
        assert_eq!("Reading/Writing".parse::<LearningStyle>().unwrap(), LearningStyle::ReadingWriting);
        assert!("Tactile".parse::<LearningStyle>().is_err());
    }

    #[test]
    fn communication_preference_parses_labels() {
        assert_eq!(
            "Empathetic".parse::<CommunicationPreference>().unwrap(),
            CommunicationPreference::Empathetic
        );
        assert!("Loud".parse::<CommunicationPreference>().is_err());
    }

    #[test]
    fn learning_hours_rejects_invalid_hour() {
        assert!(LearningHours::new(8, 24).is_err());
        assert!(LearningHours::new(20, 22).is_ok());
    }

    #[test]
    fn with_strengths_deduplicates() {
        let profile = CognitiveProfile::default_for(test_user_id())
            .with_strengths(["Curiosity and inquiry", "Curiosity and inquiry"]);
        assert_eq!(profile.strengths(), ["Curiosity and inquiry".to_string()]);
    }

    #[test]
    fn apply_update_overwrites_scalars_and_merges_lists() {
        let mut profile = CognitiveProfile::default_for(test_user_id())
            .with_areas_for_improvement(["Language precision"]);

        let update = ProfileUpdate {
            comprehension_score: Some(Score::new(68.0)),
            learning_velocity: Some(LearningVelocity::new(1.05)),
            areas_for_improvement: Some(vec![
                "Language precision".to_string(),
                "Numerical accuracy".to_string(),
            ]),
            ..ProfileUpdate::default()
        };

        profile.apply_update(&update);

        assert_eq!(profile.comprehension_score().value(), 68.0);
        assert_eq!(profile.learning_velocity().value(), 1.05);
        assert_eq!(
            profile.areas_for_improvement(),
            ["Language precision".to_string(), "Numerical accuracy".to_string()]
        );
        assert_eq!(profile.communication_score().value(), 75.0);
    }

    #[test]
    fn apply_empty_update_is_noop() {
        let mut profile = CognitiveProfile::default_for(test_user_id());
        let before = profile.clone();
        profile.apply_update(&ProfileUpdate::default());
        assert_eq!(profile, before);
    }
}
