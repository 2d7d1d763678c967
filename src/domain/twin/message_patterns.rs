//! Single-message pattern hints.
//!
//! Lighter than full session analysis: looks at one user message and
//! suggests neural-pattern values that a caller may merge into a profile.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::foundation::Affinity;

use super::{ExplanationLength, LearningStyle, NeuralPatterns, StressResponse};

static VISUAL_CUES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)see|look|picture|diagram|chart|visual|show|image").expect("visual cue regex")
});
static AUDITORY_CUES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)hear|sound|tell|explain|discuss|talk|listen").expect("auditory cue regex")
});
static KINESTHETIC_CUES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)try|do|practice|hands-on|feel|touch|build").expect("kinesthetic cue regex")
});
static READING_CUES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)read|write|list|notes|document|text|book").expect("reading cue regex")
});
static ANXIETY_CUES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)nervous|worried|scared|anxious|afraid|unsure|help me").expect("anxiety cue regex")
});

/// Visual affinity suggested when a message carries visual cues.
pub const VISUAL_CUE_AFFINITY: f64 = 8.0;

/// Social comfort suggested when a message carries anxiety cues.
pub const ANXIOUS_SOCIAL_COMFORT: f64 = 3.0;

/// Suggested neural-pattern values derived from one message.
#[derive(Debug, Clone, PartialEq)]
pub struct NeuralPatternHints {
    pub preferred_explanation_length: ExplanationLength,
    pub visual_learning_affinity: Option<Affinity>,
    pub stress_response_pattern: Option<StressResponse>,
    pub social_interaction_comfort: Option<Affinity>,
    /// Learning styles whose cue words appear in the message.
    pub style_cues: Vec<LearningStyle>,
}

impl NeuralPatternHints {
    /// Returns `patterns` with every suggested value written over it.
    pub fn merged_into(&self, patterns: &NeuralPatterns) -> NeuralPatterns {
        let mut merged = patterns.clone();
        merged.preferred_explanation_length = self.preferred_explanation_length;
        if let Some(affinity) = self.visual_learning_affinity {
            merged.visual_learning_affinity = affinity;
        }
        if let Some(stress) = self.stress_response_pattern {
            merged.stress_response_pattern = stress;
        }
        if let Some(comfort) = self.social_interaction_comfort {
            merged.social_interaction_comfort = comfort;
        }
        merged
    }
}

/// Derives pattern hints from a single message.
pub fn analyze_message_patterns(message: &str) -> NeuralPatternHints {
    let length = message.chars().count() as f64;

    let style_cues = [
        (LearningStyle::Visual, &*VISUAL_CUES),
        (LearningStyle::Auditory, &*AUDITORY_CUES),
        (LearningStyle::Kinesthetic, &*KINESTHETIC_CUES),
        (LearningStyle::ReadingWriting, &*READING_CUES),
    ]
    .into_iter()
    .filter(|(_, cues)| cues.is_match(message))
    .map(|(style, _)| style)
    .collect::<Vec<_>>();

    let anxious = ANXIETY_CUES.is_match(message);

    NeuralPatternHints {
        preferred_explanation_length: ExplanationLength::from_message_length(length),
        visual_learning_affinity: VISUAL_CUES
            .is_match(message)
            .then(|| Affinity::new(VISUAL_CUE_AFFINITY)),
        stress_response_pattern: anxious.then_some(StressResponse::Anxious),
        social_interaction_comfort: anxious.then(|| Affinity::new(ANXIOUS_SOCIAL_COMFORT)),
        style_cues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_plain_message_only_sets_length() {
        let hints = analyze_message_patterns("ok");
        assert_eq!(hints.preferred_explanation_length, ExplanationLength::Brief);
        assert_eq!(hints.visual_learning_affinity, None);
        assert_eq!(hints.stress_response_pattern, None);
        assert!(hints.style_cues.is_empty());
    }

    #[test]
    fn visual_cue_suggests_affinity_eight() {
        let hints = analyze_message_patterns("Could you show me a DIAGRAM of this?");
        assert_eq!(hints.visual_learning_affinity, Some(Affinity::new(8.0)));
        assert!(hints.style_cues.contains(&LearningStyle::Visual));
    }

    #[test]
    fn anxiety_cue_marks_user_anxious() {
        let hints = analyze_message_patterns("I'm really nervous about my exam");
        assert_eq!(hints.stress_response_pattern, Some(StressResponse::Anxious));
        assert_eq!(hints.social_interaction_comfort, Some(Affinity::new(3.0)));
    }

    #[test]
    fn detects_multiple_style_cues_in_declaration_order() {
        let hints = analyze_message_patterns("Please explain it, then let me write notes");
        assert_eq!(
            hints.style_cues,
            vec![LearningStyle::Auditory, LearningStyle::ReadingWriting]
        );
    }

    #[test]
    fn merged_into_overwrites_only_suggested_fields() {
        let base = NeuralPatterns::default();
        let hints = analyze_message_patterns("I'm worried");

        let merged = hints.merged_into(&base);

        assert_eq!(merged.stress_response_pattern, StressResponse::Anxious);
        assert_eq!(merged.social_interaction_comfort.value(), 3.0);
        assert_eq!(merged.visual_learning_affinity, base.visual_learning_affinity);
        assert_eq!(merged.preferred_explanation_length, ExplanationLength::Brief);
    }

    #[test]
    fn long_message_prefers_detailed() {
        let message = "a".repeat(250);
        assert_eq!(
            analyze_message_patterns(&message).preferred_explanation_length,
            ExplanationLength::Detailed
        );
    }
}
