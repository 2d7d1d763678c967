//! System prompt rendering for each chat mode.

use serde_json::Value as JsonValue;

use super::ChatMode;
use crate::domain::twin::{CognitiveProfile, CommunicationPreference, LearningStyle};

/// Placeholder used when a profile has no strengths or areas yet.
pub const NOT_YET_IDENTIFIED: &str = "Not yet identified";

/// Header introducing caller-supplied context.
pub const ADDITIONAL_CONTEXT_HEADER: &str = "\n\nADDITIONAL CONTEXT:\n";

/// Renders system prompts from a cognitive profile.
///
/// Rendering is pure: the same mode and profile always produce the same
/// prompt text.
pub struct PromptRenderer;

impl PromptRenderer {
    /// Renders the system prompt for `mode`.
    pub fn render(mode: ChatMode, profile: &CognitiveProfile) -> String {
        match mode {
            ChatMode::Learning => Self::learning(profile),
            ChatMode::Advocacy => Self::advocacy(profile),
            ChatMode::General => Self::general(profile),
        }
    }

    /// Tutor prompt adapted to the learner's style and patterns.
    pub fn learning(profile: &CognitiveProfile) -> String {
        let patterns = profile.neural_patterns();
        let comprehension = profile.comprehension_score();

        [
            "You are a Cognitive Twin AI tutor named Samvaad. You have deeply analyzed and \
             understood this learner's cognitive patterns."
                .to_string(),
            String::new(),
            "LEARNER PROFILE:".to_string(),
            format!("- Learning Style: {}", profile.learning_style()),
            format!("- Comprehension Level: {}%", comprehension),
            format!("- Learning Velocity: {}x (1.0 is average)", profile.learning_velocity()),
            format!(
                "- Preferred Explanation Length: {}",
                patterns.preferred_explanation_length
            ),
            format!(
                "- Visual Learning Affinity: {}/10",
                patterns.visual_learning_affinity
            ),
            format!("- Abstract Thinking: {}/10", patterns.abstract_thinking_level),
            format!(
                "- Practical Application Preference: {}/10",
                patterns.practical_application_preference
            ),
            format!(
                "- Feedback Style Preference: {}",
                patterns.feedback_response_type
            ),
            String::new(),
            "ADAPTATION RULES:".to_string(),
            format!(
                "{}. {}",
                style_rule_number(profile.learning_style()),
                learning_style_guidance(profile.learning_style())
            ),
            format!(
                "5. Adjust complexity based on comprehension score ({}%)",
                comprehension
            ),
            "6. If learning velocity is below 1.0, slow down and provide more examples".to_string(),
            format!(
                "7. Match explanation length to preference: {}",
                patterns.preferred_explanation_length
            ),
            format!("8. Provide {} feedback", patterns.feedback_response_type),
            String::new(),
            format!(
                "STRENGTHS TO LEVERAGE: {}",
                join_or_placeholder(profile.strengths())
            ),
            format!(
                "AREAS TO SUPPORT: {}",
                join_or_placeholder(profile.areas_for_improvement())
            ),
            String::new(),
            "Remember: You are not just teaching - you are adapting to how this specific person \
             learns best. Every response should feel personally crafted for them."
                .to_string(),
        ]
        .join("\n")
    }

    /// Advocate prompt speaking on the user's behalf.
    pub fn advocacy(profile: &CognitiveProfile) -> String {
        let patterns = profile.neural_patterns();

        [
            "You are Samvaad, an AI Advocate speaking on behalf of a user. Your role is to \
             communicate their intent in a polite, culturally sensitive, and effective manner."
                .to_string(),
            String::new(),
            "USER'S COMMUNICATION PROFILE:".to_string(),
            format!("- Preferred Style: {}", profile.communication_preference()),
            format!(
                "- Communication Score: {}%",
                profile.communication_score()
            ),
            format!(
                "- Social Interaction Comfort: {}/10",
                patterns.social_interaction_comfort
            ),
            format!("- Stress Response: {}", patterns.stress_response_pattern),
            String::new(),
            "ADVOCACY PRINCIPLES:".to_string(),
            "1. Always maintain the user's dignity and represent their best interests".to_string(),
            "2. Be culturally aware and adapt tone to the context".to_string(),
            "3. Never be aggressive or confrontational - be assertive but respectful".to_string(),
            "4. Provide clear, actionable communication".to_string(),
            "5. When negotiating, find win-win solutions".to_string(),
            "6. Acknowledge the other party's perspective while advocating for the user"
                .to_string(),
            "7. Use appropriate formality based on the situation".to_string(),
            "8. If the user has social anxiety (comfort < 5), be extra supportive and confident \
             on their behalf"
                .to_string(),
            String::new(),
            "COMMUNICATION STYLE ADAPTATION:".to_string(),
            format!(
                "- {}",
                communication_guidance(profile.communication_preference())
            ),
            String::new(),
            "You are the user's confident voice when they need support in communication."
                .to_string(),
        ]
        .join("\n")
    }

    /// Mode-agnostic assistant prompt.
    pub fn general(profile: &CognitiveProfile) -> String {
        [
            "You are Samvaad, a Cognitive Twin AI assistant. You understand this user deeply and \
             can help with both learning and advocacy."
                .to_string(),
            String::new(),
            "USER PROFILE SUMMARY:".to_string(),
            format!("- Learning Style: {}", profile.learning_style()),
            format!(
                "- Communication Style: {}",
                profile.communication_preference()
            ),
            format!(
                "- Overall Adaptability: {}%",
                profile.adaptability_score()
            ),
            String::new(),
            "You can seamlessly switch between:".to_string(),
            "1. LEARNING MODE: Helping the user understand concepts adapted to their learning style"
                .to_string(),
            "2. ADVOCACY MODE: Communicating on their behalf in various situations".to_string(),
            String::new(),
            "Always be supportive, adaptive, and focused on empowering the user. You amplify \
             their capabilities, not replace their agency."
                .to_string(),
        ]
        .join("\n")
    }

    /// Appends caller-supplied context as pretty-printed JSON.
    ///
    /// A JSON `null` leaves the prompt untouched.
    pub fn with_additional_context(prompt: String, context: &JsonValue) -> String {
        if context.is_null() {
            return prompt;
        }
        let rendered =
            serde_json::to_string_pretty(context).unwrap_or_else(|_| context.to_string());
        format!("{prompt}{ADDITIONAL_CONTEXT_HEADER}{rendered}")
    }
}

/// Teaching guidance for a learning style.
pub fn learning_style_guidance(style: LearningStyle) -> &'static str {
    match style {
        LearningStyle::Visual => {
            "Use diagrams, charts, and visual metaphors extensively. Describe things in spatial terms."
        }
        LearningStyle::Auditory => {
            "Use rhythmic explanations, mnemonics, and suggest reading aloud. Reference sounds and \
             verbal patterns."
        }
        LearningStyle::Kinesthetic => {
            "Use hands-on examples, physical metaphors, and action-oriented language. Suggest \
             practice exercises."
        }
        LearningStyle::ReadingWriting => {
            "Provide detailed written explanations, lists, and suggest note-taking. Use precise \
             terminology."
        }
    }
}

/// Rules 1-4 are reserved for the four styles, so the shared rules keep
/// their numbers whichever style line is shown.
fn style_rule_number(style: LearningStyle) -> u8 {
    match style {
        LearningStyle::Visual => 1,
        LearningStyle::Auditory => 2,
        LearningStyle::Kinesthetic => 3,
        LearningStyle::ReadingWriting => 4,
    }
}

/// Tone guidance for a communication preference.
pub fn communication_guidance(preference: CommunicationPreference) -> &'static str {
    match preference {
        CommunicationPreference::Professional => {
            "Use formal language, clear structure, and business-appropriate tone"
        }
        CommunicationPreference::Casual => {
            "Use friendly, approachable language while maintaining respect"
        }
        CommunicationPreference::Empathetic => {
            "Lead with understanding, acknowledge emotions, use warm language"
        }
        CommunicationPreference::Direct => {
            "Be clear and concise, get to the point while remaining polite"
        }
    }
}

fn join_or_placeholder(items: &[String]) -> String {
    if items.is_empty() {
        NOT_YET_IDENTIFIED.to_string()
    } else {
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Score, UserId};
    use crate::domain::twin::LearningVelocity;
    use serde_json::json;

    fn profile() -> CognitiveProfile {
        CognitiveProfile::default_for(UserId::new("learner-1").unwrap())
    }

    #[test]
    fn learning_prompt_describes_default_profile() {
        let prompt = PromptRenderer::render(ChatMode::Learning, &profile());

        assert!(prompt.starts_with("You are a Cognitive Twin AI tutor named Samvaad."));
        assert!(prompt.contains("- Learning Style: Visual"));
        assert!(prompt.contains("- Comprehension Level: 75%"));
        assert!(prompt.contains("- Learning Velocity: 1x (1.0 is average)"));
        assert!(prompt.contains("- Preferred Explanation Length: moderate"));
        assert!(prompt.contains("- Visual Learning Affinity: 7/10"));
        assert!(prompt.contains("- Feedback Style Preference: encouraging"));
        assert!(prompt.contains("5. Adjust complexity based on comprehension score (75%)"));
        assert!(prompt.contains("8. Provide encouraging feedback"));
        assert!(prompt.contains("STRENGTHS TO LEVERAGE: Not yet identified"));
        assert!(prompt.contains("AREAS TO SUPPORT: Not yet identified"));
    }

    #[test]
    fn learning_prompt_includes_only_own_style_guidance() {
        let kinesthetic = profile().with_learning_style(LearningStyle::Kinesthetic);
        let prompt = PromptRenderer::learning(&kinesthetic);

        assert!(prompt.contains(&format!(
            "3. {}",
            learning_style_guidance(LearningStyle::Kinesthetic)
        )));
        for other in [
            LearningStyle::Visual,
            LearningStyle::Auditory,
            LearningStyle::ReadingWriting,
        ] {
            assert!(!prompt.contains(learning_style_guidance(other)));
        }
        assert!(prompt.contains("6. If learning velocity is below 1.0"));
    }

    #[test]
    fn visual_learner_gets_only_visual_guidance() {
        let prompt = PromptRenderer::learning(&profile());

        assert!(prompt.contains(
            "1. Use diagrams, charts, and visual metaphors extensively. Describe things in \
             spatial terms."
        ));
        assert!(!prompt.contains("rhythmic explanations"));
        assert!(!prompt.contains("hands-on examples"));
        assert!(!prompt.contains("detailed written explanations"));
        assert!(!prompt.contains("\n2. \n"));
    }

    #[test]
    fn learning_prompt_joins_strengths_and_areas() {
        let learner = profile()
            .with_strengths(["Curiosity", "Accuracy"])
            .with_areas_for_improvement(["Numerical Accuracy"]);
        let prompt = PromptRenderer::learning(&learner);

        assert!(prompt.contains("STRENGTHS TO LEVERAGE: Curiosity, Accuracy"));
        assert!(prompt.contains("AREAS TO SUPPORT: Numerical Accuracy"));
    }

    #[test]
    fn learning_prompt_shows_fractional_scores() {
        let learner = profile()
            .with_scores(Score::new(82.5), Score::new(75.0), Score::new(80.0))
            .with_learning_velocity(LearningVelocity::new(1.25));
        let prompt = PromptRenderer::learning(&learner);

        assert!(prompt.contains("- Comprehension Level: 82.5%"));
        assert!(prompt.contains("- Learning Velocity: 1.25x"));
    }

    #[test]
    fn advocacy_prompt_uses_communication_profile() {
        let user = profile().with_communication_preference(CommunicationPreference::Empathetic);
        let prompt = PromptRenderer::render(ChatMode::Advocacy, &user);

        assert!(prompt.contains("- Preferred Style: Empathetic"));
        assert!(prompt.contains("- Communication Score: 75%"));
        assert!(prompt.contains("- Social Interaction Comfort: 6/10"));
        assert!(prompt.contains("- Stress Response: calm"));
        assert!(prompt.contains("8. If the user has social anxiety (comfort < 5)"));
        assert!(prompt.contains(communication_guidance(CommunicationPreference::Empathetic)));
        assert!(!prompt.contains(communication_guidance(CommunicationPreference::Direct)));
        assert!(prompt.ends_with("when they need support in communication."));
    }

    #[test]
    fn general_prompt_summarizes_profile() {
        let prompt = PromptRenderer::render(ChatMode::General, &profile());

        assert!(prompt.contains("- Learning Style: Visual"));
        assert!(prompt.contains("- Communication Style: Professional"));
        assert!(prompt.contains("- Overall Adaptability: 80%"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let learner = profile();
        assert_eq!(
            PromptRenderer::render(ChatMode::Learning, &learner),
            PromptRenderer::render(ChatMode::Learning, &learner)
        );
    }

    #[test]
    fn additional_context_is_appended_pretty_printed() {
        let prompt = PromptRenderer::with_additional_context(
            "base".to_string(),
            &json!({ "topic": "Fractions" }),
        );

        assert_eq!(
            prompt,
            "base\n\nADDITIONAL CONTEXT:\n{\n  \"topic\": \"Fractions\"\n}"
        );
    }

    #[test]
    fn null_context_leaves_prompt_unchanged() {
        let prompt = PromptRenderer::with_additional_context("base".to_string(), &JsonValue::Null);
        assert_eq!(prompt, "base");
    }
}
