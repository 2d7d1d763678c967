//! Situational prompt modifiers layered on top of the mode prompt.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::ChatMode;
use crate::domain::advocacy::FormalityLevel;
use crate::domain::learning::Difficulty;
use crate::domain::twin::CognitiveProfile;

/// Header introducing adaptive modifiers in a system prompt.
pub const ADAPTIVE_GUIDANCE_HEADER: &str = "\n\nADAPTIVE GUIDANCE:\n";

/// Engagement below this level asks for a more interactive explanation.
pub const LOW_ENGAGEMENT_BELOW: f64 = 50.0;

/// Beginners below this comprehension get simpler language.
pub const BEGINNER_COMPREHENSION_BELOW: f64 = 70.0;

/// How the user feels going into an advocacy conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionalState {
    Calm,
    Anxious,
    Frustrated,
    Hopeful,
}

/// Situation of an ongoing learning conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LearningContext {
    pub topic: String,
    pub difficulty: Difficulty,
    #[serde(alias = "mistakes")]
    pub previous_mistakes: Vec<String>,
    pub session_duration: f64,
    pub engagement_level: Option<f64>,
}

/// Situation the user needs an advocate for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdvocacyContext {
    pub scenario: String,
    pub recipient: String,
    pub cultural_context: String,
    pub formality_level: Option<FormalityLevel>,
    pub user_intent: String,
    pub emotional_state: Option<EmotionalState>,
    pub constraints: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PromptContext {
    Learning(LearningContext),
    Advocacy(AdvocacyContext),
}

impl PromptContext {
    /// Reads the caller's free-form context as the context type of `mode`.
    ///
    /// Returns `None` for the general mode or when the context does not
    /// have the expected shape.
    pub fn for_mode(mode: ChatMode, context: &JsonValue) -> Option<Self> {
        if !context.is_object() {
            return None;
        }
        match mode {
            ChatMode::Learning => serde_json::from_value(context.clone())
                .ok()
                .map(PromptContext::Learning),
            ChatMode::Advocacy => serde_json::from_value(context.clone())
                .ok()
                .map(PromptContext::Advocacy),
            ChatMode::General => None,
        }
    }
}

/// Produces newline-joined guidance lines for the current situation.
///
/// Returns an empty string when nothing applies.
pub fn adaptive_modifiers(profile: &CognitiveProfile, context: &PromptContext) -> String {
    let mut modifiers: Vec<String> = Vec::new();

    match context {
        PromptContext::Learning(learning) => {
            if !learning.previous_mistakes.is_empty() {
                modifiers.push(format!(
                    "The user previously struggled with: {}. Address these gaps.",
                    learning.previous_mistakes.join(", ")
                ));
            }
            if learning
                .engagement_level
                .is_some_and(|level| level < LOW_ENGAGEMENT_BELOW)
            {
                modifiers.push(
                    "Engagement is low. Make the explanation more interactive and interesting."
                        .to_string(),
                );
            }
            if learning.difficulty == Difficulty::Beginner
                && profile.comprehension_score().value() < BEGINNER_COMPREHENSION_BELOW
            {
                modifiers.push(
                    "Use simpler language and more examples. Break down complex concepts."
                        .to_string(),
                );
            }
        }
        PromptContext::Advocacy(advocacy) => {
            if advocacy.emotional_state == Some(EmotionalState::Anxious) {
                modifiers.push(
                    "The user is anxious. Be extra confident and reassuring in your advocacy."
                        .to_string(),
                );
            }
            if advocacy.formality_level == Some(FormalityLevel::Diplomatic) {
                modifiers.push(
                    "This requires diplomatic language. Be extra careful with word choice."
                        .to_string(),
                );
            }
        }
    }

    modifiers.join("\n")
}

/// Appends non-empty modifiers under the adaptive guidance header.
pub fn with_adaptive_guidance(prompt: String, modifiers: &str) -> String {
    if modifiers.is_empty() {
        prompt
    } else {
        format!("{prompt}{ADAPTIVE_GUIDANCE_HEADER}{modifiers}")
    }
}
