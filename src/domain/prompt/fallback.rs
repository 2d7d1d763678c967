//! Deterministic replies used when no chat-completion provider is configured.

use super::ChatMode;
use crate::domain::learning::ChatMessage;
use crate::domain::twin::{CognitiveProfile, LearningStyle};

/// Note attached to replies produced in fallback mode.
pub const FALLBACK_NOTE: &str =
    "Using fallback mode. Configure an Azure OpenAI endpoint and API key for full AI capabilities.";

const EXPLANATION_CUES: [&str; 3] = ["explain", "what is", "how"];
const ADVOCACY_REQUEST_CUES: [&str; 3] = ["help", "negotiate", "request"];

/// Builds a reply from the last message of the conversation.
pub fn fallback_reply(
    mode: ChatMode,
    messages: &[ChatMessage],
    profile: &CognitiveProfile,
) -> String {
    let last_message = messages
        .last()
        .map(|message| message.content.to_lowercase())
        .unwrap_or_default();
    let style = profile.learning_style();

    match mode {
        ChatMode::Learning if contains_any(&last_message, &EXPLANATION_CUES) => format!(
            "I'd love to help you understand this concept! Based on your {} learning style, \
             let me break this down for you:\n\n\
             Since you learn best through {}, I'll adapt my explanation accordingly.\n\n\
             To provide you with the most helpful response, please configure the Azure OpenAI \
             API keys in your environment. This will enable me to give you personalized, \
             detailed explanations tailored to your unique cognitive patterns.",
            style.label().to_lowercase(),
            learns_best_through(style),
        ),
        ChatMode::Learning => format!(
            "I'm your Cognitive Twin, ready to help you learn! Your profile shows you're a {} \
             learner with a comprehension score of {}%. What would you like to explore today? \
             I'll adapt my teaching style to match how you learn best.",
            style.label().to_lowercase(),
            profile.comprehension_score(),
        ),
        ChatMode::Advocacy if contains_any(&last_message, &ADVOCACY_REQUEST_CUES) => format!(
            "I understand you need help communicating something important. As your AI advocate, \
             I'll help you craft a message that's:\n\n\
             • {} in tone\n\
             • Culturally sensitive and respectful\n\
             • Clear and effective\n\n\
             Please tell me more about the situation:\n\
             1. Who are you communicating with?\n\
             2. What outcome are you hoping for?\n\
             3. Any specific concerns or constraints?\n\n\
             With this information, I can help you draft the perfect message.",
            profile.communication_preference(),
        ),
        ChatMode::Advocacy => "I'm here to advocate on your behalf. Whether you need help with a \
             fee extension, salary negotiation, complaint resolution, or any other communication \
             challenge, I'll help you express yourself confidently and effectively. What \
             situation can I help you with today?"
            .to_string(),
        ChatMode::General => format!(
            "Hello! I'm Samvaad, your Cognitive Twin. I can help you in two ways:\n\n\
             **Learning Mode**: I'll teach you concepts adapted to your {} learning style.\n\n\
             **Advocacy Mode**: I'll help you communicate effectively in challenging situations.\n\n\
             How can I assist you today?",
            style.label().to_lowercase(),
        ),
    }
}

fn learns_best_through(style: LearningStyle) -> &'static str {
    match style {
        LearningStyle::Visual => "visual representations",
        LearningStyle::Auditory => "verbal explanations",
        LearningStyle::Kinesthetic => "hands-on practice",
        LearningStyle::ReadingWriting => "reading and writing",
    }
}

fn contains_any(text: &str, cues: &[&str]) -> bool {
    cues.iter().any(|cue| text.contains(cue))
}
