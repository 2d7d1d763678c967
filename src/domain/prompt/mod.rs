//! Prompt domain - system prompts, situational modifiers, and fallback replies.

mod fallback;
mod mode;
mod modifiers;
mod renderer;

pub use fallback::{fallback_reply, FALLBACK_NOTE};
pub use mode::ChatMode;
pub use modifiers::{
    adaptive_modifiers, with_adaptive_guidance, AdvocacyContext, EmotionalState,
    LearningContext, PromptContext, ADAPTIVE_GUIDANCE_HEADER, BEGINNER_COMPREHENSION_BELOW,
    LOW_ENGAGEMENT_BELOW,
};
pub use renderer::{
    communication_guidance, learning_style_guidance, PromptRenderer, ADDITIONAL_CONTEXT_HEADER,
    NOT_YET_IDENTIFIED,
};
