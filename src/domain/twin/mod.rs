//! Cognitive twin domain - the per-user learning and communication profile.
//!
//! # Components
//!
//! - `CognitiveProfile` - the aggregate, with bounded scores and dedup'd lists
//! - `NeuralPatterns` - nested qualitative traits
//! - `ProfileUpdate` - partial record produced by analysis
//! - `StoredTwin` - tolerant hydration from persisted rows
//! - `analyze_message_patterns` - single-message hints

mod message_patterns;
mod neural_patterns;
mod profile;
mod stored;
mod update;

pub use message_patterns::{
    analyze_message_patterns, NeuralPatternHints, ANXIOUS_SOCIAL_COMFORT, VISUAL_CUE_AFFINITY,
};
pub use neural_patterns::{ExplanationLength, FeedbackStyle, NeuralPatterns, StressResponse};
pub use profile::{
    CognitiveProfile, CommunicationPreference, LearningHours, LearningStyle, LearningVelocity,
};
pub use stored::StoredTwin;
pub use update::{merge_unique, ProfileUpdate};
