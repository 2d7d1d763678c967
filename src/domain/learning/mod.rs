//! Learning domain - session records, analysis, and insights.
//!
//! # Flow
//!
//! ```text
//! SessionRecord + CognitiveProfile
//!         │
//!         ▼
//!   SessionAnalyzer::analyze
//!         │
//!         ▼
//! SessionAnalysis { profile_update, insights, scores }
//! ```

mod analyzer;
mod events;
mod insight;
mod session;

pub use analyzer::*;
pub use events::{SessionAnalysisFailed, SessionAnalyzed, COGNITIVE_TWIN_AGGREGATE};
pub use insight::{Insight, InsightPriority, InsightType, StoredInsight};
pub use session::{
    ChatMessage, Difficulty, EngagementMetrics, MessageRole, SessionContext, SessionRecord,
    CLARIFICATION_PHRASES, DEFAULT_TOPIC,
};
