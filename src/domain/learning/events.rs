//! Learning domain events.
//!
//! Published by the background analysis worker. `SessionAnalysisFailed` is
//! the channel through which failed background work becomes observable.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{domain_event, EventId, Timestamp, UserId};

/// Aggregate type shared by learning events.
pub const COGNITIVE_TWIN_AGGREGATE: &str = "CognitiveTwin";

/// A session was analyzed and its results persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionAnalyzed {
    pub event_id: EventId,
    pub user_id: UserId,
    pub topic: String,
    pub comprehension_score: f64,
    pub engagement_score: f64,
    pub insight_count: usize,
    pub analyzed_at: Timestamp,
}

domain_event!(
    SessionAnalyzed,
    "learning.session_analyzed.v1",
    aggregate = (COGNITIVE_TWIN_AGGREGATE, user_id),
    at = analyzed_at
);

/// Background analysis of a session failed; nothing was persisted past the
/// failing step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionAnalysisFailed {
    pub event_id: EventId,
    pub user_id: UserId,
    pub topic: String,
    pub error_code: String,
    pub reason: String,
    pub failed_at: Timestamp,
}

domain_event!(
    SessionAnalysisFailed,
    "learning.session_analysis_failed.v1",
    aggregate = (COGNITIVE_TWIN_AGGREGATE, user_id),
    at = failed_at
);
