//! AnalyzeSessionHandler - Command handler for completed learning sessions.
//!
//! Runs the session analyzer against a profile snapshot, persists the
//! resulting profile update and insights, then announces the result.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{CommandMetadata, DomainError, EventEnvelope, EventId, Timestamp};
use crate::domain::learning::{
    SessionAnalysis, SessionAnalyzed, SessionAnalyzer, SessionRecord, StoredInsight,
};
use crate::domain::twin::CognitiveProfile;
use crate::ports::{EventPublisher, InsightRepository, ProfileRepository};

/// Command to analyze one session.
#[derive(Debug, Clone)]
pub struct AnalyzeSessionCommand {
    pub session: SessionRecord,
    /// Profile as it was when the chat request was served.
    pub profile: CognitiveProfile,
}

/// Handler for session analysis.
pub struct AnalyzeSessionHandler {
    profiles: Arc<dyn ProfileRepository>,
    insights: Arc<dyn InsightRepository>,
    publisher: Arc<dyn EventPublisher>,
}

impl AnalyzeSessionHandler {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        insights: Arc<dyn InsightRepository>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            profiles,
            insights,
            publisher,
        }
    }

    /// Analyzes the session and persists its results for `metadata.user_id`.
    ///
    /// Steps run in order and stop at the first failure: analyze, upsert the
    /// profile update, store insights, publish `SessionAnalyzed`.
    pub async fn handle(
        &self,
        cmd: AnalyzeSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<SessionAnalysis, DomainError> {
        let user_id = &metadata.user_id;
        let analysis = SessionAnalyzer::analyze(&cmd.session, &cmd.profile)?;

        self.profiles
            .upsert(user_id, &analysis.profile_update)
            .await?;

        let stored: Vec<StoredInsight> = analysis
            .insights
            .iter()
            .cloned()
            .map(|insight| StoredInsight::new(user_id.clone(), insight))
            .collect();
        self.insights.insert_all(&stored).await?;

        let event = SessionAnalyzed {
            event_id: EventId::new(),
            user_id: user_id.clone(),
            topic: cmd.session.topic.clone(),
            comprehension_score: analysis.comprehension_score.into(),
            engagement_score: analysis.engagement_score.into(),
            insight_count: stored.len(),
            analyzed_at: Timestamp::now(),
        };
        let mut envelope = EventEnvelope::from_event(&event)
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(user_id.to_string());
        if let Some(trace_id) = metadata.trace_id() {
            envelope = envelope.with_trace_id(trace_id);
        }
        self.publisher.publish(envelope).await?;

        info!(
            user_id = %user_id,
            topic = %cmd.session.topic,
            comprehension = f64::from(analysis.comprehension_score),
            insights = stored.len(),
            "Learning session analyzed"
        );

        Ok(analysis)
    }
}
