//! AnalysisLogHandler - structured log sink for background analysis outcomes.
//!
//! ```ignore
//! event_bus.subscribe_all(
//!     &[SESSION_ANALYZED_EVENT, SESSION_ANALYSIS_FAILED_EVENT],
//!     Arc::new(AnalysisLogHandler),
//! );
//! ```

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::domain::learning::{SessionAnalysisFailed, SessionAnalyzed};
use crate::ports::EventHandler;

pub const SESSION_ANALYZED_EVENT: &str = "learning.session_analyzed.v1";
pub const SESSION_ANALYSIS_FAILED_EVENT: &str = "learning.session_analysis_failed.v1";

/// Logs analysis outcomes. Failures are logged at `warn`.
pub struct AnalysisLogHandler;

#[async_trait]
impl EventHandler for AnalysisLogHandler {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        match event.event_type.as_str() {
            SESSION_ANALYZED_EVENT => {
                let analyzed: SessionAnalyzed = event.payload_as().map_err(|e| {
                    DomainError::validation("payload", format!("Malformed event payload: {}", e))
                })?;
                tracing::info!(
                    user_id = %analyzed.user_id,
                    topic = %analyzed.topic,
                    comprehension = analyzed.comprehension_score,
                    engagement = analyzed.engagement_score,
                    insights = analyzed.insight_count,
                    "Session analyzed"
                );
            }
            SESSION_ANALYSIS_FAILED_EVENT => {
                let failed: SessionAnalysisFailed = event.payload_as().map_err(|e| {
                    DomainError::validation("payload", format!("Malformed event payload: {}", e))
                })?;
                tracing::warn!(
                    user_id = %failed.user_id,
                    topic = %failed.topic,
                    code = %failed.error_code,
                    reason = %failed.reason,
                    "Session analysis failed"
                );
            }
            other => {
                tracing::debug!(event_type = %other, "Ignoring unrelated event");
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "AnalysisLogHandler"
    }
}
