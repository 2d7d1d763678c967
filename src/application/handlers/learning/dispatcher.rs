//! AnalysisDispatcher - background hand-off for session analysis.
//!
//! Chat requests must not wait for analysis, and analysis failures must not
//! vanish. Jobs go through a bounded queue to a single worker task; every
//! failed job is logged and published as `SessionAnalysisFailed`.

use std::sync::{Arc, Mutex};

use thiserror::Error;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use super::{AnalyzeSessionCommand, AnalyzeSessionHandler};
use crate::domain::foundation::{
    CommandMetadata, DomainError, ErrorCode, EventEnvelope, EventId, Timestamp,
};
use crate::domain::learning::SessionAnalysisFailed;
use crate::ports::EventPublisher;

/// Queue capacity used when configuration does not set one.
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// A session queued for background analysis.
#[derive(Debug, Clone)]
pub struct AnalysisJob {
    pub command: AnalyzeSessionCommand,
    pub metadata: CommandMetadata,
}

impl AnalysisJob {
    /// Pins the correlation id so the worker's events match the request.
    pub fn new(command: AnalyzeSessionCommand, metadata: CommandMetadata) -> Self {
        Self {
            command,
            metadata: metadata.ensure_correlation_id(),
        }
    }
}

/// Why a job could not be queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("analysis queue is full")]
    QueueFull,

    #[error("analysis queue is closed")]
    Closed,
}

impl From<DispatchError> for DomainError {
    fn from(err: DispatchError) -> Self {
        DomainError::new(ErrorCode::QueueUnavailable, err.to_string())
    }
}

/// Owns the analysis queue and its worker task.
pub struct AnalysisDispatcher {
    sender: Mutex<Option<mpsc::Sender<AnalysisJob>>>,
    worker: tokio::sync::Mutex<Option<JoinHandle<()>>>,
}

impl AnalysisDispatcher {
    /// Starts the worker on the current tokio runtime.
    ///
    /// A capacity of zero is raised to one.
    pub fn spawn(
        handler: Arc<AnalyzeSessionHandler>,
        publisher: Arc<dyn EventPublisher>,
        capacity: usize,
    ) -> Self {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let worker = tokio::spawn(run_worker(receiver, handler, publisher));

        Self {
            sender: Mutex::new(Some(sender)),
            worker: tokio::sync::Mutex::new(Some(worker)),
        }
    }

    /// Queues a job without waiting.
    pub fn dispatch(&self, job: AnalysisJob) -> Result<(), DispatchError> {
        let sender = self
            .sender
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
            .ok_or(DispatchError::Closed)?;

        sender.try_send(job).map_err(|err| match err {
            TrySendError::Full(_) => DispatchError::QueueFull,
            TrySendError::Closed(_) => DispatchError::Closed,
        })
    }

    /// Closes the queue, lets the worker drain queued jobs, and waits for it.
    ///
    /// Calling it again is a no-op.
    pub async fn shutdown(&self) {
        if let Ok(mut guard) = self.sender.lock() {
            guard.take();
        }

        let worker = self.worker.lock().await.take();
        if let Some(worker) = worker {
            if let Err(err) = worker.await {
                error!(error = %err, "Analysis worker terminated abnormally");
            }
        }
    }
}

async fn run_worker(
    mut receiver: mpsc::Receiver<AnalysisJob>,
    handler: Arc<AnalyzeSessionHandler>,
    publisher: Arc<dyn EventPublisher>,
) {
    while let Some(job) = receiver.recv().await {
        let user_id = job.metadata.user_id.clone();
        let topic = job.command.session.topic.clone();
        let metadata = job.metadata.clone();

        if let Err(err) = handler.handle(job.command, job.metadata).await {
            warn!(
                user_id = %user_id,
                topic = %topic,
                error_code = %err.code,
                error = %err.message,
                "Background session analysis failed"
            );
            report_failure(publisher.as_ref(), &metadata, topic, &err).await;
        }
    }

    debug!("Analysis queue closed, worker exiting");
}

async fn report_failure(
    publisher: &dyn EventPublisher,
    metadata: &CommandMetadata,
    topic: String,
    err: &DomainError,
) {
    let event = SessionAnalysisFailed {
        event_id: EventId::new(),
        user_id: metadata.user_id.clone(),
        topic,
        error_code: err.code.to_string(),
        reason: err.message.clone(),
        failed_at: Timestamp::now(),
    };
    let envelope = EventEnvelope::from_event(&event)
        .with_correlation_id(metadata.correlation_id())
        .with_user_id(metadata.user_id.to_string());

    if let Err(publish_err) = publisher.publish(envelope).await {
        error!(
            user_id = %metadata.user_id,
            error = %publish_err,
            "Failed to publish session analysis failure"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::{InMemoryInsightRepository, InMemoryProfileRepository};
    use crate::domain::foundation::UserId;
    use crate::domain::learning::{ChatMessage, SessionContext, SessionRecord};
    use crate::domain::twin::CognitiveProfile;
    use crate::ports::{InsightRepository, ProfileRepository};

    fn user() -> UserId {
        UserId::new("learner-7").unwrap()
    }

    fn job() -> AnalysisJob {
        let session = SessionRecord::from_conversation(
            vec![ChatMessage::user("What is photosynthesis?")],
            &SessionContext::default(),
        );
        AnalysisJob::new(
            AnalyzeSessionCommand {
                session,
                profile: CognitiveProfile::default_for(user()),
            },
            CommandMetadata::new(user()),
        )
    }

    fn dispatcher_with(
        profiles: Arc<dyn ProfileRepository>,
        insights: Arc<dyn InsightRepository>,
        bus: Arc<InMemoryEventBus>,
        capacity: usize,
    ) -> AnalysisDispatcher {
        let handler = Arc::new(AnalyzeSessionHandler::new(profiles, insights, bus.clone()));
        AnalysisDispatcher::spawn(handler, bus, capacity)
    }

    #[tokio::test]
    async fn dispatched_job_is_processed_before_shutdown_returns() {
        let profiles = Arc::new(InMemoryProfileRepository::with_recording());
        let bus = Arc::new(InMemoryEventBus::new());
        let dispatcher = dispatcher_with(
            profiles.clone(),
            Arc::new(InMemoryInsightRepository::new()),
            bus.clone(),
            4,
        );

        dispatcher.dispatch(job()).unwrap();
        dispatcher.shutdown().await;

        assert_eq!(profiles.recorded_updates().await.len(), 1);
        assert!(bus.has_event("learning.session_analyzed.v1"));
    }

    #[tokio::test]
    async fn repository_failure_is_published_as_event() {
        let bus = Arc::new(InMemoryEventBus::new());
        let dispatcher = dispatcher_with(
            Arc::new(InMemoryProfileRepository::failing(DomainError::database(
                "connection refused",
            ))),
            Arc::new(InMemoryInsightRepository::new()),
            bus.clone(),
            4,
        );

        let job = job();
        let correlation_id = job.metadata.correlation_id();
        dispatcher.dispatch(job).unwrap();
        dispatcher.shutdown().await;

        let failures = bus.events_of_type("learning.session_analysis_failed.v1");
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].aggregate_id, "learner-7");
        assert_eq!(failures[0].payload["error_code"], "DATABASE_ERROR");
        assert_eq!(
            failures[0].metadata.correlation_id.as_deref(),
            Some(correlation_id.as_str())
        );
        assert!(!bus.has_event("learning.session_analyzed.v1"));
    }

    #[tokio::test]
    async fn dispatch_after_shutdown_reports_closed() {
        let bus = Arc::new(InMemoryEventBus::new());
        let dispatcher = dispatcher_with(
            Arc::new(InMemoryProfileRepository::new()),
            Arc::new(InMemoryInsightRepository::new()),
            bus,
            1,
        );

        dispatcher.shutdown().await;
        dispatcher.shutdown().await;

        assert_eq!(dispatcher.dispatch(job()), Err(DispatchError::Closed));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn full_queue_is_reported_instead_of_dropped() {
        let bus = Arc::new(InMemoryEventBus::new());
        let dispatcher = dispatcher_with(
            Arc::new(InMemoryProfileRepository::new()),
            Arc::new(InMemoryInsightRepository::new()),
            bus,
            1,
        );

        // The worker cannot run until this task yields, so the second job
        // finds the single slot taken.
        dispatcher.dispatch(job()).unwrap();
        assert_eq!(dispatcher.dispatch(job()), Err(DispatchError::QueueFull));

        dispatcher.shutdown().await;
    }

    #[test]
    fn dispatch_error_maps_to_queue_unavailable() {
        let err: DomainError = DispatchError::QueueFull.into();
        assert_eq!(err.code, ErrorCode::QueueUnavailable);
    }
}
