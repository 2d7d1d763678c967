//! In-memory event bus.
//!
//! The only bus the service runs with: analysis outcomes are consumed in
//! process. Handlers run sequentially after the envelope is recorded, and
//! never while a lock is held.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::{EventHandler, EventPublisher, EventSubscriber};

/// Envelopes kept for inspection before the oldest is dropped.
pub const DEFAULT_RETENTION: usize = 1024;

#[derive(Default)]
struct BusState {
    routes: HashMap<String, Vec<Arc<dyn EventHandler>>>,
    history: VecDeque<EventEnvelope>,
}

pub struct InMemoryEventBus {
    state: Mutex<BusState>,
    retention: usize,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::with_retention(DEFAULT_RETENTION)
    }

    /// Retention below one is raised to one.
    pub fn with_retention(retention: usize) -> Self {
        Self {
            state: Mutex::new(BusState::default()),
            retention: retention.max(1),
        }
    }

    /// Recorded envelopes, oldest first.
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.state().history.iter().cloned().collect()
    }

    pub fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.state()
            .history
            .iter()
            .filter(|e| e.event_type == event_type)
            .cloned()
            .collect()
    }

    pub fn event_count(&self) -> usize {
        self.state().history.len()
    }

    pub fn has_event(&self, event_type: &str) -> bool {
        self.state()
            .history
            .iter()
            .any(|e| e.event_type == event_type)
    }

    fn state(&self) -> MutexGuard<'_, BusState> {
        self.state
            .lock()
            .expect("InMemoryEventBus: state lock poisoned")
    }

    /// Records the envelope and returns the handlers routed to its type.
    fn record(&self, event: &EventEnvelope) -> Vec<Arc<dyn EventHandler>> {
        let mut state = self.state();
        if state.history.len() == self.retention {
            state.history.pop_front();
        }
        state.history.push_back(event.clone());
        state
            .routes
            .get(&event.event_type)
            .cloned()
            .unwrap_or_default()
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        let handlers = self.record(&event);

        let mut failures = Vec::new();
        for handler in handlers {
            if let Err(err) = handler.handle(event.clone()).await {
                tracing::warn!(
                    handler = handler.name(),
                    event_type = %event.event_type,
                    error = %err,
                    "Event handler failed"
                );
                failures.push(format!("{}: {}", handler.name(), err));
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::InternalError,
                format!("Handler errors: {}", failures.join(", ")),
            ))
        }
    }
}

impl EventSubscriber for InMemoryEventBus {
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>) {
        self.state()
            .routes
            .entry(event_type.to_string())
            .or_default()
            .push(handler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{EventId, EventMetadata, Timestamp};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn envelope(event_type: &str) -> EventEnvelope {
        EventEnvelope {
            event_id: EventId::new(),
            event_type: event_type.to_string(),
            schema_version: 1,
            aggregate_id: "user-1".to_string(),
            aggregate_type: "CognitiveTwin".to_string(),
            occurred_at: Timestamp::now(),
            payload: json!({}),
            metadata: EventMetadata::default(),
        }
    }

    struct Counter(Arc<AtomicUsize>);

    #[async_trait]
    impl EventHandler for Counter {
        async fn handle(&self, _: EventEnvelope) -> Result<(), DomainError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn name(&self) -> &'static str {
            "Counter"
        }
    }

    struct Broken;

    #[async_trait]
    impl EventHandler for Broken {
        async fn handle(&self, _: EventEnvelope) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::InternalError, "boom"))
        }

        fn name(&self) -> &'static str {
            "Broken"
        }
    }

    #[tokio::test]
    async fn records_and_filters_by_type() {
        let bus = InMemoryEventBus::new();

        bus.publish(envelope("type.a")).await.unwrap();
        bus.publish(envelope("type.b")).await.unwrap();
        bus.publish(envelope("type.a")).await.unwrap();

        assert_eq!(bus.event_count(), 3);
        assert_eq!(bus.events_of_type("type.a").len(), 2);
        assert!(bus.has_event("type.b"));
        assert!(!bus.has_event("type.c"));
    }

    #[tokio::test]
    async fn oldest_envelopes_fall_out_of_history() {
        let bus = InMemoryEventBus::with_retention(2);

        for event_type in ["type.a", "type.b", "type.c"] {
            bus.publish(envelope(event_type)).await.unwrap();
        }

        let kept: Vec<String> = bus
            .published_events()
            .into_iter()
            .map(|e| e.event_type)
            .collect();
        assert_eq!(kept, vec!["type.b", "type.c"]);
    }

    #[tokio::test]
    async fn handlers_only_see_their_types() {
        let bus = InMemoryEventBus::new();
        let seen = Arc::new(AtomicUsize::new(0));

        bus.subscribe_all(&["type.a", "type.b"], Arc::new(Counter(seen.clone())));
        bus.subscribe("type.a", Arc::new(Counter(seen.clone())));

        for event_type in ["type.a", "type.b", "type.c"] {
            bus.publish(envelope(event_type)).await.unwrap();
        }

        assert_eq!(seen.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn failing_handler_is_reported_but_event_is_kept() {
        let bus = InMemoryEventBus::new();
        let seen = Arc::new(AtomicUsize::new(0));
        bus.subscribe("type.a", Arc::new(Broken));
        bus.subscribe("type.a", Arc::new(Counter(seen.clone())));

        let err = bus.publish(envelope("type.a")).await.unwrap_err();

        assert!(err.message.contains("Broken: "));
        assert_eq!(seen.load(Ordering::SeqCst), 1);
        assert!(bus.has_event("type.a"));
    }
}
