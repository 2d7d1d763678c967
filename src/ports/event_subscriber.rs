//! EventSubscriber port - routing published events to handlers.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Reacts to the event types it was subscribed to.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Shown in logs and in aggregated handler errors.
    fn name(&self) -> &'static str;
}

/// Registration side of the bus. Subscriptions are made at startup.
pub trait EventSubscriber: Send + Sync {
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>);

    /// Registers one handler for several event types.
    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>) {
        for event_type in event_types {
            self.subscribe(event_type, Arc::clone(&handler));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handlers_and_subscribers_are_object_safe() {
        fn shareable<T: Send + Sync + 'static>() {}
        shareable::<Arc<dyn EventHandler>>();
        shareable::<Arc<dyn EventSubscriber>>();
    }
}
