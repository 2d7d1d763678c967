//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `ProfileRepository` - Cognitive twin profiles
//! - `InsightRepository` - Generated learning insights
//!
//! ## Event Ports
//!
//! - `EventPublisher` - Port for publishing domain events
//! - `EventSubscriber` - Port for subscribing to domain events
//! - `EventHandler` - Handler that processes incoming events
//!
//! ## Integration Ports
//!
//! - `AIProvider` - Chat-completion provider
//! - `SessionValidator` - Bearer token validation

mod ai_provider;
mod event_publisher;
mod event_subscriber;
mod insight_repository;
mod profile_repository;
mod session_validator;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, ProviderInfo, RequestMetadata,
    TokenUsage,
};
pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventHandler, EventSubscriber};
pub use insight_repository::InsightRepository;
pub use profile_repository::ProfileRepository;
pub use session_validator::SessionValidator;
