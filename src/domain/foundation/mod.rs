//! Foundation module - Shared domain primitives.
//!
//! Value objects, identifiers, error types, and event plumbing that form
//! the vocabulary of the Samvaad domain.

mod auth;
mod bounded;
mod command;
mod errors;
mod events;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub(crate) use bounded::bounded_f64;
pub use bounded::{Affinity, Score};
pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata};
pub use ids::{InsightId, UserId};
pub use timestamp::Timestamp;
