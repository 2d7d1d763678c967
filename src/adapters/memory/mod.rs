//! In-memory repository adapters.
//!
//! Used by tests and by the binary when no database URL is configured.

mod insight_repository;
mod profile_repository;

pub use insight_repository::InMemoryInsightRepository;
pub use profile_repository::InMemoryProfileRepository;
