//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresProfileRepository` - `profiles` and `cognitive_twins` tables
//! - `PostgresInsightRepository` - `neural_insights` table

mod insight_repository;
mod profile_repository;

pub use insight_repository::PostgresInsightRepository;
pub use profile_repository::PostgresProfileRepository;

use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};

/// User ids issued by the identity provider are UUIDs in storage.
fn parse_user_id_as_uuid(user_id: &UserId) -> Result<Uuid, DomainError> {
    Uuid::parse_str(user_id.as_str()).map_err(|e| {
        DomainError::new(
            ErrorCode::ValidationFailed,
            format!("User ID must be a valid UUID: {}", e),
        )
    })
}
