//! InsightRepository port for generated learning insights

use async_trait::async_trait;

use crate::domain::{
    foundation::{DomainError, UserId},
    learning::StoredInsight,
};

#[async_trait]
pub trait InsightRepository: Send + Sync {
    /// Store a batch of insights. An empty batch is a no-op.
    async fn insert_all(&self, insights: &[StoredInsight]) -> Result<(), DomainError>;

    /// Insights for a user, newest first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<StoredInsight>, DomainError>;
}
