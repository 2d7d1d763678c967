//! In-memory insight repository.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::learning::StoredInsight;
use crate::ports::InsightRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryInsightRepository {
    insights: Arc<RwLock<Vec<StoredInsight>>>,
    fail_with: Option<DomainError>,
}

impl InMemoryInsightRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call returns the given error.
    pub fn failing(error: DomainError) -> Self {
        Self {
            fail_with: Some(error),
            ..Self::default()
        }
    }

    pub async fn count(&self) -> usize {
        self.insights.read().await.len()
    }

    fn check(&self) -> Result<(), DomainError> {
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl InsightRepository for InMemoryInsightRepository {
    async fn insert_all(&self, insights: &[StoredInsight]) -> Result<(), DomainError> {
        self.check()?;
        self.insights.write().await.extend_from_slice(insights);
        Ok(())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<StoredInsight>, DomainError> {
        self.check()?;
        let mut found: Vec<StoredInsight> = self
            .insights
            .read()
            .await
            .iter()
            .filter(|stored| &stored.user_id == user_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.as_datetime().cmp(a.created_at.as_datetime()));
        Ok(found)
    }
}
