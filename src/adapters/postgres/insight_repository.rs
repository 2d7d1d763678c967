//! PostgreSQL implementation of InsightRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value as JsonValue};
use sqlx::PgPool;
use uuid::Uuid;

use super::parse_user_id_as_uuid;
use crate::domain::foundation::{DomainError, InsightId, Timestamp, UserId};
use crate::domain::learning::{Insight, StoredInsight};
use crate::ports::InsightRepository;

pub struct PostgresInsightRepository {
    pool: PgPool,
}

impl PostgresInsightRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct InsightRow {
    id: Uuid,
    insight_type: String,
    title: String,
    description: String,
    priority: String,
    is_actionable: bool,
    is_read: bool,
    metadata: Option<JsonValue>,
    created_at: DateTime<Utc>,
}

impl InsightRow {
    fn into_stored(self, user_id: &UserId) -> Result<StoredInsight, DomainError> {
        let metadata = match self.metadata {
            Some(JsonValue::Object(map)) => map,
            _ => Map::new(),
        };

        Ok(StoredInsight {
            id: InsightId::from_uuid(self.id),
            user_id: user_id.clone(),
            insight: Insight {
                insight_type: self.insight_type.parse().map_err(DomainError::database)?,
                title: self.title,
                description: self.description,
                priority: self.priority.parse().map_err(DomainError::database)?,
                actionable: self.is_actionable,
                metadata,
            },
            is_read: self.is_read,
            created_at: Timestamp::from_datetime(self.created_at),
        })
    }
}

#[async_trait]
impl InsightRepository for PostgresInsightRepository {
    async fn insert_all(&self, insights: &[StoredInsight]) -> Result<(), DomainError> {
        if insights.is_empty() {
            return Ok(());
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database(format!("Failed to begin transaction: {}", e)))?;

        for stored in insights {
            let user_uuid = parse_user_id_as_uuid(&stored.user_id)?;
            sqlx::query(
                r#"
                INSERT INTO neural_insights (
                    id, user_id, insight_type, title, description, priority,
                    is_read, is_actionable, metadata, created_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                "#,
            )
            .bind(stored.id.as_uuid())
            .bind(user_uuid)
            .bind(stored.insight.insight_type.to_string())
            .bind(&stored.insight.title)
            .bind(&stored.insight.description)
            .bind(stored.insight.priority.to_string())
            .bind(stored.is_read)
            .bind(stored.insight.actionable)
            .bind(JsonValue::Object(stored.insight.metadata.clone()))
            .bind(stored.created_at.as_datetime())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database(format!("Failed to save insight: {}", e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database(format!("Failed to commit insights: {}", e)))?;

        Ok(())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<StoredInsight>, DomainError> {
        let user_uuid = parse_user_id_as_uuid(user_id)?;

        let rows: Vec<InsightRow> = sqlx::query_as(
            r#"
            SELECT id, insight_type, title, description, priority,
                   is_actionable, is_read, metadata, created_at
            FROM neural_insights
            WHERE user_id = $1
              AND (expires_at IS NULL OR expires_at > now())
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_uuid)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to load insights: {}", e)))?;

        rows.into_iter()
            .map(|row| row.into_stored(user_id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::learning::{InsightPriority, InsightType};
    use serde_json::json;

    fn row(insight_type: &str, metadata: Option<JsonValue>) -> InsightRow {
        InsightRow {
            id: Uuid::new_v4(),
            insight_type: insight_type.to_string(),
            title: "High Error Rate".to_string(),
            description: "Slow down".to_string(),
            priority: "high".to_string(),
            is_actionable: true,
            is_read: false,
            metadata,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn row_maps_to_stored_insight() {
        let user_id = UserId::new("user-1").unwrap();
        let stored = row("warning", Some(json!({ "mistakeCount": 3 })))
            .into_stored(&user_id)
            .unwrap();

        assert_eq!(stored.insight.insight_type, InsightType::Warning);
        assert_eq!(stored.insight.priority, InsightPriority::High);
        assert!(stored.insight.actionable);
        assert_eq!(stored.insight.metadata["mistakeCount"], 3);
    }

    #[test]
    fn non_object_metadata_is_dropped() {
        let stored = row("pattern", Some(json!("oops")))
            .into_stored(&UserId::new("user-1").unwrap())
            .unwrap();

        assert!(stored.insight.metadata.is_empty());
    }

    #[test]
    fn unknown_type_is_a_database_error() {
        let err = row("mystery", None)
            .into_stored(&UserId::new("user-1").unwrap())
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
