//! PostgreSQL implementation of ProfileRepository.
//!
//! The declared learning style and communication preference live in
//! `profiles`; everything the analyzer adjusts lives in `cognitive_twins`.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::PgPool;

use super::parse_user_id_as_uuid;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::twin::{CognitiveProfile, ProfileUpdate, StoredTwin};
use crate::ports::ProfileRepository;

pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct DeclaredProfileRow {
    learning_style: Option<String>,
    communication_preference: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct TwinRow {
    comprehension_score: Option<f64>,
    communication_score: Option<f64>,
    adaptability_score: Option<f64>,
    learning_velocity: Option<f64>,
    optimal_learning_hours: Option<JsonValue>,
    strengths: Option<JsonValue>,
    areas_for_improvement: Option<JsonValue>,
    neural_patterns: Option<JsonValue>,
}

fn stored_twin(declared: Option<DeclaredProfileRow>, twin: Option<TwinRow>) -> StoredTwin {
    let mut stored = StoredTwin::default();
    if let Some(declared) = declared {
        stored.learning_style = declared.learning_style;
        stored.communication_preference = declared.communication_preference;
    }
    if let Some(twin) = twin {
        stored.comprehension_score = twin.comprehension_score;
        stored.communication_score = twin.communication_score;
        stored.adaptability_score = twin.adaptability_score;
        stored.learning_velocity = twin.learning_velocity;
        stored.optimal_learning_hours = twin.optimal_learning_hours;
        stored.strengths = twin.strengths;
        stored.areas_for_improvement = twin.areas_for_improvement;
        stored.neural_patterns = twin.neural_patterns;
    }
    stored
}

fn to_json<T: serde::Serialize>(value: Option<&T>) -> Result<Option<JsonValue>, DomainError> {
    value
        .map(serde_json::to_value)
        .transpose()
        .map_err(|e| DomainError::database(format!("Failed to encode profile field: {}", e)))
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn get(&self, user_id: &UserId) -> Result<Option<CognitiveProfile>, DomainError> {
        let user_uuid = parse_user_id_as_uuid(user_id)?;

        let declared: Option<DeclaredProfileRow> = sqlx::query_as(
            r#"
            SELECT learning_style, communication_preference
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(user_uuid)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to load profile: {}", e)))?;

        let twin: Option<TwinRow> = sqlx::query_as(
            r#"
            SELECT comprehension_score::float8 AS comprehension_score,
                   communication_score::float8 AS communication_score,
                   adaptability_score::float8 AS adaptability_score,
                   learning_velocity::float8 AS learning_velocity,
                   optimal_learning_hours, strengths, areas_for_improvement, neural_patterns
            FROM cognitive_twins
            WHERE user_id = $1
            "#,
        )
        .bind(user_uuid)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to load cognitive twin: {}", e)))?;

        if declared.is_none() && twin.is_none() {
            return Ok(None);
        }

        Ok(Some(stored_twin(declared, twin).into_profile(user_id.clone())))
    }

    async fn upsert(&self, user_id: &UserId, update: &ProfileUpdate) -> Result<(), DomainError> {
        let user_uuid = parse_user_id_as_uuid(user_id)?;

        sqlx::query(
            r#"
            INSERT INTO cognitive_twins (
                user_id, comprehension_score, learning_velocity, optimal_learning_hours,
                strengths, areas_for_improvement, neural_patterns, last_sync_at
            ) VALUES (
                $1,
                COALESCE($2, 75),
                COALESCE($3, 1.0),
                COALESCE($4, '{"start": 9, "end": 11}'::jsonb),
                COALESCE($5, '[]'::jsonb),
                COALESCE($6, '[]'::jsonb),
                COALESCE($7, '{}'::jsonb),
                now()
            )
            ON CONFLICT (user_id) DO UPDATE SET
                comprehension_score = COALESCE($2, cognitive_twins.comprehension_score),
                learning_velocity = COALESCE($3, cognitive_twins.learning_velocity),
                optimal_learning_hours = COALESCE($4, cognitive_twins.optimal_learning_hours),
                strengths = COALESCE($5, cognitive_twins.strengths),
                areas_for_improvement = COALESCE($6, cognitive_twins.areas_for_improvement),
                neural_patterns = COALESCE($7, cognitive_twins.neural_patterns),
                last_sync_at = now(),
                updated_at = now()
            "#,
        )
        .bind(user_uuid)
        .bind(update.comprehension_score.map(f64::from))
        .bind(update.learning_velocity.map(f64::from))
        .bind(to_json(update.optimal_learning_hours.as_ref())?)
        .bind(to_json(update.strengths.as_ref())?)
        .bind(to_json(update.areas_for_improvement.as_ref())?)
        .bind(to_json(update.neural_patterns.as_ref())?)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update cognitive twin: {}", e)))?;

        tracing::debug!(user_id = %user_id, "Cognitive twin synced");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::twin::LearningStyle;
    use serde_json::json;

    #[test]
    fn declared_fields_and_twin_fields_are_combined() {
        let stored = stored_twin(
            Some(DeclaredProfileRow {
                learning_style: Some("Kinesthetic".to_string()),
                communication_preference: None,
            }),
            Some(TwinRow {
                comprehension_score: Some(88.0),
                communication_score: None,
                adaptability_score: Some(0.0),
                learning_velocity: Some(1.2),
                optimal_learning_hours: None,
                strengths: Some(json!(["Curiosity"])),
                areas_for_improvement: None,
                neural_patterns: Some(json!({ "visualLearningAffinity": 9 })),
            }),
        );

        let profile = stored.into_profile(UserId::new("user-1").unwrap());

        assert_eq!(profile.learning_style(), LearningStyle::Kinesthetic);
        assert_eq!(profile.comprehension_score().value(), 88.0);
        assert_eq!(
            profile.adaptability_score().value(),
            CognitiveProfile::DEFAULT_ADAPTABILITY
        );
        assert_eq!(profile.strengths(), ["Curiosity".to_string()]);
        assert_eq!(profile.neural_patterns().visual_learning_affinity.value(), 9.0);
    }

    #[test]
    fn missing_rows_hydrate_defaults() {
        let profile = stored_twin(None, None).into_profile(UserId::new("user-1").unwrap());
        assert_eq!(
            profile,
            CognitiveProfile::default_for(UserId::new("user-1").unwrap())
        );
    }

    #[test]
    fn unset_update_fields_encode_as_null() {
        let update = ProfileUpdate::default();
        assert_eq!(to_json(update.strengths.as_ref()).unwrap(), None);

        let update = ProfileUpdate {
            strengths: Some(vec!["Accuracy".to_string()]),
            ..ProfileUpdate::default()
        };
        assert_eq!(
            to_json(update.strengths.as_ref()).unwrap(),
            Some(json!(["Accuracy"]))
        );
    }
}
