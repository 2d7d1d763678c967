//! In-memory profile repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::twin::{CognitiveProfile, ProfileUpdate};
use crate::ports::ProfileRepository;

/// Stores profiles in a map keyed by user id.
///
/// `upsert` on an unknown user starts from `CognitiveProfile::default_for`,
/// mirroring the insert path of the database adapter. Received updates are
/// only kept when built with [`with_recording`](Self::with_recording).
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileRepository {
    profiles: Arc<RwLock<HashMap<UserId, CognitiveProfile>>>,
    updates: Option<Arc<RwLock<Vec<(UserId, ProfileUpdate)>>>>,
    fail_with: Option<DomainError>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also keeps every update passed to `upsert`, for assertions.
    pub fn with_recording() -> Self {
        Self {
            updates: Some(Arc::default()),
            ..Self::default()
        }
    }

    /// Every call returns the given error.
    pub fn failing(error: DomainError) -> Self {
        Self {
            fail_with: Some(error),
            ..Self::default()
        }
    }

    pub async fn insert(&self, profile: CognitiveProfile) {
        self.profiles
            .write()
            .await
            .insert(profile.user_id().clone(), profile);
    }

    /// Updates received through `upsert`, oldest first. Empty unless
    /// recording.
    pub async fn recorded_updates(&self) -> Vec<(UserId, ProfileUpdate)> {
        match &self.updates {
            Some(updates) => updates.read().await.clone(),
            None => Vec::new(),
        }
    }

    fn check(&self) -> Result<(), DomainError> {
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn get(&self, user_id: &UserId) -> Result<Option<CognitiveProfile>, DomainError> {
        self.check()?;
        Ok(self.profiles.read().await.get(user_id).cloned())
    }

    async fn upsert(&self, user_id: &UserId, update: &ProfileUpdate) -> Result<(), DomainError> {
        self.check()?;

        let mut profiles = self.profiles.write().await;
        profiles
            .entry(user_id.clone())
            .or_insert_with(|| CognitiveProfile::default_for(user_id.clone()))
            .apply_update(update);

        if let Some(updates) = &self.updates {
            updates.write().await.push((user_id.clone(), update.clone()));
        }
        Ok(())
    }
}
