//! ProfileRepository port for cognitive profile persistence

use async_trait::async_trait;

use crate::domain::{
    foundation::{DomainError, UserId},
    twin::{CognitiveProfile, ProfileUpdate},
};

/// Repository for cognitive twin profiles
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Load the stored profile, tolerating missing or malformed fields.
    ///
    /// Returns `None` when neither a declared profile nor a twin record exists.
    async fn get(&self, user_id: &UserId) -> Result<Option<CognitiveProfile>, DomainError>;

    /// Apply an analysis update to the user's twin and stamp its sync time.
    async fn upsert(&self, user_id: &UserId, update: &ProfileUpdate) -> Result<(), DomainError>;
}
