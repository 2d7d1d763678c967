//! Authentication configuration
//!
//! Bearer tokens are Supabase access tokens: HS256 JWTs signed with the
//! project's JWT secret.

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;
use crate::adapters::auth::{SupabaseConfig, DEFAULT_AUDIENCE};

/// Shortest JWT secret accepted outside development.
const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Supabase project JWT secret
    pub jwt_secret: Secret<String>,

    /// Expected `aud` claim
    #[serde(default = "default_audience")]
    pub audience: String,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: Secret::new(jwt_secret.into()),
            audience: default_audience(),
        }
    }

    /// Settings for the Supabase session validator.
    pub fn supabase(&self) -> SupabaseConfig {
        SupabaseConfig::new(self.jwt_secret.expose_secret().clone())
            .with_audience(self.audience.clone())
    }

    /// Short secrets are tolerated in development only.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if self.audience.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__AUDIENCE"));
        }
        if *environment != Environment::Development && secret.len() < MIN_SECRET_LEN {
            return Err(ValidationError::JwtSecretTooShort);
        }
        Ok(())
    }
}

fn default_audience() -> String {
    DEFAULT_AUDIENCE.to_string()
}
