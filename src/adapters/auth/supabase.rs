//! Supabase session validator.
//!
//! Supabase issues HS256 access tokens signed with the project's JWT
//! secret. Signature, expiry and audience are validated locally; no network
//! round-trip is needed.
//!
//! # Example
//!
//! ```ignore
//! let validator = SupabaseSessionValidator::new(SupabaseConfig::new(jwt_secret));
//! let user = validator.validate(bearer_token).await?;
//! ```

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Audience Supabase puts on tokens of signed-in users.
pub const DEFAULT_AUDIENCE: &str = "authenticated";

#[derive(Clone)]
pub struct SupabaseConfig {
    jwt_secret: Secret<String>,
    pub audience: String,
}

impl SupabaseConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: Secret::new(jwt_secret.into()),
            audience: DEFAULT_AUDIENCE.to_string(),
        }
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }
}

/// Claims read from a Supabase access token.
#[derive(Debug, Deserialize)]
struct SupabaseClaims {
    sub: String,
    email: Option<String>,
    role: Option<String>,
}

pub struct SupabaseSessionValidator {
    config: SupabaseConfig,
    decoding_key: DecodingKey,
}

impl SupabaseSessionValidator {
    pub fn new(config: SupabaseConfig) -> Self {
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.expose_secret().as_bytes());
        Self {
            config,
            decoding_key,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub", "aud"]);
        validation
    }
}

#[async_trait]
impl SessionValidator for SupabaseSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let token_data = decode::<SupabaseClaims>(token, &self.decoding_key, &self.validation())
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token expired");
                        AuthError::TokenExpired
                    }
                    ErrorKind::InvalidAudience => {
                        tracing::warn!("Invalid audience in token");
                        AuthError::InvalidToken
                    }
                    _ => {
                        tracing::warn!("Token validation failed: {}", e);
                        AuthError::InvalidToken
                    }
                }
            })?;
        let claims = token_data.claims;

        let user_id = UserId::new(&claims.sub).map_err(|_| {
            tracing::warn!("Invalid user ID in token: {}", claims.sub);
            AuthError::InvalidToken
        })?;

        Ok(AuthenticatedUser::new(user_id, claims.email, claims.role))
    }
}

impl std::fmt::Debug for SupabaseSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseSessionValidator")
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    const SECRET: &str = "super-secret-jwt-token-with-at-least-32-characters";

    fn token(claims: serde_json::Value, secret: &str) -> String {
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn validator() -> SupabaseSessionValidator {
        SupabaseSessionValidator::new(SupabaseConfig::new(SECRET))
    }

    fn valid_claims() -> serde_json::Value {
        json!({
            "sub": "9a1e6f3c-52f4-4c1b-9b39-0d3f0c1d2e4f",
            "email": "learner@example.com",
            "role": "authenticated",
            "aud": "authenticated",
            "exp": Utc::now().timestamp() + 3600,
        })
    }

    #[tokio::test]
    async fn accepts_valid_token() {
        let user = validator()
            .validate(&token(valid_claims(), SECRET))
            .await
            .unwrap();

        assert_eq!(user.id.as_str(), "9a1e6f3c-52f4-4c1b-9b39-0d3f0c1d2e4f");
        assert_eq!(user.email.as_deref(), Some("learner@example.com"));
        assert_eq!(user.role.as_deref(), Some("authenticated"));
    }

    #[tokio::test]
    async fn rejects_wrong_signature() {
        let result = validator()
            .validate(&token(valid_claims(), "another-secret-that-is-also-long-enough"))
            .await;

        assert_eq!(result.unwrap_err(), AuthError::InvalidToken);
    }

    #[tokio::test]
    async fn reports_expired_tokens() {
        let mut claims = valid_claims();
        claims["exp"] = json!(Utc::now().timestamp() - 3600);

        let result = validator().validate(&token(claims, SECRET)).await;

        assert_eq!(result.unwrap_err(), AuthError::TokenExpired);
    }

    #[tokio::test]
    async fn rejects_wrong_audience() {
        let mut claims = valid_claims();
        claims["aud"] = json!("service_role");

        let result = validator().validate(&token(claims, SECRET)).await;

        assert_eq!(result.unwrap_err(), AuthError::InvalidToken);
    }

    #[tokio::test]
    async fn rejects_blank_subject() {
        let mut claims = valid_claims();
        claims["sub"] = json!("  ");

        let result = validator().validate(&token(claims, SECRET)).await;

        assert_eq!(result.unwrap_err(), AuthError::InvalidToken);
    }

    #[tokio::test]
    async fn rejects_garbage() {
        let result = validator().validate("not-a-jwt").await;
        assert_eq!(result.unwrap_err(), AuthError::InvalidToken);
    }
}
