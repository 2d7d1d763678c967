//! Who is calling, as established by a `SessionValidator`.

use super::UserId;
use thiserror::Error;

/// Claims the service reads from a validated access token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// Subject claim; also the cognitive twin's key.
    pub id: UserId,
    pub email: Option<String>,
    /// Supabase issues `authenticated` for signed-in users.
    pub role: Option<String>,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, email: Option<String>, role: Option<String>) -> Self {
        Self { id, email, role }
    }
}

/// Why a bearer token was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Malformed, wrongly signed, or issued for another audience.
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    /// The validator itself cannot work, e.g. a missing secret.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }
}
