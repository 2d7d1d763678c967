//! SessionValidator port - bearer token validation.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Turns a bearer token into the user it was issued to.
///
/// Implementations: `SupabaseSessionValidator` in production and
/// `MockSessionValidator` in tests.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
