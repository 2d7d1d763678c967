//! Token-table session validator for tests.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Accepts only the tokens it was built with.
///
/// ```ignore
/// let validator = MockSessionValidator::new().with_test_user("token", "learner-1");
/// ```
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: HashMap<String, AuthenticatedUser>,
    outage: Option<AuthError>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.tokens.insert(token.into(), user);
        self
    }

    /// Registers `token` for a signed-in user with a generated email.
    ///
    /// Panics if `user_id` is empty.
    pub fn with_test_user(self, token: impl Into<String>, user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        let email = format!("{user_id}@test.example.com");
        let id = UserId::new(user_id).expect("test user id must not be empty");
        self.with_user(
            token,
            AuthenticatedUser::new(id, Some(email), Some("authenticated".to_string())),
        )
    }

    /// Every validation fails with `error`, known tokens included.
    pub fn with_error(mut self, error: AuthError) -> Self {
        self.outage = Some(error);
        self
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = &self.outage {
            return Err(error.clone());
        }
        self.tokens.get(token).cloned().ok_or(AuthError::InvalidToken)
    }
}
