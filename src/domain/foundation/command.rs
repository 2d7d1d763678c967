//! Request context handed to application handlers.
//!
//! `CommandMetadata` names the user a command acts for and carries the
//! correlation and trace ids that end up on published events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    pub user_id: UserId,

    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
}

impl CommandMetadata {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            correlation_id: None,
            trace_id: None,
        }
    }

    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// The correlation id, or a fresh one on every call when none is set.
    /// Use [`Self::ensure_correlation_id`] before handing work to a task.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Fixes the correlation id so later reads agree.
    pub fn ensure_correlation_id(self) -> Self {
        match self.correlation_id {
            Some(_) => self,
            None => self.with_correlation_id(Uuid::new_v4().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn learner() -> UserId {
        UserId::new("learner-1").unwrap()
    }

    #[test]
    fn unset_correlation_id_changes_between_reads() {
        let metadata = CommandMetadata::new(learner());
        assert_ne!(metadata.correlation_id(), metadata.correlation_id());
    }

    #[test]
    fn explicit_correlation_id_is_kept() {
        let metadata = CommandMetadata::new(learner())
            .with_correlation_id("req-42")
            .ensure_correlation_id();
        assert_eq!(metadata.correlation_id(), "req-42");
    }

    #[test]
    fn ensured_correlation_id_is_stable() {
        let metadata = CommandMetadata::new(learner()).ensure_correlation_id();
        assert_eq!(metadata.correlation_id(), metadata.correlation_id());
    }

    #[test]
    fn trace_id_is_optional() {
        assert_eq!(CommandMetadata::new(learner()).trace_id(), None);
        let traced = CommandMetadata::new(learner()).with_trace_id("trace-1");
        assert_eq!(traced.trace_id(), Some("trace-1"));
    }
}
