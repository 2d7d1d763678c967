//! Background session analysis configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::application::DEFAULT_QUEUE_CAPACITY;

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Jobs that may wait for the analysis worker before new ones are refused
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.queue_capacity == 0 || self.queue_capacity > 10_000 {
            return Err(ValidationError::InvalidQueueCapacity);
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
        }
    }
}

fn default_queue_capacity() -> usize {
    DEFAULT_QUEUE_CAPACITY
}
