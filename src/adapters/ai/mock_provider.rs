//! Scripted AI provider for tests.
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_response("Fractions are parts of a whole.")
//!     .with_error(AIError::rate_limited(5));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, ProviderInfo, TokenUsage,
};

/// Reply used once the script runs out.
pub const DEFAULT_MOCK_REPLY: &str = "Mock response";

/// Plays back scripted outcomes in order and records every request.
#[derive(Debug, Default)]
pub struct MockAIProvider {
    script: Mutex<VecDeque<Result<String, AIError>>>,
    calls: Mutex<Vec<CompletionRequest>>,
    delay: Duration,
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.push(Ok(content.into()))
    }

    pub fn with_error(self, error: AIError) -> Self {
        self.push(Err(error))
    }

    /// Simulated latency before each reply.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or_default()
    }

    /// Requests received so far, oldest first.
    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn push(self, outcome: Result<String, AIError>) -> Self {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(outcome);
        }
        self
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(request);
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let next = self
            .script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front());
        let content = next.unwrap_or_else(|| Ok(DEFAULT_MOCK_REPLY.to_string()))?;

        Ok(CompletionResponse::new(content, "mock-model").with_usage(TokenUsage::new(10, 20)))
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("mock", "mock-model")
    }
}
