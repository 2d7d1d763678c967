//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port.
//!
//! ## Available Adapters
//!
//! - `AzureOpenAIProvider` - Azure OpenAI chat-completion deployments
//! - `MockAIProvider` - Configurable mock for testing

mod azure_openai_provider;
mod mock_provider;

pub use azure_openai_provider::{
    AzureOpenAIConfig, AzureOpenAIProvider, DEFAULT_API_VERSION, DEFAULT_DEPLOYMENT,
};
pub use mock_provider::MockAIProvider;
