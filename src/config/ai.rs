//! Chat-completion provider configuration (Azure OpenAI)
//!
//! The section is optional in practice: when endpoint and key are both
//! absent the chat handler answers in fallback mode.

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::ai::{AzureOpenAIConfig, DEFAULT_API_VERSION, DEFAULT_DEPLOYMENT};
use crate::application::ChatSettings;

#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Azure resource endpoint, e.g. `https://<resource>.openai.azure.com`
    pub endpoint: Option<String>,

    pub api_key: Option<Secret<String>>,

    #[serde(default = "default_deployment")]
    pub deployment: String,

    #[serde(default = "default_api_version")]
    pub api_version: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Retries on rate limits, timeouts and 5xx responses
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

impl AiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// True when both endpoint and key are set and non-empty.
    pub fn is_configured(&self) -> bool {
        self.endpoint().is_some() && self.api_key().is_some()
    }

    fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref().filter(|e| !e.is_empty())
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(|k| k.expose_secret().as_str())
            .filter(|k| !k.is_empty())
    }

    /// Provider settings, or `None` in fallback mode.
    pub fn azure(&self) -> Option<AzureOpenAIConfig> {
        let (endpoint, api_key) = (self.endpoint()?, self.api_key()?);
        Some(
            AzureOpenAIConfig::new(endpoint, api_key)
                .with_deployment(self.deployment.clone())
                .with_api_version(self.api_version.clone())
                .with_timeout(self.timeout())
                .with_max_retries(self.max_retries),
        )
    }

    pub fn chat_settings(&self) -> ChatSettings {
        ChatSettings {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    /// A half-configured provider is an error; a missing one is not.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match (self.endpoint(), self.api_key()) {
            (Some(endpoint), Some(_)) => {
                if !endpoint.starts_with("https://") {
                    return Err(ValidationError::AiEndpointMustBeHttps);
                }
            }
            (Some(_), None) => return Err(ValidationError::MissingRequired("AI__API_KEY")),
            (None, Some(_)) => return Err(ValidationError::MissingRequired("AI__ENDPOINT")),
            (None, None) => {}
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature);
        }
        if self.max_tokens == 0 {
            return Err(ValidationError::InvalidMaxTokens);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            deployment: default_deployment(),
            api_version: default_api_version(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
        }
    }
}

fn default_deployment() -> String {
    DEFAULT_DEPLOYMENT.to_string()
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_timeout() -> u64 {
    60
}

fn default_retries() -> u32 {
    3
}
