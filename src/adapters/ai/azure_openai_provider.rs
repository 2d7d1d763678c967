//! Azure OpenAI Provider - Implementation of AIProvider for Azure-hosted
//! chat-completion deployments.
//!
//! # Configuration
//!
//! ```ignore
//! let config = AzureOpenAIConfig::new("https://samvaad.openai.azure.com", api_key)
//!     .with_deployment("gpt-4")
//!     .with_api_version("2024-02-15-preview");
//!
//! let provider = AzureOpenAIProvider::new(config)?;
//! ```
//!
//! Requests are non-streaming. Retryable failures are retried with
//! exponential backoff (1s, 2s, 4s, ...).

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::learning::{ChatMessage, MessageRole};
use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, ProviderInfo, TokenUsage,
};

pub const DEFAULT_DEPLOYMENT: &str = "gpt-4";
pub const DEFAULT_API_VERSION: &str = "2024-02-15-preview";

/// Connection settings for an Azure OpenAI deployment.
#[derive(Debug, Clone)]
pub struct AzureOpenAIConfig {
    api_key: Secret<String>,
    /// Resource endpoint, e.g. `https://<resource>.openai.azure.com`.
    pub endpoint: String,
    pub deployment: String,
    pub api_version: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl AzureOpenAIConfig {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            endpoint: endpoint.into(),
            deployment: DEFAULT_DEPLOYMENT.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 3,
        }
    }

    pub fn with_deployment(mut self, deployment: impl Into<String>) -> Self {
        self.deployment = deployment.into();
        self
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Full chat-completions URL for the configured deployment.
    pub fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.deployment,
            self.api_version
        )
    }
}

pub struct AzureOpenAIProvider {
    config: AzureOpenAIConfig,
    client: Client,
}

impl AzureOpenAIProvider {
    pub fn new(config: AzureOpenAIConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn to_azure_request(request: &CompletionRequest) -> AzureRequest {
        AzureRequest {
            messages: request
                .wire_messages()
                .into_iter()
                .map(AzureMessage::from)
                .collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            stream: false,
        }
    }

    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, AIError> {
        self.client
            .post(self.config.completions_url())
            .header("api-key", self.config.api_key())
            .header("Content-Type", "application/json")
            .json(&Self::to_azure_request(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    AIError::network(format!("Connection failed: {}", e))
                } else {
                    AIError::network(e.to_string())
                }
            })
    }

    async fn handle_response_status(response: Response) -> Result<Response, AIError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        tracing::warn!(status = %status, body = %error_body, "Azure OpenAI returned an error");

        Err(Self::error_for_status(status.as_u16(), error_body))
    }

    fn error_for_status(status: u16, error_body: String) -> AIError {
        match status {
            401 | 403 => AIError::AuthenticationFailed,
            429 => AIError::rate_limited(Self::parse_retry_after(&error_body)),
            400 if error_body.contains("content_filter") => AIError::content_filtered(error_body),
            400 => AIError::InvalidRequest(error_body),
            500..=599 => AIError::unavailable(format!("Server error {}: {}", status, error_body)),
            _ => AIError::network(format!("Unexpected status {}: {}", status, error_body)),
        }
    }

    /// Reads "retry after N seconds" from the error message, defaulting to 30.
    fn parse_retry_after(error_body: &str) -> u32 {
        serde_json::from_str::<serde_json::Value>(error_body)
            .ok()
            .and_then(|parsed| {
                parsed
                    .get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .and_then(|message| {
                let idx = message.find("retry after ")?;
                let rest = &message[idx + "retry after ".len()..];
                let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
                digits.parse::<u32>().ok()
            })
            .unwrap_or(30)
    }

    async fn parse_response(&self, response: Response) -> Result<CompletionResponse, AIError> {
        let response = Self::handle_response_status(response).await?;

        let azure_response: AzureResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        let content = azure_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        let usage = azure_response
            .usage
            .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();

        Ok(CompletionResponse::new(
            content,
            azure_response
                .model
                .unwrap_or_else(|| self.config.deployment.clone()),
        )
        .with_usage(usage))
    }
}

#[async_trait]
impl AIProvider for AzureOpenAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let mut retry_count = 0;

        loop {
            let result = match self.send_request(&request).await {
                Ok(response) => self.parse_response(response).await,
                Err(err) => Err(err),
            };

            match result {
                Ok(completion) => return Ok(completion),
                Err(err) if !err.is_retryable() || retry_count >= self.config.max_retries => {
                    return Err(err);
                }
                Err(err) => {
                    tracing::debug!(
                        attempt = retry_count + 1,
                        error = %err,
                        trace_id = %request.metadata.trace_id,
                        "Retrying Azure OpenAI completion"
                    );
                }
            }

            let delay = Duration::from_secs(1 << retry_count);
            sleep(delay).await;
            retry_count += 1;
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("azure-openai", &self.config.deployment)
    }
}

// ----- Azure OpenAI API Types -----

#[derive(Debug, Serialize)]
struct AzureRequest {
    messages: Vec<AzureMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct AzureMessage {
    role: MessageRole,
    content: String,
}

impl From<ChatMessage> for AzureMessage {
    fn from(message: ChatMessage) -> Self {
        Self {
            role: message.role,
            content: message.content,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AzureResponse {
    model: Option<String>,
    #[serde(default)]
    choices: Vec<AzureChoice>,
    usage: Option<AzureUsage>,
}

#[derive(Debug, Deserialize)]
struct AzureChoice {
    message: AzureResponseMessage,
}

#[derive(Debug, Deserialize)]
struct AzureResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AzureUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::ports::RequestMetadata;

    #[test]
    fn config_builder_works() {
        let config = AzureOpenAIConfig::new("https://samvaad.openai.azure.com/", "key")
            .with_deployment("gpt-4o")
            .with_timeout(Duration::from_secs(10))
            .with_max_retries(1);

        assert_eq!(config.deployment, "gpt-4o");
        assert_eq!(config.api_version, DEFAULT_API_VERSION);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.max_retries, 1);
        assert_eq!(config.api_key(), "key");
    }

    #[test]
    fn completions_url_targets_deployment() {
        let config = AzureOpenAIConfig::new("https://samvaad.openai.azure.com/", "key");

        assert_eq!(
            config.completions_url(),
            "https://samvaad.openai.azure.com/openai/deployments/gpt-4/chat/completions\
             ?api-version=2024-02-15-preview"
        );
    }

    #[test]
    fn request_body_puts_system_prompt_first() {
        let request = CompletionRequest::new(RequestMetadata::new(
            UserId::new("user-1").unwrap(),
            "trace-1",
        ))
        .with_system_prompt("Be kind")
        .with_messages(vec![ChatMessage::user("Hi")])
        .with_temperature(0.7)
        .with_max_tokens(1000);

        let body = serde_json::to_value(AzureOpenAIProvider::to_azure_request(&request)).unwrap();

        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "Be kind");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["max_tokens"], 1000);
        assert_eq!(body["stream"], false);
    }

    #[test]
    fn status_codes_map_to_errors() {
        assert_eq!(
            AzureOpenAIProvider::error_for_status(401, String::new()),
            AIError::AuthenticationFailed
        );
        assert!(matches!(
            AzureOpenAIProvider::error_for_status(429, String::new()),
            AIError::RateLimited { retry_after_secs: 30 }
        ));
        assert!(matches!(
            AzureOpenAIProvider::error_for_status(400, "{\"code\":\"content_filter\"}".into()),
            AIError::ContentFiltered { .. }
        ));
        assert!(AzureOpenAIProvider::error_for_status(503, String::new()).is_retryable());
    }

    #[test]
    fn parse_retry_after_from_message() {
        let body = r#"{"error":{"message":"Rate limit reached. Please retry after 12 seconds."}}"#;
        assert_eq!(AzureOpenAIProvider::parse_retry_after(body), 12);
    }

    #[test]
    fn parse_retry_after_default() {
        assert_eq!(AzureOpenAIProvider::parse_retry_after("not json"), 30);
    }

    #[test]
    fn response_without_choices_has_empty_content() {
        let response: AzureResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(response.choices.is_empty());
        assert!(response.model.is_none());
    }
}
