//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `SAMVAAD` prefix and
//! nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use samvaad::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod analysis;
mod auth;
mod database;
mod error;
mod server;

pub use ai::AiConfig;
pub use analysis::AnalysisConfig;
pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// Absent means in-memory persistence
    pub database: Option<DatabaseConfig>,

    /// Supabase JWT validation
    pub auth: AuthConfig,

    /// Azure OpenAI; unconfigured means fallback replies
    #[serde(default)]
    pub ai: AiConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` if present (development)
    /// 2. Reads variables with the `SAMVAAD` prefix, `__` separating levels
    ///
    /// - `SAMVAAD__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `SAMVAAD__AI__API_KEY=...` -> `ai.api_key = ...`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SAMVAAD")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.auth.validate(&self.server.environment)?;
        self.ai.validate()?;
        self.analysis.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
