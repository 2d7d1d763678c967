//! Samvaad server binary.
//!
//! Wires configuration, persistence, the analysis worker and the HTTP API.

use std::error::Error;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use samvaad::adapters::ai::AzureOpenAIProvider;
use samvaad::adapters::auth::SupabaseSessionValidator;
use samvaad::adapters::events::{
    AnalysisLogHandler, SESSION_ANALYSIS_FAILED_EVENT, SESSION_ANALYZED_EVENT,
};
use samvaad::adapters::http::{build_router, AppState, RouterSettings};
use samvaad::adapters::memory::{InMemoryInsightRepository, InMemoryProfileRepository};
use samvaad::adapters::postgres::{PostgresInsightRepository, PostgresProfileRepository};
use samvaad::adapters::InMemoryEventBus;
use samvaad::application::{AnalysisDispatcher, AnalyzeSessionHandler, SendChatMessageHandler};
use samvaad::config::AppConfig;
use samvaad::ports::{
    AIProvider, EventPublisher, EventSubscriber, InsightRepository, ProfileRepository,
};

type BoxError = Box<dyn Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let (profiles, insights) = repositories(&config).await?;

    let bus = Arc::new(InMemoryEventBus::new());
    bus.subscribe_all(
        &[SESSION_ANALYZED_EVENT, SESSION_ANALYSIS_FAILED_EVENT],
        Arc::new(AnalysisLogHandler),
    );
    let publisher: Arc<dyn EventPublisher> = bus.clone();

    let analyze = Arc::new(AnalyzeSessionHandler::new(
        profiles.clone(),
        insights,
        publisher.clone(),
    ));
    let dispatcher = Arc::new(AnalysisDispatcher::spawn(
        analyze,
        publisher,
        config.analysis.queue_capacity,
    ));

    let mut chat = SendChatMessageHandler::new(profiles, dispatcher.clone())
        .with_settings(config.ai.chat_settings());
    match config.ai.azure() {
        Some(azure) => {
            let provider = AzureOpenAIProvider::new(azure)?;
            let info = provider.provider_info();
            tracing::info!(provider = %info.name, model = %info.model, "AI provider configured");
            chat = chat.with_provider(Arc::new(provider));
        }
        None => tracing::warn!("AI provider not configured, serving fallback replies"),
    }

    let validator = Arc::new(SupabaseSessionValidator::new(config.auth.supabase()));
    let settings = RouterSettings {
        cors_origins: config.server.cors_origins_list(),
        request_timeout: Some(config.server.request_timeout()),
    };
    let app = build_router(AppState::new(Arc::new(chat)), validator, &settings);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Samvaad listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Draining analysis queue");
    dispatcher.shutdown().await;
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn repositories(
    config: &AppConfig,
) -> Result<(Arc<dyn ProfileRepository>, Arc<dyn InsightRepository>), BoxError> {
    let Some(database) = &config.database else {
        tracing::warn!("No database configured, using in-memory repositories");
        return Ok((
            Arc::new(InMemoryProfileRepository::new()),
            Arc::new(InMemoryInsightRepository::new()),
        ));
    };

    let pool = database.pool_options().connect(&database.url).await?;
    if database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    Ok((
        Arc::new(PostgresProfileRepository::new(pool.clone())),
        Arc::new(PostgresInsightRepository::new(pool)),
    ))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
}
