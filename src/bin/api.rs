//! Nutrilog API Server
//!
//! Run with: cargo run --bin nutrilog-api
//!
//! # Configuration
//!
//! Loaded from config.toml (see `nutrilog-cli config`) with environment
//! overrides:
//! - `NUTRILOG_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `NUTRILOG_API_PORT`: Port to listen on (default: 8083)
//! - `NUTRILOG_DATA_DIR`: Data directory
//! - `NUTRILOG_UTC_OFFSET_MINUTES`: Local-day offset from UTC
//! - `NUTRILOG_ESTIMATOR_URL` / `NUTRILOG_ESTIMATOR_ENABLED`
//! - `NUTRILOG_DIRECTORY_URL`
//! - `RUST_LOG`: Log level (default: info)

use nutrilog::api::{serve, ApiConfig, AppState};
use nutrilog::collab::{
    DirectoryConfig, EstimatorConfig, HttpDirectory, HttpEstimator,
};
use nutrilog::config::Config;
use nutrilog::journal::Journal;
use nutrilog::notify::{LogNotifier, ReminderScheduler};
use nutrilog::store::{KeyedStore, StoreConfig};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nutrilog=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Nutrilog API server v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load_default();
    tracing::info!("Data directory: {}", config.store.data_dir);

    // Open the store and journal
    let store_config = StoreConfig {
        data_dir: config.store.data_dir.clone().into(),
        max_document_bytes: config.store.max_document_bytes,
    };
    let store = Arc::new(KeyedStore::open(store_config)?);
    let journal = Arc::new(Journal::new(store, config.journal.offset()));

    // Start the reminder scheduler from the persisted settings
    let scheduler = Arc::new(ReminderScheduler::new(Arc::new(LogNotifier)));
    let settings = journal.settings();
    scheduler.apply(&settings);
    if settings.enabled {
        tracing::info!(
            every_minutes = settings.frequency_minutes,
            "Reminders enabled from persisted settings"
        );
    }

    let api_config = ApiConfig {
        host: config.api.host.clone(),
        port: config.api.port,
        cors_origins: config.api.cors_origins.clone(),
        enable_export: true,
    };

    let mut state = AppState::new(Arc::clone(&journal), Arc::clone(&scheduler), api_config.clone());

    // Attach the estimation collaborator when enabled
    if config.estimator.enabled {
        tracing::info!("Calorie estimation enabled: {}", config.estimator.url);

        let estimator = HttpEstimator::new(EstimatorConfig {
            base_url: config.estimator.url.clone(),
            request_timeout_ms: config.estimator.request_timeout_ms,
        })?;

        match estimator.health_check().await {
            Ok(_) => tracing::info!("Estimation service connection verified"),
            Err(e) => tracing::warn!(
                "Estimation service not reachable: {} (estimates will fail until it is)",
                e
            ),
        }

        state = state.with_estimator(Arc::new(estimator));
    } else {
        tracing::info!("Calorie estimation disabled");
    }

    // Attach the profile directory collaborator when enabled
    if config.directory.enabled {
        tracing::info!("Profile directory enabled: {}", config.directory.url);

        let directory = HttpDirectory::new(DirectoryConfig {
            base_url: config.directory.url.clone(),
            request_timeout_ms: config.directory.request_timeout_ms,
        })?;

        state = state.with_directory(Arc::new(directory));
    } else {
        tracing::info!("Profile directory disabled (set NUTRILOG_DIRECTORY_URL to enable)");
    }

    // Run server
    tracing::info!("Starting server on {}", api_config.addr());
    serve(state, &api_config).await?;

    // Graceful shutdown
    scheduler.stop();
    tracing::info!("Nutrilog API server stopped");

    Ok(())
}
