//! Phonebook Service - Main entry point
//!
//! Loads configuration, wires the contact store, metrics and service together
//! and serves the REST API.

use anyhow::Result;
use phonebook_service::config::{Config, StoreBackend};
use phonebook_service::metrics::{ContactMetrics, MetricsRegistry};
use phonebook_service::repositories::{ContactRepository, InMemoryContactRepository};
use phonebook_service::services::{ContactService, ContactServiceImpl};
use phonebook_service::{http, AppState};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(
        store = ?config.store,
        max_page_size = config.max_page_size,
        "Starting phonebook service"
    );

    let repository = build_repository(&config).await?;
    let metrics = Arc::new(MetricsRegistry::new());

    let service = ContactServiceImpl::new(
        repository,
        metrics.clone() as Arc<dyn ContactMetrics>,
        config.max_page_size,
    );
    match service.initialize_metrics().await {
        Ok(total) => info!("Loaded {} existing contacts", total),
        Err(e) => error!("Failed to read initial contact count: {}", e),
    }

    let state = AppState::new(Arc::new(service) as Arc<dyn ContactService>, metrics);
    http::serve(http::router(state), config.bind_addr).await?;

    info!("Phonebook service shutdown complete");
    Ok(())
}

async fn build_repository(config: &Config) -> Result<Arc<dyn ContactRepository>> {
    match config.store {
        StoreBackend::Memory => {
            info!("Using in-memory contact store");
            Ok(Arc::new(InMemoryContactRepository::new()))
        }
        StoreBackend::Postgres => connect_postgres(config).await,
    }
}

#[cfg(feature = "postgres")]
async fn connect_postgres(config: &Config) -> Result<Arc<dyn ContactRepository>> {
    use anyhow::Context;
    use phonebook_service::repositories::PostgresContactRepository;

    let url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is required for the postgres store")?;
    let repository = PostgresContactRepository::connect(url)
        .await
        .context("Failed to connect to Postgres")?;
    info!("Using Postgres contact store");
    Ok(Arc::new(repository))
}

#[cfg(not(feature = "postgres"))]
async fn connect_postgres(_config: &Config) -> Result<Arc<dyn ContactRepository>> {
    anyhow::bail!("PHONEBOOK_STORE=postgres requires building with the `postgres` feature")
}
