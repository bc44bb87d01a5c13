//! HTTP REST API for the phonebook.
//!
//! Maps routes and query parameters onto [`ContactService`] calls, serializes
//! results as JSON and translates service errors into status codes.

pub mod error;
pub mod handlers;
pub mod middleware;

pub use error::{ApiError, ErrorResponse};
pub use handlers::SearchParams;

use crate::metrics::{MetricsRegistry, WebMetrics};
use crate::services::ContactService;
use anyhow::Result;
use axum::routing::{get, post, put};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub contacts: Arc<dyn ContactService>,
    pub metrics: Arc<MetricsRegistry>,
}

impl AppState {
    pub fn new(contacts: Arc<dyn ContactService>, metrics: Arc<MetricsRegistry>) -> Self {
        Self { contacts, metrics }
    }
}

/// Build the router with every route, the metrics middleware and request tracing.
pub fn router(state: AppState) -> Router {
    let web_metrics = state.metrics.clone() as Arc<dyn WebMetrics>;

    Router::new()
        .route("/contacts", get(handlers::search_contacts))
        .route("/phonebook", post(handlers::create_contact))
        .route("/phonebook/contacts", get(handlers::search_contacts))
        .route(
            "/phonebook/:id",
            put(handlers::update_contact).delete(handlers::delete_contact),
        )
        .route("/phonebook/metrics/contacts", get(handlers::contact_metrics))
        .route(
            "/phonebook/metrics/performance",
            get(handlers::performance_metrics),
        )
        .route("/phonebook/metrics/web", get(handlers::web_metrics))
        .with_state(state)
        .layer(axum::middleware::from_fn_with_state(
            web_metrics,
            middleware::track_web_metrics,
        ))
        .layer(TraceLayer::new_for_http())
}

/// Bind `addr` and serve `app` until Ctrl-C.
pub async fn serve(app: Router, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Phonebook HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
