// Main entry point - Dependency injection and server setup
mod application;
mod chart;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::application::refresh::{DashboardPage, RefreshScheduler};
use crate::infrastructure::backend_repository::BackendRepository;
use crate::infrastructure::config::{load_backend_config, load_dashboard_config};
use crate::infrastructure::http_client::HttpClient;
use crate::presentation::app_state::AppState;
use crate::presentation::page::PageOptions;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let backend_config = load_backend_config().context("Failed to load config/backend")?;
    let dashboard_config = load_dashboard_config().context("Failed to load config/dashboard")?;

    // Create repository (infrastructure layer)
    let backend = backend_config.backend;
    let client = HttpClient::new(backend.base_url.clone(), backend.timeout());
    let repository = Arc::new(BackendRepository::new(client, backend.endpoints.clone()));

    // Create services (application layer)
    let service = DashboardService::new(repository, backend.history_limit);
    let scheduler = RefreshScheduler::new(
        service,
        Arc::from(dashboard_config.charts.clone()),
        Arc::new(dashboard_config.theme()),
        dashboard_config.refresh_settings(),
    );

    // One refresh task per configured server
    let handles: Vec<_> = dashboard_config
        .servers
        .iter()
        .map(|server_id| {
            let page = DashboardPage::new(server_id, &dashboard_config.charts, dashboard_config.default_width);
            scheduler.clone().spawn(server_id.clone(), page.shared())
        })
        .collect();

    // Create application state
    let page_options = PageOptions {
        reload_secs: dashboard_config.refresh.interval_secs,
        history_columns: dashboard_config.history_columns.clone(),
        empty_message: dashboard_config.theme().empty_message,
    };
    let state = Arc::new(AppState::new(
        handles.iter().map(|h| h.controller().clone()).collect(),
        page_options,
    ));

    // Build router (presentation layer)
    let router = presentation::router(state);

    // Start server
    let addr: SocketAddr = dashboard_config
        .server
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address: {}", dashboard_config.server.listen))?;
    tracing::info!(%addr, backend = %backend.base_url, servers = handles.len(), "Starting monitor-dashboard");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    for handle in handles {
        handle.shutdown().await;
    }
    tracing::info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        // Without a signal handler the server runs until killed.
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
