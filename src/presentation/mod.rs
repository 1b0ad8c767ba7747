// Presentation layer - HTTP routes
pub mod app_state;
pub mod handlers;
pub mod page;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    chart_markup, dashboard_page, health_check, list_servers, trigger_refresh, update_viewport,
};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

// Compression is handled in the response builders, so no CompressionLayer here.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/servers", get(list_servers))
        .route("/servers/:id", get(dashboard_page))
        .route("/servers/:id/charts/:surface", get(chart_markup))
        .route("/servers/:id/refresh", post(trigger_refresh))
        .route("/servers/:id/viewport", post(update_viewport))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
