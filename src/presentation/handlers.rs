// HTTP request handlers
use crate::infrastructure::http_response::{accepts_brotli, json_response, markup_response};
use crate::infrastructure::svg;
use crate::presentation::app_state::AppState;
use crate::presentation::page::render_page;
use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{HeaderMap, Response, StatusCode},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const LOADING_HEIGHT: f64 = 200.0;

#[derive(Deserialize)]
pub struct ViewportQuery {
    pub width: f64,
}

#[derive(Serialize)]
struct TriggerAccepted {
    accepted: bool,
}

fn respond(result: Result<Response<Body>, StatusCode>) -> Response<Body> {
    match result {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List configured server ids
pub async fn list_servers(headers: HeaderMap, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    respond(json_response(StatusCode::OK, &state.server_ids, accepts_brotli(&headers)).await)
}

/// Full dashboard page for one server
pub async fn dashboard_page(
    Path(id): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let Some(dashboard) = state.dashboard(&id) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let html = {
        let page = dashboard.page().read().await;
        render_page(&page, &state.page_options)
    };
    respond(markup_response(StatusCode::OK, "text/html; charset=utf-8", html, accepts_brotli(&headers)).await)
}

/// Current markup of a single chart surface
pub async fn chart_markup(
    Path((id, surface)): Path<(String, String)>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let Some(dashboard) = state.dashboard(&id) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let markup = {
        let page = dashboard.page().read().await;
        let Some(target) = page.container.surface(&surface) else {
            tracing::debug!(server_id = %id, surface = %surface, "Unknown chart surface");
            return StatusCode::NOT_FOUND.into_response();
        };
        match target.mounted() {
            Some(drawing) => svg::render_drawing(drawing),
            None => svg::Markup::Html(svg::render_placeholder("Loading...", LOADING_HEIGHT)),
        }
    };
    let content_type = markup.content_type();
    respond(markup_response(StatusCode::OK, content_type, markup.into_string(), accepts_brotli(&headers)).await)
}

/// Manual refresh: collect a fresh sample, then reload
pub async fn trigger_refresh(
    Path(id): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let Some(dashboard) = state.dashboard(&id) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let accepted = dashboard.refresh_now();
    tracing::info!(server_id = %id, accepted, "Manual refresh requested");
    respond(json_response(StatusCode::ACCEPTED, &TriggerAccepted { accepted }, accepts_brotli(&headers)).await)
}

/// Viewport change: re-render every surface at the new width
pub async fn update_viewport(
    Path(id): Path<String>,
    Query(query): Query<ViewportQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let Some(dashboard) = state.dashboard(&id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if !(query.width > 0.0) || !query.width.is_finite() {
        return StatusCode::BAD_REQUEST.into_response();
    }

    let accepted = dashboard.resize(query.width);
    respond(json_response(StatusCode::ACCEPTED, &TriggerAccepted { accepted }, accepts_brotli(&headers)).await)
}
