//! Request handlers for the public API surface.

use axum::{extract::State, http::header, response::IntoResponse, Json};
use serde::Serialize;

use crate::http::extract::JsonBody;
use crate::http::server::AppState;
use crate::store::Item;

/// Content type of the Prometheus text exposition format.
pub const METRICS_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

#[derive(Serialize)]
pub struct ApiBanner {
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct ItemAdded {
    pub message: &'static str,
    pub item: Item,
}

pub async fn root() -> Json<ApiBanner> {
    Json(ApiBanner {
        message: "API is running",
    })
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus { status: "ok" })
}

pub async fn list_items(State(state): State<AppState>) -> Json<Vec<Item>> {
    Json(state.items.list())
}

/// Append an item. Malformed or mistyped bodies are rejected with 422 and
/// leave the store untouched; a body with no declared content type is
/// treated as JSON.
pub async fn add_item(
    State(state): State<AppState>,
    JsonBody(item): JsonBody<Item>,
) -> Json<ItemAdded> {
    state.items.append(item.clone());

    Json(ItemAdded {
        message: "Item added",
        item,
    })
}

/// Dump every accumulated sample in Prometheus text format.
///
/// Reading never mutates samples; the surrounding middleware records this
/// request after the render, so a scrape never sees itself.
pub async fn render_metrics(State(state): State<AppState>) -> impl IntoResponse {
    let body = state.metrics.render();
    ([(header::CONTENT_TYPE, METRICS_CONTENT_TYPE)], body)
}
