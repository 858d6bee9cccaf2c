//! Request handlers for the gallery HTTP API and the embedded UI.

use super::error::ApiError;
use super::filtering::{categories, EntryFilter};
use super::state::AppState;
use crate::core::GalleryEntry;
use crate::web_assets;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

/// `GET /api/models`: a fresh scan, optionally filtered.
pub async fn list_models(
    State(state): State<AppState>,
    Query(filter): Query<EntryFilter>,
) -> Result<Json<Vec<GalleryEntry>>, ApiError> {
    let entries = state.scan().await?;
    tracing::debug!("Serving {} entries (filter: {:?})", entries.len(), filter);
    Ok(Json(filter.apply(entries)))
}

/// `GET /api/categories`: category names for the filter dropdown.
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let entries = state.scan().await?;
    Ok(Json(categories(&entries)))
}

pub async fn index() -> Response {
    serve_asset("index.html")
}

/// `GET /assets/*path`: embedded UI files.
pub async fn ui_asset(Path(path): Path<String>) -> Response {
    serve_asset(&path)
}

fn serve_asset(path: &str) -> Response {
    match web_assets::load(path) {
        Some((body, content_type)) => {
            ([(header::CONTENT_TYPE, content_type)], body.into_owned()).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
