//! Per-series progress endpoints
//!
//! Read pre-populates the series-page season/episode inputs; writes come
//! from playback initiation or the options page.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;

use crate::db::repository::progress;
use crate::models::ProgressRecord;
use crate::AppState;

lazy_static! {
    static ref SERIES_ID: Regex = Regex::new(r"^tt\d+$").unwrap();
}

type RouteError = (StatusCode, Json<serde_json::Value>);

fn validate_series_id(series_id: &str) -> Result<(), RouteError> {
    if SERIES_ID.is_match(series_id) {
        Ok(())
    } else {
        Err((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Invalid series id" })),
        ))
    }
}

/// GET /api/progress/:series_id - last-played position (1/1 when none)
pub async fn get_progress(
    State(state): State<Arc<AppState>>,
    Path(series_id): Path<String>,
) -> Result<impl IntoResponse, RouteError> {
    validate_series_id(&series_id)?;

    let record = progress::get(&state.pool, &series_id)
        .await
        .map_err(super::storage_error)?
        .unwrap_or_default();

    Ok(Json(record))
}

/// PUT /api/progress/:series_id - record a position
pub async fn put_progress(
    State(state): State<Arc<AppState>>,
    Path(series_id): Path<String>,
    Json(record): Json<ProgressRecord>,
) -> Result<impl IntoResponse, RouteError> {
    validate_series_id(&series_id)?;

    if record.season == 0 || record.episode == 0 {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Season and episode must be positive" })),
        ));
    }

    progress::put(&state.pool, &series_id, &record)
        .await
        .map_err(super::storage_error)?;

    Ok(Json(serde_json::json!({ "success": true })))
}

/// DELETE /api/progress/:series_id - forget a series' position
pub async fn delete_progress(
    State(state): State<Arc<AppState>>,
    Path(series_id): Path<String>,
) -> Result<impl IntoResponse, RouteError> {
    validate_series_id(&series_id)?;

    let deleted = progress::remove(&state.pool, &series_id)
        .await
        .map_err(super::storage_error)?;

    Ok(Json(serde_json::json!({
        "success": true,
        "deleted": deleted > 0
    })))
}
