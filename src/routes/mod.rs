//! HTTP route handlers

pub mod health;
pub mod play;
pub mod progress;
pub mod providers;
pub mod resolve;

use axum::{http::StatusCode, Json};

use crate::services::fetcher::FetchError;
use crate::AppState;

/// Fetch the page HTML when the caller did not attach a snapshot
pub(crate) async fn fetch_page(
    state: &AppState,
    page_url: &str,
) -> Result<String, (StatusCode, Json<serde_json::Value>)> {
    state.fetcher.fetch(page_url).await.map_err(|e| {
        tracing::warn!("Failed to fetch title page {}: {}", page_url, e);
        let status = match e {
            FetchError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            FetchError::Network(_) | FetchError::Http(_) => StatusCode::BAD_GATEWAY,
        };
        (
            status,
            Json(serde_json::json!({ "error": format!("Failed to fetch page: {}", e) })),
        )
    })
}

/// Shared 500 mapping for settings store failures
pub(crate) fn storage_error(e: sqlx::Error) -> (StatusCode, Json<serde_json::Value>) {
    tracing::error!("Settings store error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": "Settings store unavailable" })),
    )
}
