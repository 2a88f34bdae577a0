//! Page resolution endpoint
//!
//! Returns the resolved context as-is, including `type = unknown` for
//! pages without a title id; callers check `currentId` before acting,
//! exactly like the injected UI does.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use lazy_static::lazy_static;
use prometheus::{register_int_counter, IntCounter};
use serde::Deserialize;
use std::sync::Arc;

use crate::services::resolver;
use crate::AppState;

lazy_static! {
    static ref RESOLVES_TOTAL: IntCounter = register_int_counter!(
        "titleplay_resolves_total",
        "Title pages resolved into a context"
    )
    .unwrap();
}

/// Request to resolve a title page
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequest {
    pub page_url: String,
    /// HTML snapshot of the page; fetched server-side when absent
    #[serde(default)]
    pub html: Option<String>,
}

/// POST /api/resolve - resolve a title page into a context
pub async fn resolve_page(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ResolveRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let html = match payload.html {
        Some(html) => html,
        None => super::fetch_page(&state, &payload.page_url).await?,
    };

    let context = resolver::resolve(&payload.page_url, &html);
    RESOLVES_TOTAL.inc();

    tracing::debug!(
        "Resolved {} as {} (id: {:?})",
        payload.page_url,
        context.kind,
        context.current_id
    );

    Ok(Json(context))
}
