//! Playback initiation
//!
//! The full pipeline behind the injected play button: resolve the page,
//! pick a provider, build the destination URL, record series progress.
//! `POST /api/play` hands the URL back to the extension; `GET /launch`
//! redirects, so a button can point a new tab straight at the server and
//! land on the provider.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};
use lazy_static::lazy_static;
use prometheus::{register_int_counter, IntCounter};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::db::repository::progress;
use crate::models::{PageContext, ProgressRecord, TitleKind};
use crate::services::{providers, resolver, template};
use crate::AppState;

lazy_static! {
    static ref PLAYS_TOTAL: IntCounter = register_int_counter!(
        "titleplay_plays_total",
        "Playback URLs built"
    )
    .unwrap();
}

type RouteError = (StatusCode, Json<serde_json::Value>);

/// Request to initiate playback for a title page
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayRequest {
    pub page_url: String,
    /// HTML snapshot of the page; fetched server-side when absent
    #[serde(default)]
    pub html: Option<String>,
    /// Explicit provider choice (dropdown); default provider when absent
    #[serde(default)]
    pub provider_index: Option<usize>,
    /// Series-page input overrides
    #[serde(default)]
    pub season: Option<u32>,
    #[serde(default)]
    pub episode: Option<u32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayResponse {
    pub url: String,
    pub provider: String,
    pub context: PageContext,
}

/// POST /api/play - build a playback URL and record progress
pub async fn start_playback(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PlayRequest>,
) -> Result<impl IntoResponse, RouteError> {
    let response = prepare_playback(
        &state,
        &payload.page_url,
        payload.html,
        payload.provider_index,
        payload.season,
        payload.episode,
    )
    .await?;

    tracing::info!(
        "Built play URL for {} via {}",
        payload.page_url,
        response.provider
    );

    Ok(Json(response))
}

/// Query params for the redirecting variant
#[derive(Debug, Deserialize)]
pub struct LaunchQuery {
    /// Title page address
    pub page: String,
    #[serde(default)]
    pub provider: Option<usize>,
    #[serde(default)]
    pub s: Option<u32>,
    #[serde(default)]
    pub e: Option<u32>,
}

/// GET /launch - resolve, record progress and redirect to the provider
pub async fn launch(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LaunchQuery>,
) -> Result<Redirect, RouteError> {
    let response =
        prepare_playback(&state, &query.page, None, query.provider, query.s, query.e).await?;

    tracing::info!("Launching {} via {}", query.page, response.provider);

    Ok(Redirect::temporary(&response.url))
}

async fn prepare_playback(
    state: &AppState,
    page_url: &str,
    html: Option<String>,
    provider_index: Option<usize>,
    season: Option<u32>,
    episode: Option<u32>,
) -> Result<PlayResponse, RouteError> {
    let html = match html {
        Some(html) => html,
        None => super::fetch_page(state, page_url).await?,
    };

    let mut context = resolver::resolve(page_url, &html);
    if context.current_id.is_none() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({ "error": "Not a recognizable title page" })),
        ));
    }

    // Series-page inputs override the resolved position
    if let Some(season) = season {
        context.season = season.max(1);
    }
    if let Some(episode) = episode {
        context.episode = episode.max(1);
    }

    let settings = providers::load(&state.pool)
        .await
        .map_err(super::storage_error)?;

    let provider = providers::select(&settings, provider_index).ok_or_else(|| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({ "error": "No usable provider" })),
        )
    })?;

    let url = template::build_url(provider, &context).ok_or_else(|| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({ "error": "Provider cannot build a URL for this page" })),
        )
    })?;

    record_progress(state, &context).await;
    PLAYS_TOTAL.inc();

    Ok(PlayResponse {
        url,
        provider: provider.name.clone(),
        context,
    })
}

/// Write the last-played position under the owning series' id. Movies
/// have no series scope and write nothing; a failed write is absorbed so
/// playback still starts.
async fn record_progress(state: &AppState, context: &PageContext) {
    let series_id = match context.kind {
        TitleKind::Episode => context.parent_id.as_deref(),
        TitleKind::Series => context.current_id.as_deref(),
        _ => None,
    };
    let Some(series_id) = series_id else {
        return;
    };

    let record = ProgressRecord {
        season: context.season,
        episode: context.episode,
    };

    if let Err(e) = progress::put(&state.pool, series_id, &record).await {
        tracing::warn!("Failed to record progress for {}: {}", series_id, e);
    }
}
