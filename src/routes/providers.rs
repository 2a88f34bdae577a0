//! Provider configuration endpoints
//!
//! The options page talks to these: list, replace, set default, delete
//! one, reset to the built-in set. Disabled providers are kept in the
//! list; the default index is clamped on read and reassigned on delete.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::models::{ProviderDefinition, ProviderSettings};
use crate::services::providers;
use crate::AppState;

type RouteError = (StatusCode, Json<serde_json::Value>);

/// GET /api/providers - current configuration (defaults substituted)
pub async fn get_providers(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, RouteError> {
    let settings = providers::load(&state.pool)
        .await
        .map_err(super::storage_error)?;

    Ok(Json(settings))
}

/// Request to replace the full provider configuration
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceProvidersRequest {
    pub providers: Vec<ProviderDefinition>,
    #[serde(default)]
    pub default_index: usize,
}

/// PUT /api/providers - replace list and default index
pub async fn replace_providers(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ReplaceProvidersRequest>,
) -> Result<impl IntoResponse, RouteError> {
    if payload.providers.is_empty() {
        return Err(bad_request("At least one provider is required"));
    }
    for provider in &payload.providers {
        if provider.name.trim().is_empty() || provider.base_url.trim().is_empty() {
            return Err(bad_request("Provider name and base URL are required"));
        }
    }

    let settings = ProviderSettings {
        default_index: providers::clamp_index(payload.default_index, payload.providers.len()),
        providers: payload.providers,
    };

    providers::save(&state.pool, &settings)
        .await
        .map_err(super::storage_error)?;

    tracing::info!(
        "Saved {} providers (default: {})",
        settings.providers.len(),
        settings.default_index
    );

    Ok(Json(serde_json::json!({
        "success": true,
        "defaultIndex": settings.default_index
    })))
}

/// Request to designate the default provider
#[derive(Debug, Deserialize)]
pub struct SetDefaultRequest {
    pub index: usize,
}

/// PUT /api/providers/default - set the default provider index
pub async fn set_default_provider(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SetDefaultRequest>,
) -> Result<impl IntoResponse, RouteError> {
    let mut settings = providers::load(&state.pool)
        .await
        .map_err(super::storage_error)?;

    if payload.index >= settings.providers.len() {
        return Err(bad_request("Provider index out of range"));
    }

    settings.default_index = payload.index;
    providers::save(&state.pool, &settings)
        .await
        .map_err(super::storage_error)?;

    Ok(Json(serde_json::json!({
        "success": true,
        "defaultIndex": settings.default_index
    })))
}

/// DELETE /api/providers/:index - remove one provider
pub async fn delete_provider(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<impl IntoResponse, RouteError> {
    let mut settings = providers::load(&state.pool)
        .await
        .map_err(super::storage_error)?;

    if index >= settings.providers.len() {
        return Err((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "Provider index out of range" })),
        ));
    }
    if settings.providers.len() <= 1 {
        return Err(bad_request("Cannot delete the last provider"));
    }

    let removed = settings.providers.remove(index);
    settings.default_index =
        providers::index_after_remove(settings.default_index, settings.providers.len());

    providers::save(&state.pool, &settings)
        .await
        .map_err(super::storage_error)?;

    tracing::info!("Deleted provider {}", removed.name);

    Ok(Json(serde_json::json!({
        "success": true,
        "defaultIndex": settings.default_index
    })))
}

/// POST /api/providers/reset - restore the built-in default set
pub async fn reset_providers(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, RouteError> {
    let settings = ProviderSettings {
        providers: providers::defaults(),
        default_index: 0,
    };

    providers::save(&state.pool, &settings)
        .await
        .map_err(super::storage_error)?;

    tracing::info!("Provider list reset to defaults");

    Ok(Json(settings))
}

fn bad_request(message: &str) -> RouteError {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": message })),
    )
}
