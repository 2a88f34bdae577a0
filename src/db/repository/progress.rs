//! Per-series watch progress
//!
//! One record per series under the series-scoped key
//! `progress_<seriesId>`. Episode pages write under the owning series'
//! id, the series page under its own.

use sqlx::SqlitePool;

use super::settings;
use crate::models::ProgressRecord;

fn storage_key(series_id: &str) -> String {
    format!("progress_{}", series_id)
}

/// Last-played position for a series, if any was recorded
pub async fn get(
    pool: &SqlitePool,
    series_id: &str,
) -> Result<Option<ProgressRecord>, sqlx::Error> {
    settings::get(pool, &storage_key(series_id)).await
}

/// Record the last-played position for a series
pub async fn put(
    pool: &SqlitePool,
    series_id: &str,
    record: &ProgressRecord,
) -> Result<(), sqlx::Error> {
    settings::put(pool, &storage_key(series_id), record).await
}

/// Forget a series' position; returns the number of records removed
pub async fn remove(pool: &SqlitePool, series_id: &str) -> Result<u64, sqlx::Error> {
    settings::remove(pool, &storage_key(series_id)).await
}
