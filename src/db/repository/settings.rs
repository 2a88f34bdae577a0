//! Key-value settings repository
//!
//! All persisted state lives in one `settings` table of JSON values.
//! Writes are per-key upserts (last write wins); there is no cross-key
//! transactional requirement. A value that fails to parse is logged and
//! treated as absent so callers substitute their defaults.

use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::warn;

/// Ordered provider list
pub const PROVIDERS_KEY: &str = "providers";
/// Index of the default provider within the list
pub const DEFAULT_PROVIDER_INDEX_KEY: &str = "defaultProviderIndex";

/// Read and deserialize a value by key
pub async fn get<T: DeserializeOwned>(
    pool: &SqlitePool,
    key: &str,
) -> Result<Option<T>, sqlx::Error> {
    let row: Option<(String,)> = sqlx::query_as("SELECT value FROM settings WHERE key = ?1")
        .bind(key)
        .fetch_optional(pool)
        .await?;

    Ok(row.and_then(|(raw,)| match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Malformed value under settings key {}: {}", key, e);
            None
        }
    }))
}

/// Serialize and upsert a value under a key
pub async fn put<T: Serialize>(pool: &SqlitePool, key: &str, value: &T) -> Result<(), sqlx::Error> {
    let raw = serde_json::to_string(value).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

    sqlx::query(
        r#"
        INSERT INTO settings (key, value, updated_at)
        VALUES (?1, ?2, datetime('now'))
        ON CONFLICT (key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(key)
    .bind(raw)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete a key; returns the number of rows removed
pub async fn remove(pool: &SqlitePool, key: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM settings WHERE key = ?1")
        .bind(key)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
