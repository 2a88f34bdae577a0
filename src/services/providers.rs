//! Provider configuration: built-in defaults, index clamping, selection.
//!
//! The persisted shape is an ordered list plus a default index. Storage
//! with no providers falls back to the built-in set without writing it
//! back; the index is clamped into range on every read.

use sqlx::SqlitePool;

use crate::db::repository::settings::{self, DEFAULT_PROVIDER_INDEX_KEY, PROVIDERS_KEY};
use crate::models::{ProviderDefinition, ProviderSettings};

/// Built-in provider set, used whenever storage holds none
pub fn defaults() -> Vec<ProviderDefinition> {
    fn provider(name: &str, base: &str, movie: &str, tv: &str, enabled: bool) -> ProviderDefinition {
        ProviderDefinition {
            name: name.to_string(),
            base_url: base.to_string(),
            movie_format: movie.to_string(),
            tv_format: tv.to_string(),
            enabled,
        }
    }

    vec![
        provider(
            "VidSrc.su",
            "https://vsrc.su",
            "/embed/movie/{id}",
            "/embed/tv/{id}/{s}-{e}",
            true,
        ),
        provider(
            "VidSrc.to",
            "https://vidsrc.to",
            "/embed/movie/{id}",
            "/embed/tv/{id}/{s}/{e}",
            true,
        ),
        provider(
            "AutoEmbed",
            "https://player.autoembed.cc",
            "/embed/movie/{id}",
            "/embed/tv/{id}/{s}/{e}",
            true,
        ),
        // The two SuperEmbed mirrors ship disabled: heavy ad load
        provider(
            "SuperEmbed",
            "https://multiembed.mov",
            "/?video_id={id}",
            "/?video_id={id}&s={s}&e={e}",
            false,
        ),
        provider(
            "SuperEmbed VIP",
            "https://multiembed.mov",
            "/directstream.php?video_id={id}",
            "/directstream.php?video_id={id}&s={s}&e={e}",
            false,
        ),
        provider(
            "SmashyStream",
            "https://player.smashy.stream",
            "/movie/{id}",
            "/tv/{id}/{s}/{e}",
            true,
        ),
    ]
}

/// Clamp a stored default index into range; anything out of range
/// resolves to 0.
pub fn clamp_index(index: usize, len: usize) -> usize {
    if index >= len {
        0
    } else {
        index
    }
}

/// Default index after removing one provider from the list
pub fn index_after_remove(default_index: usize, new_len: usize) -> usize {
    if new_len == 0 {
        0
    } else if default_index >= new_len {
        new_len - 1
    } else {
        default_index
    }
}

/// Pick the provider for a playback request.
///
/// An explicitly requested index is honored as-is (even when disabled) but
/// never clamped: out of range means no selection. Without a request the
/// clamped default is used, skipping to the first enabled provider when
/// the default is disabled.
pub fn select<'a>(
    settings: &'a ProviderSettings,
    requested: Option<usize>,
) -> Option<&'a ProviderDefinition> {
    if settings.providers.is_empty() {
        return None;
    }

    if let Some(index) = requested {
        return settings.providers.get(index);
    }

    let index = clamp_index(settings.default_index, settings.providers.len());
    let candidate = &settings.providers[index];
    if candidate.enabled {
        Some(candidate)
    } else {
        settings.providers.iter().find(|p| p.enabled)
    }
}

/// Load provider settings from storage, substituting the built-in set
/// when none are persisted. The defaults are never written back here.
pub async fn load(pool: &SqlitePool) -> Result<ProviderSettings, sqlx::Error> {
    let stored: Option<Vec<ProviderDefinition>> = settings::get(pool, PROVIDERS_KEY).await?;
    let stored_index: Option<u64> = settings::get(pool, DEFAULT_PROVIDER_INDEX_KEY).await?;

    let (providers, raw_index) = match stored {
        Some(list) if !list.is_empty() => (list, stored_index.unwrap_or(0) as usize),
        _ => (defaults(), 0),
    };

    let default_index = clamp_index(raw_index, providers.len());
    Ok(ProviderSettings {
        providers,
        default_index,
    })
}

/// Persist the full provider configuration (both keys, last write wins)
pub async fn save(pool: &SqlitePool, config: &ProviderSettings) -> Result<(), sqlx::Error> {
    settings::put(pool, PROVIDERS_KEY, &config.providers).await?;
    settings::put(pool, DEFAULT_PROVIDER_INDEX_KEY, &config.default_index).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_settings(enabled: &[bool], default_index: usize) -> ProviderSettings {
        let providers = enabled
            .iter()
            .enumerate()
            .map(|(i, &enabled)| ProviderDefinition {
                name: format!("P{}", i),
                base_url: format!("https://p{}.example", i),
                movie_format: "/m/{id}".to_string(),
                tv_format: "/t/{id}/{s}/{e}".to_string(),
                enabled,
            })
            .collect();
        ProviderSettings {
            providers,
            default_index,
        }
    }

    #[test]
    fn default_set_is_sane() {
        let list = defaults();
        assert_eq!(list.len(), 6);
        assert!(list[0].enabled);
        assert!(list.iter().all(|p| !p.base_url.is_empty()));
        assert!(list.iter().any(|p| !p.enabled));
    }

    #[test]
    fn out_of_range_index_clamps_to_zero() {
        assert_eq!(clamp_index(99, 3), 0);
        assert_eq!(clamp_index(3, 3), 0);
        assert_eq!(clamp_index(2, 3), 2);
        assert_eq!(clamp_index(0, 0), 0);
    }

    #[test]
    fn removal_reassigns_default_index() {
        // Deleting the tail entry while it was the default
        assert_eq!(index_after_remove(2, 2), 1);
        // Default still in range is kept
        assert_eq!(index_after_remove(0, 2), 0);
        // List emptied out entirely
        assert_eq!(index_after_remove(0, 0), 0);
    }

    #[test]
    fn default_selection_uses_clamped_index() {
        let settings = test_settings(&[true, true, true], 99);
        assert_eq!(select(&settings, None).unwrap().name, "P0");
    }

    #[test]
    fn disabled_default_falls_to_first_enabled() {
        let settings = test_settings(&[false, false, true], 0);
        assert_eq!(select(&settings, None).unwrap().name, "P2");
    }

    #[test]
    fn all_disabled_yields_no_selection() {
        let settings = test_settings(&[false, false], 0);
        assert!(select(&settings, None).is_none());
    }

    #[test]
    fn explicit_index_is_honored_even_when_disabled() {
        let settings = test_settings(&[true, false], 0);
        assert_eq!(select(&settings, Some(1)).unwrap().name, "P1");
    }

    #[test]
    fn explicit_out_of_range_index_is_rejected() {
        let settings = test_settings(&[true, true], 0);
        assert!(select(&settings, Some(5)).is_none());
    }

    #[test]
    fn empty_list_yields_no_selection() {
        let settings = ProviderSettings {
            providers: Vec::new(),
            default_index: 0,
        };
        assert!(select(&settings, None).is_none());
    }
}
