//! Provider URL templating
//!
//! Pure string construction: pick the authoritative id, pick the movie or
//! TV path template, substitute `{id}`/`{s}`/`{e}`, glue onto the base.

use crate::models::{PageContext, ProviderDefinition, TitleKind};

/// Fallback templates for providers saved without one
const DEFAULT_MOVIE_FORMAT: &str = "/embed/movie/{id}";
const DEFAULT_TV_FORMAT: &str = "/embed/tv/{id}/{s}/{e}";

/// Build the destination URL for a provider and a resolved context.
///
/// Returns `None` when the provider has no base address or no usable id
/// can be determined. The id rule: movies play under `current_id`;
/// everything else plays under the owning series, which is `parent_id`
/// for episode pages and `current_id` on the series page itself.
pub fn build_url(provider: &ProviderDefinition, context: &PageContext) -> Option<String> {
    let base = provider.base_url.trim();
    if base.is_empty() {
        return None;
    }

    let is_movie = context.kind == TitleKind::Movie;
    let title_id = if is_movie {
        context.current_id.as_deref()
    } else {
        context.parent_id.as_deref().or(context.current_id.as_deref())
    }?;

    let template = if is_movie {
        non_empty(&provider.movie_format).unwrap_or(DEFAULT_MOVIE_FORMAT)
    } else {
        non_empty(&provider.tv_format).unwrap_or(DEFAULT_TV_FORMAT)
    };

    let mut path = template.replacen("{id}", title_id, 1);
    if !is_movie {
        path = path.replacen("{s}", &context.season.max(1).to_string(), 1);
        path = path.replacen("{e}", &context.episode.max(1).to_string(), 1);
    }

    Some(format!("{}{}", base.trim_end_matches('/'), path))
}

fn non_empty(template: &str) -> Option<&str> {
    let trimmed = template.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(base: &str, movie: &str, tv: &str) -> ProviderDefinition {
        ProviderDefinition {
            name: "Test".to_string(),
            base_url: base.to_string(),
            movie_format: movie.to_string(),
            tv_format: tv.to_string(),
            enabled: true,
        }
    }

    fn movie_context(id: &str) -> PageContext {
        PageContext {
            kind: TitleKind::Movie,
            current_id: Some(id.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn movie_uses_current_id() {
        let p = provider("https://vsrc.su", "/embed/movie/{id}", "/embed/tv/{id}/{s}-{e}");
        let url = build_url(&p, &movie_context("tt999")).unwrap();
        assert_eq!(url, "https://vsrc.su/embed/movie/tt999");
    }

    #[test]
    fn episode_uses_parent_id_never_current() {
        let p = provider("https://vsrc.su", "/embed/movie/{id}", "/embed/tv/{id}/{s}-{e}");
        let context = PageContext {
            kind: TitleKind::Episode,
            current_id: Some("tt777".to_string()),
            parent_id: Some("tt123".to_string()),
            season: 2,
            episode: 5,
        };
        let url = build_url(&p, &context).unwrap();
        assert_eq!(url, "https://vsrc.su/embed/tv/tt123/2-5");
    }

    #[test]
    fn series_page_falls_back_to_current_id() {
        let p = provider("https://vidsrc.to", "/embed/movie/{id}", "/embed/tv/{id}/{s}/{e}");
        let context = PageContext {
            kind: TitleKind::Series,
            current_id: Some("tt123".to_string()),
            season: 3,
            episode: 9,
            ..Default::default()
        };
        let url = build_url(&p, &context).unwrap();
        assert_eq!(url, "https://vidsrc.to/embed/tv/tt123/3/9");
    }

    #[test]
    fn empty_base_url_yields_nothing() {
        let p = provider("", "/embed/movie/{id}", "/embed/tv/{id}/{s}/{e}");
        assert!(build_url(&p, &movie_context("tt999")).is_none());
    }

    #[test]
    fn missing_id_yields_nothing() {
        let p = provider("https://vsrc.su", "/embed/movie/{id}", "/embed/tv/{id}/{s}/{e}");
        let context = PageContext::default();
        assert!(build_url(&p, &context).is_none());
    }

    #[test]
    fn trailing_slash_on_base_is_stripped() {
        let p = provider("https://vsrc.su/", "/embed/movie/{id}", "/embed/tv/{id}/{s}/{e}");
        let url = build_url(&p, &movie_context("tt1")).unwrap();
        assert_eq!(url, "https://vsrc.su/embed/movie/tt1");
    }

    #[test]
    fn query_style_templates_work() {
        let p = provider(
            "https://multiembed.mov",
            "/?video_id={id}",
            "/?video_id={id}&s={s}&e={e}",
        );
        let context = PageContext {
            kind: TitleKind::Episode,
            current_id: Some("tt777".to_string()),
            parent_id: Some("tt42".to_string()),
            season: 1,
            episode: 10,
        };
        let url = build_url(&p, &context).unwrap();
        assert_eq!(url, "https://multiembed.mov/?video_id=tt42&s=1&e=10");
    }

    #[test]
    fn only_first_placeholder_occurrence_is_substituted() {
        let p = provider("https://x.example", "/m/{id}/{id}", "/t/{id}");
        let url = build_url(&p, &movie_context("tt5")).unwrap();
        assert_eq!(url, "https://x.example/m/tt5/{id}");
    }

    #[test]
    fn empty_templates_use_builtin_defaults() {
        let p = provider("https://vsrc.su", "", "");
        assert_eq!(
            build_url(&p, &movie_context("tt9")).unwrap(),
            "https://vsrc.su/embed/movie/tt9"
        );
        let series = PageContext {
            kind: TitleKind::Series,
            current_id: Some("tt9".to_string()),
            ..Default::default()
        };
        assert_eq!(
            build_url(&p, &series).unwrap(),
            "https://vsrc.su/embed/tv/tt9/1/1"
        );
    }

    #[test]
    fn falsy_season_episode_default_to_one() {
        let p = provider("https://vsrc.su", "/m/{id}", "/t/{id}/{s}-{e}");
        let context = PageContext {
            kind: TitleKind::Series,
            current_id: Some("tt8".to_string()),
            season: 0,
            episode: 0,
            ..Default::default()
        };
        assert_eq!(
            build_url(&p, &context).unwrap(),
            "https://vsrc.su/t/tt8/1-1"
        );
    }
}
