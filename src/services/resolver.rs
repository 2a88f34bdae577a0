//! Title page metadata resolution
//!
//! Turns a page address plus an HTML snapshot into a [`PageContext`]
//! through three tiers: structured data (JSON-LD), rendered DOM labels,
//! and a coarse heuristic. Structured data is authoritative for the page
//! *type*; the rendered `S1.E3` label is authoritative for the season and
//! episode *numbers*, which JSON-LD sometimes reports stale or not at all.
//!
//! The only hard failure is a page address without a `tt` id: resolution
//! returns an Unknown context and callers must check `current_id` before
//! doing anything with it.

use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::models::{PageContext, TitleKind};

lazy_static! {
    /// Title id embedded in the page address
    static ref TITLE_ID: Regex = Regex::new(r"/title/(tt\d+)").unwrap();
    /// Rendered "S1.E3" label in the hero section
    static ref SEASON_EPISODE_LABEL: Regex = Regex::new(r"S(\d+)\.E(\d+)").unwrap();
}

const JSON_LD_SELECTOR: &str = r#"script[type="application/ld+json"]"#;
const SE_LABEL_SELECTOR: &str =
    r#"[data-testid="hero-subnav-bar-season-episode-numbers-section"]"#;
const SERIES_LINK_SELECTOR: &str = r#"[data-testid="hero-title-block__series-link"]"#;
const EPISODE_PICKER_SELECTOR: &str =
    r#"[data-testid="hero-subnav-bar-season-episode-picker-section"]"#;

/// JSON-LD document shape, reduced to the fields we read
#[derive(Debug, Deserialize)]
struct LinkedData {
    #[serde(rename = "@type")]
    kind: Option<String>,
    #[serde(rename = "episodeNumber")]
    episode_number: Option<Value>,
    #[serde(rename = "partOfSeason")]
    part_of_season: Option<SeasonRef>,
    #[serde(rename = "partOfSeries")]
    part_of_series: Option<SeriesRef>,
}

#[derive(Debug, Deserialize)]
struct SeasonRef {
    #[serde(rename = "seasonNumber")]
    season_number: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct SeriesRef {
    url: Option<String>,
}

/// Resolve a title page into a [`PageContext`].
///
/// Pure and idempotent: re-derives the full context from the inputs on
/// every call, so repeated invocations for the same page are harmless.
pub fn resolve(address: &str, html: &str) -> PageContext {
    let mut context = PageContext::default();

    // 1. Id from the address; absence aborts resolution entirely.
    let Some(id) = extract_title_id(address) else {
        return context;
    };
    context.current_id = Some(id);

    let document = Html::parse_document(html);

    // 2. Structured-data pass (authoritative for the type)
    apply_structured_data(&document, &mut context);

    // 3. Visual pass (authoritative for season/episode numbers)
    apply_visual_signals(&document, &mut context);

    // 4. Default classification once a valid id is confirmed
    if context.kind == TitleKind::Unknown {
        context.kind = if select_first(&document, EPISODE_PICKER_SELECTOR).is_some() {
            TitleKind::Series
        } else {
            TitleKind::Movie
        };
    }

    context
}

/// Extract the `tt` id from a page address (full URL or bare path)
pub fn extract_title_id(address: &str) -> Option<String> {
    let path = match Url::parse(address) {
        Ok(url) => url.path().to_string(),
        Err(_) => address.to_string(),
    };
    TITLE_ID
        .captures(&path)
        .map(|caps| caps[1].to_string())
}

/// Classify from the page's JSON-LD block, if present and parseable.
/// Any failure here is non-fatal; later passes fill the gaps.
fn apply_structured_data(document: &Html, context: &mut PageContext) {
    let Some(block) = select_first(document, JSON_LD_SELECTOR) else {
        return;
    };
    let raw = element_text(&block);

    let data: LinkedData = match serde_json::from_str(&raw) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!("Failed to parse structured data block: {}", e);
            return;
        }
    };

    match data.kind.as_deref() {
        Some("Movie") => context.kind = TitleKind::Movie,
        Some("TVSeries") | Some("TVSeason") => context.kind = TitleKind::Series,
        Some("TVEpisode") => {
            context.kind = TitleKind::Episode;

            if let Some(episode) = data.episode_number.as_ref().and_then(positive_number) {
                context.episode = episode;
            }
            if let Some(season) = data
                .part_of_season
                .as_ref()
                .and_then(|s| s.season_number.as_ref())
                .and_then(positive_number)
            {
                context.season = season;
            }
            if let Some(series_url) = data.part_of_series.as_ref().and_then(|s| s.url.as_deref()) {
                context.parent_id = extract_title_id(series_url);
            }
        }
        _ => {}
    }
}

/// Scrape the rendered UI: the compact `S<n>.E<m>` label confirms an
/// episode page and overwrites the numbers, and the series link fills a
/// missing parent id.
fn apply_visual_signals(document: &Html, context: &mut PageContext) {
    if let Some(label) = select_first(document, SE_LABEL_SELECTOR) {
        // The label overrides a possibly-wrong structured classification
        context.kind = TitleKind::Episode;
        let text = element_text(&label);
        if let Some(caps) = SEASON_EPISODE_LABEL.captures(&text) {
            if let (Ok(season), Ok(episode)) = (caps[1].parse(), caps[2].parse()) {
                context.season = season;
                context.episode = episode;
            }
        }
    }

    if context.kind == TitleKind::Episode && context.parent_id.is_none() {
        if let Some(link) = select_first(document, SERIES_LINK_SELECTOR) {
            if let Some(href) = link.value().attr("href") {
                context.parent_id = extract_title_id(href);
            }
        }
    }
}

/// First element matching a CSS selector
fn select_first<'a>(document: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    document.select(&selector).next()
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Normalize a loosely-typed JSON-LD number (sometimes numeric, sometimes
/// a string) to a canonical positive integer.
fn positive_number(value: &Value) -> Option<u32> {
    let number = match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    number.filter(|&n| n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOVIE_URL: &str = "https://www.imdb.com/title/tt0133093/";
    const EPISODE_URL: &str = "https://www.imdb.com/title/tt0959621/";

    fn json_ld(body: &str) -> String {
        format!(r#"<script type="application/ld+json">{}</script>"#, body)
    }

    #[test]
    fn no_title_id_aborts_resolution() {
        let context = resolve("https://www.imdb.com/search/title/?genres=drama", "<html></html>");
        assert_eq!(context.kind, TitleKind::Unknown);
        assert!(context.current_id.is_none());
    }

    #[test]
    fn bare_path_address_is_accepted() {
        assert_eq!(
            extract_title_id("/title/tt0133093/"),
            Some("tt0133093".to_string())
        );
    }

    #[test]
    fn valid_id_without_signals_defaults_to_movie() {
        let context = resolve(MOVIE_URL, "<html><body><h1>The Matrix</h1></body></html>");
        assert_eq!(context.kind, TitleKind::Movie);
        assert_eq!(context.current_id.as_deref(), Some("tt0133093"));
        assert_eq!((context.season, context.episode), (1, 1));
    }

    #[test]
    fn episode_picker_implies_series() {
        let html = r#"<div data-testid="hero-subnav-bar-season-episode-picker-section"></div>"#;
        let context = resolve("https://www.imdb.com/title/tt0903747/", html);
        assert_eq!(context.kind, TitleKind::Series);
    }

    #[test]
    fn structured_data_classifies_movie() {
        let html = json_ld(r#"{"@type":"Movie","name":"The Matrix"}"#);
        let context = resolve(MOVIE_URL, &html);
        assert_eq!(context.kind, TitleKind::Movie);
    }

    #[test]
    fn tv_season_counts_as_series() {
        let html = json_ld(r#"{"@type":"TVSeason"}"#);
        let context = resolve("https://www.imdb.com/title/tt0903747/", &html);
        assert_eq!(context.kind, TitleKind::Series);
    }

    #[test]
    fn structured_episode_reads_numbers_and_parent() {
        let html = json_ld(
            r#"{"@type":"TVEpisode","episodeNumber":7,
                "partOfSeason":{"seasonNumber":3},
                "partOfSeries":{"url":"https://www.imdb.com/title/tt0903747/"}}"#,
        );
        let context = resolve(EPISODE_URL, &html);
        assert_eq!(context.kind, TitleKind::Episode);
        assert_eq!(context.season, 3);
        assert_eq!(context.episode, 7);
        assert_eq!(context.parent_id.as_deref(), Some("tt0903747"));
    }

    #[test]
    fn string_typed_numbers_are_normalized() {
        let html = json_ld(
            r#"{"@type":"TVEpisode","episodeNumber":"7",
                "partOfSeason":{"seasonNumber":"3"}}"#,
        );
        let context = resolve(EPISODE_URL, &html);
        assert_eq!((context.season, context.episode), (3, 7));
    }

    #[test]
    fn visual_label_overrides_structured_numbers() {
        let html = format!(
            "{}{}",
            json_ld(
                r#"{"@type":"TVEpisode","episodeNumber":1,
                    "partOfSeason":{"seasonNumber":1},
                    "partOfSeries":{"url":"/title/tt0903747/"}}"#
            ),
            r#"<div data-testid="hero-subnav-bar-season-episode-numbers-section">S2.E5</div>"#,
        );
        let context = resolve(EPISODE_URL, &html);
        assert_eq!(context.kind, TitleKind::Episode);
        assert_eq!(context.season, 2);
        assert_eq!(context.episode, 5);
        assert_eq!(context.parent_id.as_deref(), Some("tt0903747"));
    }

    #[test]
    fn visual_label_forces_episode_without_structured_data() {
        let html =
            r#"<div data-testid="hero-subnav-bar-season-episode-numbers-section">S4.E13</div>"#;
        let context = resolve(EPISODE_URL, html);
        assert_eq!(context.kind, TitleKind::Episode);
        assert_eq!((context.season, context.episode), (4, 13));
    }

    #[test]
    fn series_link_fills_missing_parent() {
        let html = format!(
            "{}{}",
            r#"<div data-testid="hero-subnav-bar-season-episode-numbers-section">S1.E3</div>"#,
            r#"<a data-testid="hero-title-block__series-link" href="/title/tt0475784/">Westworld</a>"#,
        );
        let context = resolve(EPISODE_URL, &html);
        assert_eq!(context.parent_id.as_deref(), Some("tt0475784"));
    }

    #[test]
    fn first_label_wins_when_ambiguous() {
        let html = concat!(
            r#"<div data-testid="hero-subnav-bar-season-episode-numbers-section">S1.E2</div>"#,
            r#"<div data-testid="hero-subnav-bar-season-episode-numbers-section">S9.E9</div>"#,
        );
        let context = resolve(EPISODE_URL, html);
        assert_eq!((context.season, context.episode), (1, 2));
    }

    #[test]
    fn malformed_structured_data_falls_through() {
        let html = json_ld("{this is not json");
        let context = resolve(MOVIE_URL, &html);
        assert_eq!(context.kind, TitleKind::Movie);
        assert_eq!(context.current_id.as_deref(), Some("tt0133093"));
    }

    #[test]
    fn zero_and_garbage_numbers_are_rejected() {
        assert_eq!(positive_number(&serde_json::json!(0)), None);
        assert_eq!(positive_number(&serde_json::json!("abc")), None);
        assert_eq!(positive_number(&serde_json::json!(null)), None);
        assert_eq!(positive_number(&serde_json::json!(" 12 ")), Some(12));
    }
}
