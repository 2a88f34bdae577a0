use serde::{Deserialize, Serialize};

/// Title page classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleKind {
    Unknown,
    Movie,
    Series,
    Episode,
}

impl Default for TitleKind {
    fn default() -> Self {
        Self::Unknown
    }
}

impl std::fmt::Display for TitleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TitleKind::Unknown => write!(f, "unknown"),
            TitleKind::Movie => write!(f, "movie"),
            TitleKind::Series => write!(f, "series"),
            TitleKind::Episode => write!(f, "episode"),
        }
    }
}

/// Resolved context for one title page.
///
/// Built fresh on every resolution, immutable once returned.
/// `current_id` is set iff resolution did not abort early; `parent_id` is
/// only meaningful for episodes; `season`/`episode` only for series and
/// episodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContext {
    #[serde(rename = "type")]
    pub kind: TitleKind,
    /// Title id scraped from the page address (`tt` + digits)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_id: Option<String>,
    /// Id of the owning series, for episode pages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub season: u32,
    pub episode: u32,
}

impl Default for PageContext {
    fn default() -> Self {
        Self {
            kind: TitleKind::Unknown,
            current_id: None,
            parent_id: None,
            season: 1,
            episode: 1,
        }
    }
}
