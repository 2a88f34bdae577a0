use serde::{Deserialize, Serialize};

/// Last-played position for a series, keyed by the series id.
///
/// Written whenever playback is initiated, read to pre-populate the
/// series-page season/episode inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub season: u32,
    pub episode: u32,
}

impl Default for ProgressRecord {
    fn default() -> Self {
        Self {
            season: 1,
            episode: 1,
        }
    }
}
