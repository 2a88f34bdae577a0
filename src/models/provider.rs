use serde::{Deserialize, Serialize};

/// One configured streaming provider.
///
/// Serialized camelCase to stay byte-compatible with the extension's
/// persisted `providers` list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderDefinition {
    /// Display label
    pub name: String,
    /// Scheme + host; trailing slash insignificant
    pub base_url: String,
    /// Path template with `{id}`
    #[serde(default)]
    pub movie_format: String,
    /// Path template with `{id}`, `{s}`, `{e}`
    #[serde(default)]
    pub tv_format: String,
    /// Disabled providers are hidden from selection but retained
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// The full persisted provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSettings {
    pub providers: Vec<ProviderDefinition>,
    #[serde(default)]
    pub default_index: usize,
}
