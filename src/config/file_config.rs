use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub port: Option<u16>,
    pub metrics_port: Option<u16>,
    pub logging_level: Option<String>,
    pub frontend_dir_path: Option<String>,

    // Feature configs
    pub generation: Option<GenerationConfig>,
    pub moods: Option<MoodsConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct GenerationConfig {
    pub enabled: Option<bool>,
    pub url: Option<String>,
    pub model: Option<String>,
    pub timeout_sec: Option<u64>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct MoodsConfig {
    pub default_genre: Option<String>,
    pub default_playlist_url: Option<String>,
    /// Emotion label to genre, merged over the built-in table.
    pub genres: BTreeMap<String, String>,
    /// Replaces the built-in playlist list when present. Order is kept.
    pub playlists: Option<Vec<PlaylistConfig>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlaylistConfig {
    pub key: String,
    pub url: String,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
