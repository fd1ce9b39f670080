mod file_config;

pub use file_config::{FileConfig, GenerationConfig, MoodsConfig, PlaylistConfig};

use crate::mood::{Emotion, MoodTables, PlaylistEntry, DEFAULT_GENRE, DEFAULT_PLAYLIST_URL};
use crate::server::RequestsLoggingLevel;
use anyhow::{anyhow, bail, Result};
use clap::ValueEnum;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_METRICS_PORT: u16 = 9091;
pub const DEFAULT_GENERATION_URL: &str = "http://localhost:11434";
pub const DEFAULT_GENERATION_MODEL: &str = "llama2";
pub const DEFAULT_GENERATION_TIMEOUT_SEC: u64 = 5;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
    pub generation_url: String,
    pub generation_model: String,
    pub generation_timeout_sec: u64,
    pub disable_generation: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            metrics_port: DEFAULT_METRICS_PORT,
            logging_level: RequestsLoggingLevel::default(),
            frontend_dir_path: None,
            generation_url: DEFAULT_GENERATION_URL.to_string(),
            generation_model: DEFAULT_GENERATION_MODEL.to_string(),
            generation_timeout_sec: DEFAULT_GENERATION_TIMEOUT_SEC,
            disable_generation: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    // Core settings
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,

    // Feature configs (with defaults)
    pub generation: GenerationSettings,
    pub moods: MoodTables,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSettings {
    pub enabled: bool,
    pub url: String,
    pub model: String,
    pub timeout_sec: u64,
}

impl GenerationSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_sec)
    }
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let port = file.port.unwrap_or(cli.port);
        let metrics_port = file.metrics_port.unwrap_or(cli.metrics_port);

        let logging_level = match file.logging_level {
            Some(s) => parse_logging_level(&s)
                .ok_or_else(|| anyhow!("Invalid logging_level in config file: {}", s))?,
            None => cli.logging_level.clone(),
        };

        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone());

        let generation = resolve_generation(cli, file.generation.unwrap_or_default())?;
        let moods = resolve_moods(file.moods.unwrap_or_default())?;

        Ok(Self {
            port,
            metrics_port,
            logging_level,
            frontend_dir_path,
            generation,
            moods,
        })
    }
}

fn resolve_generation(cli: &CliConfig, file: GenerationConfig) -> Result<GenerationSettings> {
    let settings = GenerationSettings {
        enabled: file.enabled.unwrap_or(!cli.disable_generation),
        url: file.url.unwrap_or_else(|| cli.generation_url.clone()),
        model: file.model.unwrap_or_else(|| cli.generation_model.clone()),
        timeout_sec: file.timeout_sec.unwrap_or(cli.generation_timeout_sec),
    };

    if settings.timeout_sec == 0 {
        bail!("Generation timeout must be greater than zero");
    }
    if settings.enabled {
        if settings.model.trim().is_empty() {
            bail!("Generation model must not be empty");
        }
        if !is_http_url(&settings.url) {
            bail!("Generation URL must be an http(s) URL: {}", settings.url);
        }
    }

    Ok(settings)
}

fn resolve_moods(file: MoodsConfig) -> Result<MoodTables> {
    let mut genres = MoodTables::builtin_genres();
    for (label, genre) in file.genres {
        let emotion = Emotion::from_label(&label)
            .ok_or_else(|| anyhow!("Unknown emotion in [moods.genres]: {}", label))?;
        if genre.trim().is_empty() {
            bail!("Genre for {} must not be empty", emotion);
        }
        genres.insert(emotion, genre);
    }

    let playlists = match file.playlists {
        Some(entries) => entries
            .into_iter()
            .map(|entry| {
                if entry.key.trim().is_empty() {
                    bail!("Playlist key must not be empty");
                }
                if !is_http_url(&entry.url) {
                    bail!("Playlist URL must be an http(s) URL: {}", entry.url);
                }
                Ok(PlaylistEntry::new(entry.key, entry.url))
            })
            .collect::<Result<Vec<_>>>()?,
        None => MoodTables::builtin_playlists(),
    };

    let default_genre = file
        .default_genre
        .unwrap_or_else(|| DEFAULT_GENRE.to_string());
    if default_genre.trim().is_empty() {
        bail!("default_genre must not be empty");
    }

    let default_playlist_url = file
        .default_playlist_url
        .unwrap_or_else(|| DEFAULT_PLAYLIST_URL.to_string());
    if !is_http_url(&default_playlist_url) {
        bail!(
            "default_playlist_url must be an http(s) URL: {}",
            default_playlist_url
        );
    }

    Ok(MoodTables::new(
        genres,
        playlists,
        default_genre,
        default_playlist_url,
    ))
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
