use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Complete plaza configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlazaConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub town: TownConfig,
}

/// HTTP / WebSocket server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8081".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

/// The town served by this process
#[derive(Debug, Clone, Deserialize)]
pub struct TownConfig {
    #[serde(default = "default_town_id")]
    pub id: String,
    #[serde(default = "default_friendly_name")]
    pub friendly_name: String,
    /// Tiled JSON map; when absent the town has no areas
    #[serde(default)]
    pub map_path: Option<PathBuf>,
    /// Broadcast buffer per town (slow subscribers beyond this lag)
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
    /// Mailbox size of the town task
    #[serde(default = "default_command_capacity")]
    pub command_capacity: usize,
}

fn default_town_id() -> String {
    "town".to_string()
}

fn default_friendly_name() -> String {
    "Plaza".to_string()
}

fn default_event_capacity() -> usize {
    1000
}

fn default_command_capacity() -> usize {
    256
}

impl Default for TownConfig {
    fn default() -> Self {
        Self {
            id: default_town_id(),
            friendly_name: default_friendly_name(),
            map_path: None,
            event_capacity: default_event_capacity(),
            command_capacity: default_command_capacity(),
        }
    }
}

impl PlazaConfig {
    /// Apply PLAZA_* environment overrides on top of file values
    pub fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("PLAZA_BIND_ADDR") {
            if !v.is_empty() {
                self.server.bind_addr = v;
            }
        }
        if let Ok(v) = std::env::var("PLAZA_MAP_PATH") {
            if !v.is_empty() {
                self.town.map_path = Some(PathBuf::from(v));
            }
        }
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<PlazaConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: PlazaConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    Ok(config)
}

/// Load configuration, falling back to defaults when the file does not exist
pub fn load_or_default(path: &Path) -> Result<PlazaConfig> {
    if path.exists() {
        load_config(path)
    } else {
        Ok(PlazaConfig::default())
    }
}
