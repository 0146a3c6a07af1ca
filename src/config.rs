use serde::Deserialize;
use std::path::{Path, PathBuf};
use directories::ProjectDirs;
use anyhow::{Context, Result};
use std::fs;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub picker: PickerConfig,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GeneralConfig {
    /// Program used to evaluate the definitions file
    #[serde(default = "default_node")]
    pub node: String,
    /// Editor command for opening the definitions file; `$EDITOR` otherwise
    #[serde(default)]
    pub editor: Option<String>,
    /// Re-read the definitions file after every command instead of only re-sorting
    #[serde(default)]
    pub reload_on_use: bool,
    /// Characters of copied text echoed in the confirmation
    #[serde(default = "default_clipboard_preview")]
    pub clipboard_preview: usize,
}

fn default_node() -> String { "node".to_string() }
fn default_clipboard_preview() -> usize { 20 }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            node: default_node(),
            editor: None,
            reload_on_use: false,
            clipboard_preview: default_clipboard_preview(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct PickerConfig {
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    #[serde(default = "default_recent_label")]
    pub recent_label: String,
}

fn default_placeholder() -> String { "Select a custom command".to_string() }
fn default_recent_label() -> String { "recent".to_string() }

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
            recent_label: default_recent_label(),
        }
    }
}

pub fn default_config_path() -> PathBuf {
    let proj_dirs = ProjectDirs::from("org", "custom-commander", "custom-commander");
    if let Some(dirs) = &proj_dirs {
        dirs.config_dir().join("config.toml")
    } else {
        PathBuf::from("config.toml")
    }
}

pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config_path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);

    if !config_path.exists() {
        if path.is_some() {
            log::warn!("Config file {:?} not found, using defaults", config_path);
        }
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&config_path)?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("invalid config {}", config_path.display()))?;
    log::debug!("Loaded config from {:?}", config_path);
    Ok(config)
}
