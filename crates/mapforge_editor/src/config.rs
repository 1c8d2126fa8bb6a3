//! Editor settings
//!
//! Stored as TOML in the platform config directory:
//! - Windows: %APPDATA%/mapforge/config/
//! - Linux: ~/.config/mapforge/
//! - macOS: ~/Library/Application Support/mapforge/

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use mapforge_core::{JsonFileStore, DEFAULT_ANIMATION_SPEED_MS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CONFIG_FILE: &str = "editor.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Settings that persist across editor sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Version for future migrations
    pub version: u32,
    /// Frame time given to a tile converted from static to animated
    pub default_animation_speed_ms: u32,
    pub atlas_dir: PathBuf,
    pub world_dir: PathBuf,
    /// Extension of the files listed as worlds
    pub world_extension: String,
    /// Ask for a second click before removing a tile
    pub confirm_remove: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            version: 1,
            default_animation_speed_ms: DEFAULT_ANIMATION_SPEED_MS,
            atlas_dir: PathBuf::from("atlases"),
            world_dir: PathBuf::from("worlds"),
            world_extension: "json".to_string(),
            confirm_remove: true,
        }
    }
}

impl EditorConfig {
    /// Location of the config file, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "mapforge").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Load from the default location, falling back to defaults
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to load editor config {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Store rooted at the configured directories
    pub fn open_store(&self) -> JsonFileStore {
        JsonFileStore::new(&self.atlas_dir, &self.world_dir)
            .with_world_extension(self.world_extension.clone())
    }
}
