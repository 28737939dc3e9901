//! Configuration file handling for nexum.
//!
//! Settings live in `config.toml` under the platform config directory. Every
//! field is optional; a missing or unreadable file yields the defaults.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use nexum_core::{
    BackgroundStyle, ParseColorError, RenderOptions, Rgba, Scene, DEFAULT_BREAKPOINT,
    DEFAULT_FRAME_RATE,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid accent color: {0}")]
    Accent(#[from] ParseColorError),
    #[error("no config directory available on this platform")]
    NoConfigDir,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Page shown at startup.
    pub scene: Scene,
    /// Backdrop override; the scene's own backdrop when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<BackgroundStyle>,
    /// Accent color as `#rrggbb`; the scene's accent when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub particle_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_link_distance: Option<f32>,
    /// Viewport width in logical pixels below which budgets shrink.
    pub breakpoint: f32,
    pub frame_rate: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scene: Scene::default(),
            background: None,
            accent: None,
            particle_count: None,
            max_link_distance: None,
            breakpoint: DEFAULT_BREAKPOINT,
            frame_rate: DEFAULT_FRAME_RATE,
        }
    }
}

impl Config {
    /// Path of the config file in the platform config directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("studio", "nexum", "nexum")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load from the default location, falling back to defaults on any error.
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }
        Self::load_from(&path).unwrap_or_else(|err| {
            warn!(%err, "ignoring config file");
            Self::default()
        })
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::default_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Write the config, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(write_err)
    }

    /// Backdrop to mount: the override, else the scene's own.
    pub fn background_style(&self) -> BackgroundStyle {
        self.background.unwrap_or_else(|| self.scene.background())
    }

    /// Options handed to the renderer at mount.
    pub fn render_options(&self) -> Result<RenderOptions, ConfigError> {
        let accent = match &self.accent {
            Some(hex) => Rgba::from_hex(hex)?,
            None => self.scene.accent(),
        };
        let breakpoint = if self.breakpoint.is_finite() && self.breakpoint > 0.0 {
            self.breakpoint
        } else {
            DEFAULT_BREAKPOINT
        };
        Ok(RenderOptions {
            accent,
            particle_count: self.particle_count,
            max_link_distance: self.max_link_distance,
            breakpoint,
        })
    }
}
