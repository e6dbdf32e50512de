//! Editor configuration.
//!
//! Persistent settings that survive editor restarts, stored as TOML.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Errors from loading or saving the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("config serialization failed: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Editor settings.
///
/// Unknown keys in the file are ignored and missing keys fall back to
/// their defaults, so configs written by older versions keep loading.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum number of commands kept on the undo stack.
    pub max_undo_steps: usize,

    /// Viewport size in pixels, used to normalize pick coordinates.
    pub screen_width: u32,
    pub screen_height: u32,

    /// Uniform scale applied to the gizmo handle layout.
    pub gizmo_scale: f32,

    /// Snapping increments for gizmo drags.
    pub snap_enabled: bool,
    pub translate_snap: f32,
    /// Rotation snap in degrees.
    pub rotate_snap: f32,
    pub scale_snap: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_undo_steps: 100,
            screen_width: 1280,
            screen_height: 720,
            gizmo_scale: 1.0,
            snap_enabled: false,
            translate_snap: 0.5,
            rotate_snap: 15.0,
            scale_snap: 0.1,
        }
    }
}

impl EditorConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        log::info!("loaded editor config from {}", path.display());
        Ok(config)
    }

    /// Save configuration as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("saved editor config to {}", path.display());
        Ok(())
    }

    /// The per-user default config path.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("maquette");
            p.push("editor.toml");
            p
        })
    }
}
