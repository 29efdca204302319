//! Viewer Configuration
//!
//! Optional `viewer.json` next to the executable overrides the tuned
//! navigation constants and points the viewer at a .splt file. A missing
//! file silently falls back to defaults; a malformed file is reported once
//! and the defaults are used.

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::orbit::{DAMPING_FACTOR, ROTATE_SPEED};
use crate::player::{LocomotionParams, GRAVITY, HORIZONTAL_DAMPING, JUMP_IMPULSE, MOVE_SPEED};

/// Errors that can occur while loading the config file.
#[derive(Debug)]
pub enum ConfigError {
    /// Standard I/O error.
    IoError(std::io::Error),
    /// JSON deserialization error.
    JsonError(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::JsonError(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::JsonError(e)
    }
}

/// Tunable viewer settings. Every field has a default, so a partial JSON
/// file overrides only what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Direct key-driven movement speed, units/s.
    pub move_speed: f32,
    /// Horizontal velocity damping rate, 1/s.
    pub horizontal_damping: f32,
    /// Downward acceleration, units/s^2.
    pub gravity: f32,
    /// Vertical jump impulse, units/s.
    pub jump_impulse: f32,
    /// Orbit drag input scale.
    pub rotate_speed: f32,
    /// Orbit per-update damping fraction.
    pub damping_factor: f32,
    /// Initial camera position.
    pub initial_camera: Vec3,
    /// Cap redraws to the display refresh.
    pub vsync: bool,
    /// Path to a .splt stream; when absent a synthetic demo cloud is shown.
    pub splat_path: Option<PathBuf>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            move_speed: MOVE_SPEED,
            horizontal_damping: HORIZONTAL_DAMPING,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            rotate_speed: ROTATE_SPEED,
            damping_factor: DAMPING_FACTOR,
            initial_camera: Vec3::new(3.0, 3.0, 3.0),
            vsync: true,
            splat_path: None,
        }
    }
}

impl ViewerConfig {
    /// Locomotion tuning derived from this config.
    pub fn locomotion_params(&self) -> LocomotionParams {
        LocomotionParams {
            horizontal_damping: self.horizontal_damping,
            gravity: self.gravity,
            move_speed: self.move_speed,
            jump_impulse: self.jump_impulse,
            ..LocomotionParams::default()
        }
    }

    /// Load the config from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Load the config, falling back to defaults. A missing file is the
    /// normal case and silent; anything else is reported once.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(ConfigError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Self::default()
            }
            Err(e) => {
                eprintln!("Ignoring {}: {e}", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_engine_constants() {
        let config = ViewerConfig::default();
        assert_eq!(config.move_speed, MOVE_SPEED);
        assert_eq!(config.gravity, GRAVITY);
        assert_eq!(config.rotate_speed, ROTATE_SPEED);
        assert_eq!(config.initial_camera, Vec3::new(3.0, 3.0, 3.0));
        assert!(config.splat_path.is_none());
    }

    #[test]
    fn test_partial_json_overrides_only_named_fields() {
        let config: ViewerConfig =
            serde_json::from_str(r#"{ "move_speed": 4.5, "vsync": false }"#).unwrap();
        assert_eq!(config.move_speed, 4.5);
        assert!(!config.vsync);
        assert_eq!(config.gravity, GRAVITY);
    }

    #[test]
    fn test_locomotion_params_carry_overrides() {
        let config = ViewerConfig {
            gravity: 12.0,
            jump_impulse: 50.0,
            ..ViewerConfig::default()
        };
        let params = config.locomotion_params();
        assert_eq!(params.gravity, 12.0);
        assert_eq!(params.jump_impulse, 50.0);
        assert_eq!(params.ground_height, 1.0);
    }

    #[test]
    fn test_missing_file_falls_back_silently() {
        let config = ViewerConfig::load_or_default(Path::new("/nonexistent/viewer.json"));
        assert_eq!(config, ViewerConfig::default());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let dir = std::env::temp_dir().join("splatnav_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("viewer.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            ViewerConfig::load(&path),
            Err(ConfigError::JsonError(_))
        ));
        // load_or_default still yields a usable config
        assert_eq!(ViewerConfig::load_or_default(&path), ViewerConfig::default());
        std::fs::remove_file(&path).ok();
    }
}
