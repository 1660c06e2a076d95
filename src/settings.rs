//! Game settings
//!
//! Loaded from an optional JSON file; every field falls back to its default
//! when absent, so a settings file only needs the values it changes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Bounds;
use crate::consts::{FPS, GAME_HEIGHT, GAME_WIDTH};
use crate::sim::defs::{DefinitionError, DefinitionTable};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("playfield must be positive, got {width}x{height}")]
    InvalidDimensions { width: f32, height: f32 },

    #[error("fps must be at least 1")]
    InvalidFps,
}

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Logical screen width
    pub width: f32,
    /// Logical screen height
    pub height: f32,
    /// Frames per second; scales the frame-counted timers
    pub fps: u32,
    /// Seed for the world RNG
    pub seed: u64,
    /// Large asteroids spawned when a level starts
    pub asteroids_per_level: u32,
    /// Optional JSON entity definition table replacing the built-in one
    pub definitions: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: GAME_WIDTH,
            height: GAME_HEIGHT,
            fps: FPS,
            seed: 0,
            asteroids_per_level: 20,
            definitions: None,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let settings: Self = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.width) || !positive(self.height) {
            return Err(SettingsError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.fps == 0 {
            return Err(SettingsError::InvalidFps);
        }
        Ok(())
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }

    /// Nominal frame duration
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.fps.max(1) as f32
    }

    /// The configured definition table, or the built-in one
    pub fn load_definitions(&self) -> Result<DefinitionTable, DefinitionError> {
        match &self.definitions {
            Some(path) => DefinitionTable::load(path),
            None => Ok(DefinitionTable::builtin()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.bounds(), Bounds::new(320.0, 200.0));
        assert_eq!(settings.fps, 60);
        assert_eq!(settings.asteroids_per_level, 20);
        assert!(settings.validate().is_ok());
        assert!((settings.frame_dt() - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "seed": 42, "width": 640 }"#).unwrap();
        assert_eq!(settings.seed, 42);
        assert_eq!(settings.width, 640.0);
        assert_eq!(settings.height, 200.0);
        assert!(settings.definitions.is_none());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_height = Settings {
            height: 0.0,
            ..Settings::default()
        };
        assert!(matches!(
            zero_height.validate(),
            Err(SettingsError::InvalidDimensions { .. })
        ));

        let nan_width = Settings {
            width: f32::NAN,
            ..Settings::default()
        };
        assert!(nan_width.validate().is_err());

        let no_fps = Settings {
            fps: 0,
            ..Settings::default()
        };
        assert!(matches!(no_fps.validate(), Err(SettingsError::InvalidFps)));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("astro-drift-no-such-settings.json");
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_round_trip_file() {
        let path = std::env::temp_dir().join(format!("astro-drift-settings-{}.json", std::process::id()));
        let saved = Settings {
            seed: 9,
            asteroids_per_level: 3,
            ..Settings::default()
        };
        std::fs::write(&path, serde_json::to_string(&saved).unwrap()).unwrap();

        let loaded = Settings::load(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded.unwrap(), saved);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("astro-drift-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();

        let loaded = Settings::load(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(loaded, Err(SettingsError::Json(_))));
    }

    #[test]
    fn test_builtin_definitions_without_path() {
        let defs = Settings::default().load_definitions().unwrap();
        assert_eq!(defs, DefinitionTable::builtin());
    }
}
