//! Startup settings.
//!
//! Everything has a sensible default; an optional JSON file can override the
//! movement tuning and force a control scheme.

use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use crate::input::ControlScheme;
use crate::player::MovementConfig;

/// Settings file looked up in the working directory.
pub const DEFAULT_SETTINGS_PATH: &str = "walkabout.json";
/// Overrides the settings file location.
pub const SETTINGS_PATH_VAR: &str = "WALKABOUT_CONFIG";
/// Forces a control scheme (`desktop` or `touch`).
pub const CONTROLS_VAR: &str = "WALKABOUT_CONTROLS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid settings in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown control scheme '{0}', expected 'desktop' or 'touch'")]
    UnknownScheme(String),
}

/// Settings read once before the app starts.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub movement: MovementConfig,
    /// Forces a control scheme instead of detecting one.
    pub controls: Option<ControlScheme>,
}

impl Settings {
    /// Loads settings, falling back to defaults on any error.
    pub fn load() -> Self {
        let path = env::var(SETTINGS_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SETTINGS_PATH));

        let mut settings = match Self::from_file(&path) {
            Ok(Some(settings)) => {
                info!("Loaded settings from {}", path.display());
                settings
            }
            Ok(None) => Self::default(),
            Err(e) => {
                warn!("{e}; using default settings");
                Self::default()
            }
        };

        if let Ok(name) = env::var(CONTROLS_VAR) {
            match parse_scheme(&name) {
                Ok(scheme) => settings.controls = Some(scheme),
                Err(e) => warn!("{e}"),
            }
        }

        settings.movement = settings.movement.sanitized();
        settings
    }

    /// Reads `path`. A missing file is not an error.
    pub fn from_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Self::from_json(&text)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// The forced scheme, or whatever the platform suggests.
    pub fn control_scheme(&self) -> ControlScheme {
        self.controls.unwrap_or_else(ControlScheme::detect)
    }
}

fn parse_scheme(name: &str) -> Result<ControlScheme, ConfigError> {
    ControlScheme::parse(name).ok_or_else(|| ConfigError::UnknownScheme(name.to_string()))
}
