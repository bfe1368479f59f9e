//! Remembered window position and size.
//!
//! Stored as pretty-printed JSON in `window.json` under the OS data
//! directory. A missing or unreadable file is never an error: defaults are
//! used and written back so the next start finds a valid file.

use std::path::{Path, PathBuf};

use jsedit_common::ConfigError;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::APP_DIR;

/// Window state restored on startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowState {
    #[default]
    Normal,
    Maximized,
    Minimized,
}

/// Outer position and inner size of the main window, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowGeometry {
    pub top: i32,
    pub left: i32,
    pub width: u32,
    pub height: u32,
    pub state: WindowState,
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self {
            top: 0,
            left: 0,
            width: 1200,
            height: 800,
            state: WindowState::Normal,
        }
    }
}

impl WindowGeometry {
    /// Read the file, or write and return defaults when it is missing or
    /// does not parse.
    pub fn read_or_create(path: &Path) -> Self {
        match Self::read(path) {
            Some(geometry) => geometry,
            None => {
                let geometry = Self::default();
                if let Err(e) = geometry.save(path) {
                    warn!(error = %e, "could not write default window geometry");
                }
                geometry
            }
        }
    }

    fn read(path: &Path) -> Option<Self> {
        let text = std::fs::read_to_string(path).ok()?;
        match serde_json::from_str(&text) {
            Ok(geometry) => Some(geometry),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "window geometry unreadable");
                None
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::ParseError(format!(
                    "failed to create data directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(format!("failed to serialize geometry: {e}")))?;

        std::fs::write(path, json).map_err(|e| {
            ConfigError::ParseError(format!("failed to write {}: {e}", path.display()))
        })
    }

    /// Zero-sized windows come back as defaults.
    pub fn sanitized(self) -> Self {
        if self.width == 0 || self.height == 0 {
            let default = Self::default();
            Self {
                width: default.width,
                height: default.height,
                ..self
            }
        } else {
            self
        }
    }
}

/// `window.json` under the platform data directory.
pub fn default_geometry_path() -> Result<PathBuf, ConfigError> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine data directory".into()))?;
    Ok(data_dir.join(APP_DIR).join("window.json"))
}
