//! jsedit configuration.
//!
//! Two files live outside the binary:
//!
//! - `config.toml` in the OS config directory: handshake timing, window
//!   title, asset overrides. Every section has defaults, so partial files
//!   work and a commented template is written on first run.
//! - `window.json` in the OS data directory: the last window geometry,
//!   read on startup and written back when the window closes.
//!
//! ```rust,no_run
//! let config = jsedit_config::load_config().expect("failed to load config");
//! println!("{}", config.handshake.timeout_ms);
//! ```

pub mod geometry;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use geometry::{default_geometry_path, WindowGeometry, WindowState};
pub use schema::{AssetsConfig, HandshakeConfig, JseditConfig, WindowConfig};

use std::path::Path;

use jsedit_common::ConfigError;

/// Directory name used under the OS config and data directories.
pub const APP_DIR: &str = "jsedit";

/// Load `config.toml` from the platform default path, creating it if needed.
pub fn load_config() -> Result<JseditConfig, ConfigError> {
    toml_loader::load_default()
}

/// Load from an explicit path (the `--config` flag). The file must exist.
pub fn load_config_from(path: &Path) -> Result<JseditConfig, ConfigError> {
    toml_loader::load_from_path(path)
}
