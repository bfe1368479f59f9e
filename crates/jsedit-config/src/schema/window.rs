//! Window settings.

use serde::{Deserialize, Serialize};

/// Static window settings. Geometry is not configured here; it is
/// remembered in `window.json` (see [`crate::geometry`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Application title, shown after the document name.
    pub title: String,
    /// Enable the webview inspector.
    pub devtools: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "JSON Editor".into(),
            devtools: cfg!(debug_assertions),
        }
    }
}
