//! Embedded page assets.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the editor page is served from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory whose files take precedence over the bundled page.
    pub dir: Option<PathBuf>,
}
