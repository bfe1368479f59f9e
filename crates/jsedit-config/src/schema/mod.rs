//! Configuration schema types.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod assets;
mod handshake;
mod window;

pub use assets::*;
pub use handshake::*;
pub use window::*;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JseditConfig {
    pub handshake: HandshakeConfig,
    pub window: WindowConfig,
    pub assets: AssetsConfig,
}
