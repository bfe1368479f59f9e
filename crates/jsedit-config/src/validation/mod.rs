//! Configuration validation.
//!
//! Each section has its own check; this orchestrator runs them all and
//! collects every problem into a single `ConfigError`.

mod helpers;


use crate::schema::{JseditConfig, WindowConfig};
use jsedit_common::ConfigError;

use helpers::validate_range;

/// Longest handshake budget accepted, in milliseconds.
pub const MAX_HANDSHAKE_TIMEOUT_MS: u64 = 120_000;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &JseditConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_handshake(&mut errors, config);
    validate_window(&mut errors, &config.window);
    validate_assets(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_handshake(errors: &mut Vec<String>, config: &JseditConfig) {
    let handshake = &config.handshake;
    validate_range(
        errors,
        "handshake.timeout_ms",
        handshake.timeout_ms,
        1,
        MAX_HANDSHAKE_TIMEOUT_MS,
    );
    validate_range(
        errors,
        "handshake.retry_interval_ms",
        handshake.retry_interval_ms,
        1,
        handshake.timeout_ms.max(1),
    );
}

fn validate_window(errors: &mut Vec<String>, window: &WindowConfig) {
    if window.title.trim().is_empty() {
        errors.push("window.title must not be empty".into());
    }
}

fn validate_assets(errors: &mut Vec<String>, config: &JseditConfig) {
    if let Some(dir) = &config.assets.dir {
        if !dir.is_absolute() {
            errors.push(format!(
                "assets.dir = {} must be an absolute path",
                dir.display()
            ));
        }
    }
}
