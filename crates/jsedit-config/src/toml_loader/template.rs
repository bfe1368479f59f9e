//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# jsedit configuration
# Only override what you want to change -- missing fields use defaults.

[handshake]
# How long to wait for the editor page to come up, in milliseconds.
# timeout_ms = 5000          # 1-120000
# Pause between initialize attempts, in milliseconds.
# retry_interval_ms = 50     # 1-timeout_ms

[window]
# title = "JSON Editor"
# devtools = false

[assets]
# Serve the editor page from this directory instead of the bundled copy.
# Files missing from the directory fall back to the bundled ones.
# dir = "/absolute/path/to/assets"
"##
    .to_string()
}
