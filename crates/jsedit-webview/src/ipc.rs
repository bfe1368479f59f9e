//! Scripts crossing the WebView boundary.
//!
//! - **JS -> Rust**: the page signals by firing `change` on the
//!   `#jse-interface` element. [`CHANNEL_INIT_SCRIPT`] subscribes once and
//!   forwards the element's value verbatim through `window.ipc.postMessage`.
//! - **Rust -> JS**: entry points are plain globals on `window`, called with
//!   `evaluate_script`. A probe variant reports back whether the entry point
//!   existed, which is what the handshake needs.

use jsedit_bridge::protocol::{self, EntryCall};
use jsedit_common::TransportError;

/// Injected into the page before any page script runs.
pub const CHANNEL_INIT_SCRIPT: &str = r#"
(function() {
    if (window.__jseChannelAttached) return;
    window.__jseChannelAttached = true;

    function attach() {
        var el = document.getElementById("jse-interface");
        if (!el) return;
        el.addEventListener("change", function() {
            window.ipc.postMessage(String(el.value));
        });
    }

    if (document.readyState === "loading") {
        document.addEventListener("DOMContentLoaded", attach);
    } else {
        attach();
    }
})();
"#;

/// JS expression invoking an entry point.
pub fn entry_script(call: &EntryCall) -> String {
    let argument = call.argument().map(js_string).unwrap_or_default();
    format!("window.{}({argument});", call.name())
}

/// JS expression that invokes the entry point if it is registered and
/// evaluates to whether it was.
pub fn probe_script(call: &EntryCall) -> String {
    format!(
        "(function() {{ if (typeof window.{name} !== \"function\") return false; {call} return true; }})()",
        name = call.name(),
        call = entry_script(call),
    )
}

/// Interpret the JSON-encoded result of a [`probe_script`].
pub fn parse_probe_result(raw: &str, entry: &'static str) -> Result<(), TransportError> {
    match raw.trim() {
        "true" => Ok(()),
        "false" => Err(TransportError::NotRegistered(entry)),
        other => Err(TransportError::Script(format!(
            "unexpected probe result for {entry}: {other}"
        ))),
    }
}

/// Whether an IPC body looks like a channel payload.
pub fn is_channel_payload(body: &str) -> bool {
    body.chars().next().is_some_and(protocol::is_known_tag)
}

fn js_string(text: &str) -> String {
    // a JSON string literal is a valid JS string literal
    serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string())
}
