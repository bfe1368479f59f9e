use std::sync::{Arc, Mutex};

use jsedit_bridge::protocol::EntryCall;
use jsedit_bridge::EntryPoints;
use jsedit_common::TransportError;
use tracing::debug;
use wry::WebView;

use crate::ipc::{entry_script, parse_probe_result, probe_script};

/// Handle to the editor WebView. Entry-point calls go through here.
pub struct WebViewHandle {
    /// The underlying wry WebView.
    pub(super) webview: WebView,
    /// Current URL (best-effort tracking).
    pub(super) current_url: String,
}

impl WebViewHandle {
    /// Get the current URL.
    pub fn current_url(&self) -> &str {
        &self.current_url
    }

    /// Navigate to a URL.
    pub fn load_url(&mut self, url: &str) -> Result<(), wry::Error> {
        self.current_url = url.to_string();
        self.webview.load_url(url)
    }

    /// Execute JavaScript in the WebView context.
    pub fn evaluate_script(&self, js: &str) -> Result<(), wry::Error> {
        self.webview.evaluate_script(js)
    }

    /// Call an entry point only if the page has registered it, and report
    /// back through `done` whether it had.
    ///
    /// `done` runs exactly once: on the UI thread with the script result, or
    /// immediately if the script could not be dispatched.
    pub fn probe<F>(&self, call: &EntryCall, done: F)
    where
        F: FnOnce(Result<(), TransportError>) + Send + 'static,
    {
        let entry = call.name();
        let done = Arc::new(Mutex::new(Some(done)));
        let on_result = Arc::clone(&done);

        let dispatched = self
            .webview
            .evaluate_script_with_callback(&probe_script(call), move |raw| {
                if let Some(done) = take(&on_result) {
                    done(parse_probe_result(&raw, entry));
                }
            });

        if let Err(e) = dispatched {
            debug!(entry, error = %e, "probe script not dispatched");
            if let Some(done) = take(&done) {
                done(Err(TransportError::Script(e.to_string())));
            }
        }
    }

    /// Set the WebView bounds (position + size) within the parent window.
    pub fn set_bounds(&self, bounds: wry::Rect) -> Result<(), wry::Error> {
        self.webview.set_bounds(bounds)
    }

    /// Focus the WebView.
    pub fn focus(&self) -> Result<(), wry::Error> {
        self.webview.focus()
    }

    /// Open devtools (if enabled).
    pub fn open_devtools(&self) {
        self.webview.open_devtools();
    }
}

impl EntryPoints for WebViewHandle {
    fn post(&self, call: EntryCall) -> Result<(), TransportError> {
        debug!(entry = call.name(), "posting entry-point call");
        self.webview
            .evaluate_script(&entry_script(&call))
            .map_err(|e| TransportError::Script(e.to_string()))
    }
}

fn take<F>(slot: &Mutex<Option<F>>) -> Option<F> {
    slot.lock().ok().and_then(|mut slot| slot.take())
}
