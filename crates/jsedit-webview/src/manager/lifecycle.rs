use std::sync::Arc;

use tracing::debug;
use wry::raw_window_handle;
use wry::WebViewBuilder;

use crate::ipc::CHANNEL_INIT_SCRIPT;

use super::handle::WebViewHandle;
use super::handlers;
use super::types::WebViewConfig;
use super::WebViewManager;

impl WebViewManager {
    /// Create the editor WebView as a child of the given window.
    ///
    /// The `window` must implement `raw_window_handle::HasWindowHandle`.
    /// The WebView is positioned at `bounds` within the parent window.
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        &self,
        window: &W,
        bounds: wry::Rect,
        config: WebViewConfig,
    ) -> Result<WebViewHandle, wry::Error> {
        let mut builder = WebViewBuilder::new()
            .with_bounds(bounds)
            .with_devtools(config.devtools)
            .with_clipboard(config.clipboard)
            .with_initialization_script(CHANNEL_INIT_SCRIPT);

        if let Some(ua) = &config.user_agent {
            builder = builder.with_user_agent(ua);
        }

        // JS -> Rust: the channel signal
        builder = handlers::attach_ipc_handler(builder, self.sink.clone());
        builder = handlers::attach_page_load_handler(builder, self.sink.clone());
        builder = handlers::attach_navigation_handler(builder, self.sink.clone());
        builder = handlers::attach_custom_protocol(builder, Arc::clone(&self.content_provider));

        let webview = builder.with_url(&config.url).build_as_child(window)?;

        debug!(url = %config.url, "editor WebView created");

        Ok(WebViewHandle {
            webview,
            current_url: config.url,
        })
    }
}
