//! Window creation, editor WebView setup, and the handshake task.

use std::sync::{Arc, Mutex};

use winit::event_loop::ActiveEventLoop;

use jsedit_common::{JseditError, Result};
use jsedit_host::{FileDocumentStore, Handshake, HandshakeState, HostDispatcher};
use jsedit_webview::{ContentProvider, WebViewConfig, WebViewManager};

use super::core::EditorApp;
use super::geometry::{editor_bounds, window_attributes};
use super::invoker::ProxyInvoker;
use super::prompt::DialogPrompt;
use super::title::WindowTitle;
use super::types::UserEvent;

// =============================================================================
// INITIALIZATION
// =============================================================================

impl EditorApp {
    /// Create the window, the dispatcher and the editor WebView.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = window_attributes(&self.geometry, &self.config.window.title);
        let window = event_loop
            .create_window(attrs)
            .map(Arc::new)
            .map_err(|e| JseditError::Other(format!("failed to create window: {e}")))?;

        let dispatcher = HostDispatcher::new(
            FileDocumentStore::new(DialogPrompt),
            Box::new(WindowTitle::new(Arc::clone(&window))),
            self.config.window.title.clone(),
        );
        window.set_title(&dispatcher.title());

        let manager = self.create_manager();
        let config = WebViewConfig {
            devtools: self.config.window.devtools,
            ..WebViewConfig::default()
        };
        let handle = manager
            .create(window.as_ref(), editor_bounds(window.inner_size()), config)
            .map_err(|e| JseditError::WebView(e.to_string()))?;
        tracing::info!(url = handle.current_url(), "Editor WebView created");

        self.dispatcher = Some(dispatcher);
        self.editor = Some(handle);
        self.webviews = Some(manager);
        self.window = Some(window);
        Ok(())
    }

    /// Set up the WebView manager with the content provider for `jsedit://`.
    fn create_manager(&self) -> WebViewManager {
        let mut content_provider = ContentProvider::bundled();
        if let Some(dir) = &self.config.assets.dir {
            if !dir.is_dir() {
                tracing::warn!(
                    path = %dir.display(),
                    "Assets directory not found, serving bundled page only"
                );
            }
            content_provider = content_provider.with_dir(dir);
        }

        let proxy = Mutex::new(self.proxy.clone());
        WebViewManager::new(content_provider).with_waker(move || {
            if let Ok(proxy) = proxy.lock() {
                let _ = proxy.send_event(UserEvent::Wake);
            }
        })
    }

    /// Start calling `initialize` in the background. The outcome arrives as
    /// [`UserEvent::HandshakeFinished`].
    pub(super) fn start_handshake(&mut self) {
        if self.tokio_runtime.is_none() {
            match tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .enable_all()
                .build()
            {
                Ok(rt) => self.tokio_runtime = Some(rt),
                Err(e) => {
                    tracing::error!("Failed to create tokio runtime: {e}");
                    self.finish_handshake(HandshakeState::default());
                    return;
                }
            }
        }
        let Some(rt) = &self.tokio_runtime else {
            return;
        };

        let handshake = Handshake::from_config(&self.config.handshake);
        let invoker = ProxyInvoker::new(self.proxy.clone());
        rt.spawn(async move {
            let state = handshake.run(&invoker).await;
            invoker.finish(state);
        });
        tracing::info!(
            timeout_ms = self.config.handshake.timeout_ms,
            "Handshake started"
        );
    }
}
