//! Graceful shutdown: remember geometry, destroy the WebView, stop the runtime.

use std::time::Duration;

use super::core::EditorApp;
use super::geometry::{capture, WindowSnapshot};

// =============================================================================
// SHUTDOWN
// =============================================================================

impl EditorApp {
    /// Perform graceful shutdown of all subsystems.
    ///
    /// Order matters:
    /// 1. Write window geometry (needs the window)
    /// 2. Drop the dispatcher and the WebView (child of the window)
    /// 3. Shut down the tokio runtime (cancels a running handshake)
    /// 4. Drop the window
    pub(super) fn shutdown(&mut self) {
        tracing::info!("Initiating graceful shutdown");

        // 1. Remember where the window was
        self.save_geometry();

        // 2. Destroy the editor
        self.dispatcher = None;
        self.editor = None;
        self.webviews = None;
        self.page_loaded = false;

        // 3. Stop background work
        if let Some(rt) = self.tokio_runtime.take() {
            rt.shutdown_timeout(Duration::from_secs(2));
        }

        // 4. Release the window
        self.window = None;
        self.should_exit = true;

        tracing::info!("Graceful shutdown complete");
    }

    fn save_geometry(&mut self) {
        let (Some(window), Some(path)) = (&self.window, &self.geometry_path) else {
            return;
        };

        let snapshot = WindowSnapshot {
            position: window.outer_position().ok(),
            size: window.inner_size(),
            scale_factor: window.scale_factor(),
            maximized: window.is_maximized(),
            minimized: window.is_minimized().unwrap_or(false),
        };
        self.geometry = capture(&self.geometry, snapshot);

        match self.geometry.save(path) {
            Ok(()) => tracing::debug!(path = %path.display(), "Window geometry saved"),
            Err(e) => tracing::warn!("Failed to save window geometry: {e}"),
        }
    }
}
