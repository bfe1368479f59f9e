//! EditorApp struct definition and constructor.

use std::path::PathBuf;
use std::sync::Arc;

use winit::event_loop::EventLoopProxy;
use winit::window::Window;

use jsedit_config::{default_geometry_path, JseditConfig, WindowGeometry};
use jsedit_host::{FileDocumentStore, HostDispatcher};
use jsedit_webview::{WebViewHandle, WebViewManager};

use super::prompt::DialogPrompt;
use super::types::UserEvent;

pub(super) type Dispatcher = HostDispatcher<FileDocumentStore<DialogPrompt>>;

/// Top-level application state.
pub struct EditorApp {
    pub(super) config: JseditConfig,
    pub(super) proxy: EventLoopProxy<UserEvent>,

    // File named on the command line, opened once the handshake succeeds
    pub(super) pending_file: Option<PathBuf>,

    // Window geometry, restored on start and written back on close
    pub(super) geometry_path: Option<PathBuf>,
    pub(super) geometry: WindowGeometry,

    // Windowing
    pub(super) window: Option<Arc<Window>>,

    // Editor WebView
    pub(super) webviews: Option<WebViewManager>,
    pub(super) editor: Option<WebViewHandle>,
    pub(super) page_loaded: bool,

    pub(super) dispatcher: Option<Dispatcher>,
    pub(super) tokio_runtime: Option<tokio::runtime::Runtime>,

    // Whether the app should exit
    pub(super) should_exit: bool,
}

impl EditorApp {
    pub fn new(
        config: JseditConfig,
        file: Option<PathBuf>,
        proxy: EventLoopProxy<UserEvent>,
    ) -> Self {
        let geometry_path = match default_geometry_path() {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!("Window geometry will not be remembered: {e}");
                None
            }
        };
        let geometry = geometry_path
            .as_deref()
            .map(WindowGeometry::read_or_create)
            .unwrap_or_default()
            .sanitized();

        Self {
            config,
            proxy,
            pending_file: file,
            geometry_path,
            geometry,
            window: None,
            webviews: None,
            editor: None,
            page_loaded: false,
            dispatcher: None,
            tokio_runtime: None,
            should_exit: false,
        }
    }
}
