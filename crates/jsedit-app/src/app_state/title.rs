//! Window title management: reflects the document name and dirty state.

use std::sync::Arc;

use winit::window::Window;

use jsedit_host::TitleSink;

/// Applies dispatcher title updates to the main window.
pub(super) struct WindowTitle {
    window: Arc<Window>,
}

impl WindowTitle {
    pub(super) fn new(window: Arc<Window>) -> Self {
        Self { window }
    }
}

impl TitleSink for WindowTitle {
    fn on_title_changed(&mut self, title: &str) {
        self.window.set_title(title);
    }
}
