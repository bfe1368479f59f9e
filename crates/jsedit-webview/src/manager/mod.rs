//! WebView lifecycle management.
//!
//! `WebViewManager` builds the editor `wry::WebView` with its handlers
//! attached. Handlers run on the UI thread inside wry callbacks; they only
//! push [`WebViewEvent`]s into a shared sink and wake the event loop, which
//! drains the sink on its next turn.

use std::sync::{Arc, Mutex};

use crate::content::ContentProvider;
use crate::events::WebViewEvent;

mod handle;
pub mod handlers;
mod lifecycle;
mod types;

pub use handle::WebViewHandle;
pub use types::WebViewConfig;

/// Called after an event has been queued.
pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// Shared event queue plus the waker handlers call after pushing.
#[derive(Clone)]
pub(crate) struct EventSink {
    events: Arc<Mutex<Vec<WebViewEvent>>>,
    waker: Option<Waker>,
}

impl EventSink {
    pub(crate) fn push(&self, event: WebViewEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
        if let Some(wake) = &self.waker {
            wake();
        }
    }
}

/// Creates the editor WebView and collects its events.
pub struct WebViewManager {
    sink: EventSink,
    /// Content provider for the `jsedit://` custom protocol.
    content_provider: Arc<ContentProvider>,
}

impl WebViewManager {
    pub fn new(content_provider: ContentProvider) -> Self {
        Self {
            sink: EventSink {
                events: Arc::new(Mutex::new(Vec::new())),
                waker: None,
            },
            content_provider: Arc::new(content_provider),
        }
    }

    /// Run `waker` every time an event is queued.
    pub fn with_waker(mut self, waker: impl Fn() + Send + Sync + 'static) -> Self {
        self.sink.waker = Some(Arc::new(waker));
        self
    }

    /// Drain all pending events.
    pub fn drain_events(&self) -> Vec<WebViewEvent> {
        self.sink
            .events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }
}
