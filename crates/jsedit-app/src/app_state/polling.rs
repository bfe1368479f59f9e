//! Draining WebView events and serving requests from the handshake task.

use tokio::sync::oneshot;

use jsedit_bridge::protocol::EntryCall;
use jsedit_bridge::EntryPoints;
use jsedit_common::TransportError;
use jsedit_host::{Dispatched, HandshakeState};
use jsedit_webview::{PageLoadState, WebViewEvent};

use super::core::EditorApp;

impl EditorApp {
    /// Handle everything the WebView queued since the last turn.
    pub(super) fn poll_webview_events(&mut self) {
        let events = match &self.webviews {
            Some(manager) => manager.drain_events(),
            None => return,
        };

        for event in events {
            match event {
                WebViewEvent::PageLoad { state, url } => {
                    tracing::debug!(?state, %url, "Page load");
                    self.page_loaded = state == PageLoadState::Finished;
                }
                WebViewEvent::ChannelActivated { payload } => self.dispatch_payload(&payload),
                WebViewEvent::NavigationBlocked { url } => {
                    tracing::warn!(%url, "Navigation blocked");
                }
            }
        }
    }

    fn dispatch_payload(&mut self, payload: &str) {
        let (Some(dispatcher), Some(editor)) = (self.dispatcher.as_mut(), self.editor.as_ref())
        else {
            return;
        };
        match dispatcher.dispatch(payload, editor as &dyn EntryPoints) {
            Dispatched::Malformed(e) => tracing::debug!(error = %e, "Ignored channel payload"),
            outcome => tracing::trace!(?outcome, "Channel payload handled"),
        }
    }

    /// Probe an entry point for the handshake task.
    ///
    /// Before the page has finished loading the call is refused outright,
    /// since scripts evaluated mid-navigation may never report back.
    pub(super) fn serve_invoke(
        &mut self,
        call: EntryCall,
        reply: oneshot::Sender<Result<(), TransportError>>,
    ) {
        self.poll_webview_events();

        match &self.editor {
            Some(editor) if self.page_loaded => editor.probe(&call, move |result| {
                let _ = reply.send(result);
            }),
            _ => {
                let _ = reply.send(Err(TransportError::NotRegistered(call.name())));
            }
        }
    }

    /// Record the handshake outcome and open the file named on the command
    /// line, if any.
    pub(super) fn finish_handshake(&mut self, state: HandshakeState) {
        let Some(dispatcher) = self.dispatcher.as_mut() else {
            return;
        };
        dispatcher.on_handshake(&state);
        if !state.succeeded {
            return;
        }

        let Some(editor) = &self.editor else {
            return;
        };
        if let Err(e) = editor.focus() {
            tracing::debug!(error = %e, "Could not focus editor");
        }
        if let Some(path) = self.pending_file.take() {
            if let Dispatched::Failed(e) = dispatcher.open_path(&path, editor) {
                tracing::warn!(path = %path.display(), error = %e, "Could not open file");
            }
        }
    }
}
