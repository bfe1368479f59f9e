//! Host-side listener for the event channel.
//!
//! Every payload the embedded context signals is decoded into an
//! [`Intent`] and handled here: content changes mark the document dirty,
//! open requests load text and push it back, save requests persist the
//! serialized content and lock saving again. Persistence failures stop at
//! this boundary; they are logged and leave the embedded side untouched.

use std::path::Path;

use jsedit_bridge::protocol::EntryCall;
use jsedit_bridge::{EntryPoints, Intent};
use jsedit_common::{PersistenceError, ProtocolError, TransportError};
use tracing::{debug, error, info, warn};

use crate::document::{Document, TitleSink};
use crate::handshake::HandshakeState;
use crate::store::DocumentStore;

/// Whether calls into the embedded context can still succeed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkState {
    /// Handshake not finished yet.
    #[default]
    Pending,
    Ready,
    /// Handshake timed out. Nothing is sent for the rest of the session.
    Unreachable,
}

/// What a dispatched payload led to.
#[derive(Debug)]
pub enum Dispatched {
    Dirty,
    Opened,
    Saved,
    /// Persistence failed or was cancelled. Nothing was sent back.
    Failed(PersistenceError),
    /// The payload did not decode.
    Malformed(ProtocolError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SaveKind {
    Save,
    SaveAs,
}

pub struct HostDispatcher<S> {
    store: S,
    document: Document,
    title: Box<dyn TitleSink>,
    app_title: String,
    link: LinkState,
}

impl<S: DocumentStore> HostDispatcher<S> {
    pub fn new(store: S, title: Box<dyn TitleSink>, app_title: impl Into<String>) -> Self {
        Self {
            store,
            document: Document::new(),
            title,
            app_title: app_title.into(),
            link: LinkState::Pending,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn link(&self) -> LinkState {
        self.link
    }

    /// Current window title.
    pub fn title(&self) -> String {
        self.document.title(&self.app_title)
    }

    /// Record the handshake outcome.
    pub fn on_handshake(&mut self, state: &HandshakeState) {
        self.link = if state.succeeded {
            LinkState::Ready
        } else {
            error!(
                attempts = state.attempts,
                "editor page unreachable, host calls disabled for this session"
            );
            LinkState::Unreachable
        };
    }

    /// Decode and handle one channel payload.
    pub fn dispatch(&mut self, payload: &str, embedded: &dyn EntryPoints) -> Dispatched {
        let intent = match Intent::decode(payload) {
            Ok(intent) => intent,
            Err(e) => {
                warn!(error = %e, "dropping malformed channel payload");
                return Dispatched::Malformed(e);
            }
        };
        debug!(tag = %intent.tag(), "intent received");

        match intent {
            Intent::ContentChanged => self.on_content_changed(),
            Intent::OpenRequested => {
                let result = self.store.open();
                self.finish_open(result, embedded)
            }
            Intent::SaveRequested(text) => self.save(SaveKind::Save, &text, embedded),
            Intent::SaveAsRequested(text) => self.save(SaveKind::SaveAs, &text, embedded),
        }
    }

    /// Load `path` without prompting, e.g. a file named on the command line.
    pub fn open_path(&mut self, path: &Path, embedded: &dyn EntryPoints) -> Dispatched {
        let result = self.store.open_path(path);
        self.finish_open(result, embedded)
    }

    /// Replace the editor content.
    pub fn push_content(
        &self,
        text: impl Into<String>,
        embedded: &dyn EntryPoints,
    ) -> Result<(), TransportError> {
        self.post(embedded, EntryCall::SetContent(text.into()))
    }

    fn on_content_changed(&mut self) -> Dispatched {
        if self.document.mark_dirty() {
            let title = self.title();
            self.title.on_title_changed(&title);
        }
        self.title.on_dirty();
        Dispatched::Dirty
    }

    fn finish_open(
        &mut self,
        result: Result<String, PersistenceError>,
        embedded: &dyn EntryPoints,
    ) -> Dispatched {
        let text = match result {
            Ok(text) => text,
            Err(e) => return self.persistence_failed("open", e),
        };

        self.document.mark_clean(self.store.document_name());
        self.announce_title();

        if let Err(e) = self.push_content(text, embedded) {
            warn!(error = %e, "could not push opened content to editor");
        }
        Dispatched::Opened
    }

    fn save(&mut self, kind: SaveKind, text: &str, embedded: &dyn EntryPoints) -> Dispatched {
        let result = match kind {
            SaveKind::Save => self.store.save(text),
            SaveKind::SaveAs => self.store.save_as(text),
        };
        if let Err(e) = result {
            return self.persistence_failed(
                match kind {
                    SaveKind::Save => "save",
                    SaveKind::SaveAs => "save as",
                },
                e,
            );
        }

        self.document.mark_clean(self.store.document_name());
        self.announce_title();

        if let Err(e) = self.post(embedded, EntryCall::DisableCanSave) {
            warn!(error = %e, "could not lock saving after save");
        }
        Dispatched::Saved
    }

    fn persistence_failed(&self, operation: &str, e: PersistenceError) -> Dispatched {
        match &e {
            PersistenceError::Cancelled => info!(operation, "file operation cancelled"),
            _ => error!(operation, error = %e, "file operation failed"),
        }
        Dispatched::Failed(e)
    }

    fn announce_title(&mut self) {
        let title = self.title();
        self.title.on_title_changed(&title);
    }

    fn post(&self, embedded: &dyn EntryPoints, call: EntryCall) -> Result<(), TransportError> {
        if self.link == LinkState::Unreachable {
            return Err(TransportError::Unreachable);
        }
        embedded.post(call)
    }
}

#[cfg(test)]
mod tests;
