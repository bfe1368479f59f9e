//! Events delivered to the winit loop through its proxy.

use jsedit_bridge::protocol::EntryCall;
use jsedit_common::TransportError;
use jsedit_host::HandshakeState;
use tokio::sync::oneshot;

/// Wake-ups and requests from other threads.
///
/// Everything touching the WebView has to happen on the UI thread, so
/// background work sends one of these instead.
#[derive(Debug)]
pub enum UserEvent {
    /// Run an entry point and report whether the page had registered it.
    Invoke {
        call: EntryCall,
        reply: oneshot::Sender<Result<(), TransportError>>,
    },
    /// The handshake task finished.
    HandshakeFinished(HandshakeState),
    /// A WebView handler queued an event.
    Wake,
}
