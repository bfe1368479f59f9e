//! Entry-point calls from the handshake task, routed through the UI thread.

use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;
use winit::event_loop::EventLoopProxy;

use jsedit_bridge::protocol::EntryCall;
use jsedit_bridge::Invoke;
use jsedit_common::TransportError;
use jsedit_host::HandshakeState;

use super::types::UserEvent;

/// Sends [`UserEvent::Invoke`] to the event loop and waits for the probe
/// result.
pub(super) struct ProxyInvoker {
    proxy: Mutex<EventLoopProxy<UserEvent>>,
}

impl ProxyInvoker {
    pub(super) fn new(proxy: EventLoopProxy<UserEvent>) -> Self {
        Self {
            proxy: Mutex::new(proxy),
        }
    }

    /// Hand the handshake outcome back to the event loop.
    pub(super) fn finish(&self, state: HandshakeState) {
        if let Err(e) = self.send(UserEvent::HandshakeFinished(state)) {
            tracing::warn!(error = %e, "Handshake finished after the event loop closed");
        }
    }

    fn send(&self, event: UserEvent) -> Result<(), TransportError> {
        let proxy = self.proxy.lock().map_err(|_| TransportError::Disconnected)?;
        proxy
            .send_event(event)
            .map_err(|_| TransportError::Disconnected)
    }
}

#[async_trait]
impl Invoke for ProxyInvoker {
    async fn invoke(&self, call: EntryCall) -> Result<(), TransportError> {
        let (reply, answer) = oneshot::channel();
        self.send(UserEvent::Invoke { call, reply })?;
        answer.await.map_err(|_| TransportError::Disconnected)?
    }
}
