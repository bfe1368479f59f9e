//! Host-side view of the embedded context's entry points.

use async_trait::async_trait;
use jsedit_common::TransportError;

use crate::protocol::EntryCall;

/// Fire-and-forget dispatch into the embedded context.
///
/// `Ok` only means the call left the host; whether the entry point ran is
/// not observable.
pub trait EntryPoints {
    fn post(&self, call: EntryCall) -> Result<(), TransportError>;
}

impl<T: EntryPoints + ?Sized> EntryPoints for &T {
    fn post(&self, call: EntryCall) -> Result<(), TransportError> {
        (**self).post(call)
    }
}

/// Dispatch that waits for the embedded context to accept or reject the
/// call. Used by the handshake to find out whether the entry points are
/// registered yet.
#[async_trait]
pub trait Invoke: Send + Sync {
    async fn invoke(&self, call: EntryCall) -> Result<(), TransportError>;
}
