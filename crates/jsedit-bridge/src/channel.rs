//! Single-slot signal from the embedded context to the host.

use tracing::{debug, trace};

type Listener = Box<dyn FnMut(&str)>;

/// A named signal carrying one payload per activation.
///
/// `activate` overwrites the slot and then notifies the listener
/// synchronously. There is no queue: a payload that is overwritten before
/// anyone reads the slot is gone.
pub struct EventChannel {
    name: &'static str,
    slot: Option<String>,
    listener: Option<Listener>,
}

impl EventChannel {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            slot: None,
            listener: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Attach the listener. Returns `false` (and keeps the existing
    /// listener) if one is already attached.
    pub fn listen(&mut self, listener: impl FnMut(&str) + 'static) -> bool {
        if self.listener.is_some() {
            debug!(channel = self.name, "listener already attached");
            return false;
        }
        self.listener = Some(Box::new(listener));
        true
    }

    pub fn has_listener(&self) -> bool {
        self.listener.is_some()
    }

    /// Set the slot to `payload`, then fire the signal.
    pub fn activate(&mut self, payload: impl Into<String>) {
        self.slot = Some(payload.into());
        trace!(channel = self.name, "activate");

        if let (Some(listener), Some(value)) = (self.listener.as_mut(), self.slot.as_deref()) {
            listener(value);
        }
    }

    /// The most recently activated payload.
    pub fn value(&self) -> Option<&str> {
        self.slot.as_deref()
    }
}

impl std::fmt::Debug for EventChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventChannel")
            .field("name", &self.name)
            .field("slot", &self.slot)
            .field("listening", &self.listener.is_some())
            .finish()
    }
}
