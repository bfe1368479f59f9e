//! Headless embedded context.
//!
//! Runs an [`EditorBridge`] on a dedicated thread with a single turn queue,
//! the way a webview runs its page script: every entry-point call, user
//! input and render pass is one turn, and turns never overlap. The entry
//! points only exist once the context has finished loading; calls that
//! arrive earlier fail with [`TransportError::NotRegistered`].

use std::thread::JoinHandle;

use async_trait::async_trait;
use jsedit_common::TransportError;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::bridge::EditorBridge;
use crate::channel::EventChannel;
use crate::entry::{EntryPoints, Invoke};
use crate::menu::RenderedMenu;
use crate::protocol::{EntryCall, CHANNEL_NAME};
use crate::widget::{Content, UserInput, Widget};

type Reply<T> = oneshot::Sender<T>;

enum Turn {
    Load,
    Call {
        call: EntryCall,
        reply: Option<Reply<Result<(), TransportError>>>,
    },
    Input(UserInput),
    Render(Reply<Option<RenderedMenu>>),
    Snapshot(Reply<Snapshot>),
    Shutdown,
}

/// Observable state of the embedded context at the end of a turn.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub loaded: bool,
    pub initialized: bool,
    pub content: Option<Content>,
    pub save_enabled: bool,
    pub focused: bool,
    /// Menu produced by the most recent render pass.
    pub menu: Option<RenderedMenu>,
}

/// Handle to an embedded context running on its own thread.
pub struct HeadlessContext {
    tx: mpsc::UnboundedSender<Turn>,
    thread: Option<JoinHandle<()>>,
}

impl HeadlessContext {
    /// Start the context. `listener` observes every channel activation and
    /// runs on the context's thread.
    pub fn spawn<W, F, L>(factory: F, listener: L) -> std::io::Result<Self>
    where
        W: Widget + 'static,
        F: FnMut() -> W + Send + 'static,
        L: FnMut(&str) + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let thread = std::thread::Builder::new()
            .name("jsedit-embedded".into())
            .spawn(move || run(factory, listener, rx))?;

        Ok(Self {
            tx,
            thread: Some(thread),
        })
    }

    /// Register the entry points, as a page does when its script has loaded.
    pub fn finish_loading(&self) {
        self.send(Turn::Load);
    }

    /// Deliver user input to the widget.
    pub fn input(&self, input: UserInput) {
        self.send(Turn::Input(input));
    }

    /// Run a render pass now.
    pub async fn render(&self) -> Result<Option<RenderedMenu>, TransportError> {
        let (reply, rx) = oneshot::channel();
        self.try_send(Turn::Render(reply))?;
        rx.await.map_err(|_| TransportError::Disconnected)
    }

    /// State after every turn queued so far has run.
    pub async fn snapshot(&self) -> Result<Snapshot, TransportError> {
        let (reply, rx) = oneshot::channel();
        self.try_send(Turn::Snapshot(reply))?;
        rx.await.map_err(|_| TransportError::Disconnected)
    }

    fn send(&self, turn: Turn) {
        if self.try_send(turn).is_err() {
            warn!("embedded context has stopped, turn dropped");
        }
    }

    fn try_send(&self, turn: Turn) -> Result<(), TransportError> {
        self.tx.send(turn).map_err(|_| TransportError::Disconnected)
    }
}

impl EntryPoints for HeadlessContext {
    fn post(&self, call: EntryCall) -> Result<(), TransportError> {
        self.try_send(Turn::Call { call, reply: None })
    }
}

#[async_trait]
impl Invoke for HeadlessContext {
    async fn invoke(&self, call: EntryCall) -> Result<(), TransportError> {
        let (reply, rx) = oneshot::channel();
        self.try_send(Turn::Call {
            call,
            reply: Some(reply),
        })?;
        rx.await.map_err(|_| TransportError::Disconnected)?
    }
}

impl Drop for HeadlessContext {
    fn drop(&mut self) {
        let _ = self.tx.send(Turn::Shutdown);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("embedded context thread panicked");
            }
        }
    }
}

struct Embedded<W: Widget> {
    bridge: EditorBridge<W>,
    loaded: bool,
    last_menu: Option<RenderedMenu>,
}

fn run<W, F, L>(factory: F, listener: L, mut rx: mpsc::UnboundedReceiver<Turn>)
where
    W: Widget + 'static,
    F: FnMut() -> W + Send + 'static,
    L: FnMut(&str) + Send + 'static,
{
    let mut channel = EventChannel::new(CHANNEL_NAME);
    channel.listen(listener);

    let mut embedded = Embedded {
        bridge: EditorBridge::new(factory, channel),
        loaded: false,
        last_menu: None,
    };

    while let Some(turn) = rx.blocking_recv() {
        if !embedded.turn(turn) {
            break;
        }
        embedded.flush_render();
    }
    debug!("embedded context stopped");
}

impl<W: Widget> Embedded<W> {
    /// Run one turn. Returns `false` on shutdown.
    fn turn(&mut self, turn: Turn) -> bool {
        match turn {
            Turn::Load => {
                if !self.loaded {
                    self.loaded = true;
                    info!("embedded context loaded, entry points registered");
                }
            }
            Turn::Call { call, reply } => {
                let result = self.call(&call);
                if let Some(reply) = reply {
                    let _ = reply.send(result);
                }
            }
            Turn::Input(input) => self.bridge.user_input(input),
            Turn::Render(reply) => {
                let menu = self.render();
                let _ = reply.send(menu);
            }
            Turn::Snapshot(reply) => {
                let _ = reply.send(self.snapshot());
            }
            Turn::Shutdown => return false,
        }
        true
    }

    fn call(&mut self, call: &EntryCall) -> Result<(), TransportError> {
        if !self.loaded {
            debug!(entry = call.name(), "call before load");
            return Err(TransportError::NotRegistered(call.name()));
        }
        self.bridge.invoke(call);
        Ok(())
    }

    fn render(&mut self) -> Option<RenderedMenu> {
        let menu = self.bridge.render_menu();
        if menu.is_some() {
            self.last_menu = menu.clone();
        }
        menu
    }

    /// Render passes requested by the widget run at the end of the turn.
    fn flush_render(&mut self) {
        if self.bridge.take_render_request() {
            self.render();
        }
    }

    fn snapshot(&self) -> Snapshot {
        let widget = self.bridge.widget();
        Snapshot {
            loaded: self.loaded,
            initialized: widget.is_some(),
            content: widget.map(Widget::content),
            save_enabled: self.bridge.save_enabled(),
            focused: widget.is_some_and(Widget::has_focus),
            menu: self.last_menu.clone(),
        }
    }
}
