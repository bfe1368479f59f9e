//! Host side of the editor bridge.
//!
//! - [`handshake`]: bounded retry of `initialize` until the embedded
//!   context answers
//! - [`dispatcher`]: decodes channel payloads and routes them to the
//!   document store and the window title
//! - [`document`]: file name and dirty-flag bookkeeping
//! - [`store`]: file persistence behind a path prompt

pub mod dispatcher;
pub mod document;
pub mod handshake;
pub mod store;

pub use dispatcher::{Dispatched, HostDispatcher, LinkState};
pub use document::{Document, TitleSink, UNTITLED};
pub use handshake::{try_invoke, Handshake, HandshakeState};
pub use store::{DocumentStore, FileDocumentStore, PathPrompt};
