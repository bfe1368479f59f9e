//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Owns the window, the editor WebView and the host dispatcher,
//! and runs the initialization handshake on a background runtime.

mod core;
mod event_handler;
mod geometry;
mod init;
mod invoker;
mod polling;
mod prompt;
mod shutdown;
mod title;
mod types;

pub use core::EditorApp;
pub use types::UserEvent;
