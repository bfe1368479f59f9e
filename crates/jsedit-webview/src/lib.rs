//! WebView adapter for the embedded editor page.
//!
//! Wraps the `wry` crate to provide:
//! - Creation of the single editor WebView
//! - The channel signal (JS -> Rust) over wry IPC
//! - Entry-point calls (Rust -> JS) as evaluated scripts
//! - A custom protocol serving the bundled page
//! - Navigation allowlisting

pub mod content;
pub mod events;
pub mod ipc;
pub mod manager;

pub use content::{start_url, ContentProvider};
pub use events::{PageLoadState, WebViewEvent};
pub use manager::{WebViewConfig, WebViewHandle, WebViewManager};
