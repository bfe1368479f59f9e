//! Bridge between the host shell and the embedded JSON editing surface.
//!
//! The two sides share no memory. The host reaches the embedded context only
//! through three named entry points, and the embedded context reaches the
//! host only through a single-slot signal ([`EventChannel`]) whose payload is
//! a one-character tag followed by optional data.
//!
//! - [`protocol`]: intent and entry-point encoding
//! - [`channel`]: the single-slot signal
//! - [`format`]: save-time pretty printing
//! - [`widget`] / [`menu`]: the seam to the third-party editing widget
//! - [`bridge`]: the embedded-side [`EditorBridge`]
//! - [`runtime`]: a headless embedded context driving the bridge on its own thread

pub mod bridge;
pub mod channel;
pub mod entry;
pub mod format;
pub mod json_widget;
pub mod menu;
pub mod protocol;
pub mod runtime;
pub mod widget;

pub use bridge::EditorBridge;
pub use channel::EventChannel;
pub use entry::{EntryPoints, Invoke};
pub use json_widget::JsonWidget;
pub use menu::{compose_menu, ButtonId, MenuButton, MenuItem, RenderedMenu, ToolbarButton};
pub use protocol::{EntryCall, Intent};
pub use runtime::{HeadlessContext, Snapshot};
pub use widget::{Content, EditorMode, UserInput, Widget, WidgetEvent};
