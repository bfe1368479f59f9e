//! Seam to the third-party editing widget.
//!
//! The bridge never looks inside the widget's data model; it only needs to
//! replace the content, read it back, move focus, and take part in the
//! widget's menu render pass.

use serde_json::Value;
use tracing::debug;

use crate::format::to_tab_indented;
use crate::menu::{MenuItem, ToolbarButton};

/// The widget's current value: parsed JSON, or raw text that did not parse.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Json(Value),
    Text(String),
}

impl Content {
    /// Interpret `text` the way the widget does: JSON when it parses,
    /// raw text otherwise.
    pub fn parse(text: &str) -> Self {
        match serde_json::from_str(text) {
            Ok(value) => Self::Json(value),
            Err(e) => {
                debug!(error = %e, "content is not valid JSON, keeping raw text");
                Self::Text(text.to_string())
            }
        }
    }

    /// Text sent to the host on save: tab-indented JSON for parsed content,
    /// the raw buffer verbatim otherwise.
    pub fn serialize(&self) -> String {
        match self {
            Self::Json(value) => to_tab_indented(value),
            Self::Text(text) => text.clone(),
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json(_))
    }
}

/// View mode of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Tree,
    Text,
    Table,
}

/// Raw user input delivered to the widget by its host environment.
#[derive(Debug, Clone, PartialEq)]
pub enum UserInput {
    /// Replace the buffer with typed text.
    Type(String),
    /// Click one of the custom toolbar buttons.
    Click(ToolbarButton),
    /// Switch view mode.
    SwitchMode(EditorMode),
}

/// Callbacks the widget raises in response to user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetEvent {
    Changed,
    Clicked(ToolbarButton),
}

pub trait Widget {
    /// Replace the content programmatically. Does not raise `Changed`.
    fn set_text(&mut self, text: &str);

    fn content(&self) -> Content;

    fn focus(&mut self);

    fn has_focus(&self) -> bool;

    /// Feed user input to the widget; returns the callback it raises, if any.
    fn input(&mut self, input: UserInput) -> Option<WidgetEvent>;

    fn mode(&self) -> EditorMode;

    /// Menu items the widget would show on its own.
    fn default_menu(&self) -> Vec<MenuItem>;

    /// Show the items produced by the menu hook.
    fn present_menu(&mut self, items: Vec<MenuItem>);

    /// Ask for a render pass at the end of the current turn.
    fn request_render(&mut self);

    /// Consume a pending render request.
    fn take_render_request(&mut self) -> bool;
}
