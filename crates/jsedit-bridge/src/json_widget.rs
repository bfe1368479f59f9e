//! In-memory JSON editing widget used by the headless embedded context.
//!
//! Mirrors the observable behavior the bridge relies on in the real widget:
//! a text buffer that is parsed when it is valid JSON, view modes with their
//! own default menus, focus, and render requests. Disabled toolbar buttons
//! swallow clicks.

use crate::menu::{ButtonId, MenuButton, MenuItem};
use crate::widget::{Content, EditorMode, UserInput, Widget, WidgetEvent};

#[derive(Debug, Default)]
pub struct JsonWidget {
    content: Option<Content>,
    mode: EditorMode,
    focused: bool,
    render_requested: bool,
    presented: Vec<MenuItem>,
}

impl JsonWidget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: EditorMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Items shown by the last render pass.
    pub fn presented_menu(&self) -> &[MenuItem] {
        &self.presented
    }

    fn replace(&mut self, text: &str) {
        self.content = Some(Content::parse(text));
    }

    fn clickable(&self, id: &ButtonId) -> bool {
        self.presented
            .iter()
            .filter_map(MenuItem::as_button)
            .any(|b| &b.id == id && !b.disabled)
    }
}

impl Widget for JsonWidget {
    fn set_text(&mut self, text: &str) {
        self.replace(text);
    }

    fn content(&self) -> Content {
        self.content
            .clone()
            .unwrap_or_else(|| Content::Text(String::new()))
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn has_focus(&self) -> bool {
        self.focused
    }

    fn input(&mut self, input: UserInput) -> Option<WidgetEvent> {
        match input {
            UserInput::Type(text) => {
                self.focused = true;
                self.replace(&text);
                // undo/redo availability changes, so the menu re-renders
                self.render_requested = true;
                Some(WidgetEvent::Changed)
            }
            UserInput::Click(button) => {
                self.focused = false;
                self.clickable(&ButtonId::Custom(button))
                    .then_some(WidgetEvent::Clicked(button))
            }
            UserInput::SwitchMode(mode) => {
                if mode != self.mode {
                    self.mode = mode;
                    self.render_requested = true;
                }
                None
            }
        }
    }

    fn mode(&self) -> EditorMode {
        self.mode
    }

    fn default_menu(&self) -> Vec<MenuItem> {
        let button = |id, title| MenuItem::Button(MenuButton::builtin(id, title));
        let mut items = vec![
            button("mode-text", "Text"),
            button("mode-tree", "Tree"),
            button("mode-table", "Table"),
            MenuItem::Separator,
        ];
        match self.mode {
            EditorMode::Tree => items.extend([
                button("expand-all", "Expand all"),
                button("collapse-all", "Collapse all"),
                MenuItem::Separator,
            ]),
            EditorMode::Text => items.extend([
                button("format", "Format"),
                button("compact", "Compact"),
                MenuItem::Separator,
            ]),
            EditorMode::Table => {}
        }
        items.extend([
            button("sort", "Sort"),
            button("transform", "Transform"),
            MenuItem::Separator,
            button("search", "Search"),
            MenuItem::Separator,
            button("undo", "Undo"),
            button("redo", "Redo"),
            MenuItem::Space,
        ]);
        items
    }

    fn present_menu(&mut self, items: Vec<MenuItem>) {
        self.presented = items;
    }

    fn request_render(&mut self) {
        self.render_requested = true;
    }

    fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.render_requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{compose_menu, ToolbarButton};

    #[test]
    fn fresh_widget_holds_empty_text() {
        let widget = JsonWidget::new();
        assert_eq!(widget.content(), Content::Text(String::new()));
        assert!(!widget.has_focus());
    }

    #[test]
    fn typing_raises_changed_and_requests_render() {
        let mut widget = JsonWidget::new();
        let event = widget.input(UserInput::Type("hello".into()));
        assert_eq!(event, Some(WidgetEvent::Changed));
        assert!(widget.take_render_request());
        assert!(!widget.take_render_request());
    }

    #[test]
    fn set_text_is_silent() {
        let mut widget = JsonWidget::new();
        widget.set_text(r#"{"a":1}"#);
        assert!(!widget.take_render_request());
        assert!(widget.content().is_json());
    }

    #[test]
    fn click_requires_presented_enabled_button() {
        let mut widget = JsonWidget::new();
        assert_eq!(widget.input(UserInput::Click(ToolbarButton::Open)), None);

        widget.present_menu(compose_menu(widget.default_menu(), widget.mode(), false));
        assert_eq!(
            widget.input(UserInput::Click(ToolbarButton::Open)),
            Some(WidgetEvent::Clicked(ToolbarButton::Open))
        );
        assert_eq!(widget.input(UserInput::Click(ToolbarButton::Save)), None);

        widget.present_menu(compose_menu(widget.default_menu(), widget.mode(), true));
        assert_eq!(
            widget.input(UserInput::Click(ToolbarButton::Save)),
            Some(WidgetEvent::Clicked(ToolbarButton::Save))
        );
    }

    #[test]
    fn default_menu_ends_with_space() {
        for mode in [EditorMode::Tree, EditorMode::Text, EditorMode::Table] {
            let menu = JsonWidget::with_mode(mode).default_menu();
            assert_eq!(menu.last(), Some(&MenuItem::Space));
        }
    }

    #[test]
    fn switching_mode_requests_render_once() {
        let mut widget = JsonWidget::new();
        assert_eq!(widget.input(UserInput::SwitchMode(EditorMode::Text)), None);
        assert!(widget.take_render_request());

        widget.input(UserInput::SwitchMode(EditorMode::Text));
        assert!(!widget.take_render_request());
    }
}
