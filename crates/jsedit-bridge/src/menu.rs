//! Menu items and the custom-button injection performed on every render.

use crate::widget::EditorMode;

/// The three buttons the bridge adds to the widget's menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolbarButton {
    Open,
    Save,
    SaveAs,
}

impl ToolbarButton {
    pub const ALL: [ToolbarButton; 3] = [Self::Open, Self::Save, Self::SaveAs];

    pub fn title(self) -> &'static str {
        match self {
            Self::Open => "Open file",
            Self::Save => "Save",
            Self::SaveAs => "Save as",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonId {
    /// A button the widget ships with (e.g. "expand-all", "undo").
    Builtin(&'static str),
    Custom(ToolbarButton),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuButton {
    pub id: ButtonId,
    pub title: String,
    pub disabled: bool,
}

impl MenuButton {
    pub fn builtin(id: &'static str, title: impl Into<String>) -> Self {
        Self {
            id: ButtonId::Builtin(id),
            title: title.into(),
            disabled: false,
        }
    }

    pub fn custom(button: ToolbarButton, disabled: bool) -> Self {
        Self {
            id: ButtonId::Custom(button),
            title: button.title().to_string(),
            disabled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItem {
    Button(MenuButton),
    Separator,
    /// Flexible gap the widget places at the end of its menu.
    Space,
}

impl MenuItem {
    pub fn as_button(&self) -> Option<&MenuButton> {
        match self {
            Self::Button(b) => Some(b),
            _ => None,
        }
    }
}

/// Compute the menu for one render pass.
///
/// Pure: the same defaults, mode and save flag always give the same items.
/// Table mode keeps the widget's own menu. Otherwise the trailing item
/// becomes a separator (added if the list is empty) and open, save, save-as
/// are appended, with save disabled unless `save_enabled`.
pub fn compose_menu(
    mut items: Vec<MenuItem>,
    mode: EditorMode,
    save_enabled: bool,
) -> Vec<MenuItem> {
    if mode == EditorMode::Table {
        return items;
    }

    match items.last_mut() {
        Some(last) => *last = MenuItem::Separator,
        None => items.push(MenuItem::Separator),
    }

    items.extend(ToolbarButton::ALL.iter().map(|&button| {
        let disabled = button == ToolbarButton::Save && !save_enabled;
        MenuItem::Button(MenuButton::custom(button, disabled))
    }));
    items
}

/// Result of a render pass as seen by the bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMenu {
    pub items: Vec<MenuItem>,
    /// Set on the single render forced by a save lock.
    pub refreshed: bool,
}

impl RenderedMenu {
    pub fn button(&self, button: ToolbarButton) -> Option<&MenuButton> {
        self.items
            .iter()
            .filter_map(MenuItem::as_button)
            .find(|b| b.id == ButtonId::Custom(button))
    }

    /// Disabled state of the save button, `None` when it is not shown.
    pub fn save_disabled(&self) -> Option<bool> {
        self.button(ToolbarButton::Save).map(|b| b.disabled)
    }
}
