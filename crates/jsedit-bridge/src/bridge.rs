//! Embedded-side owner of the editing widget.

use tracing::{debug, info};

use crate::channel::EventChannel;
use crate::menu::{compose_menu, RenderedMenu, ToolbarButton};
use crate::protocol::{EntryCall, Intent};
use crate::widget::{UserInput, Widget, WidgetEvent};

/// One-shot request to mark the next render pass as the lock refresh.
///
/// Kept apart from `save_enabled`: the flag persists, the trigger is
/// consumed by exactly one render.
#[derive(Debug, Default)]
struct RefreshTrigger {
    armed: bool,
}

impl RefreshTrigger {
    fn arm(&mut self) {
        self.armed = true;
    }

    fn fire(&mut self) -> bool {
        std::mem::take(&mut self.armed)
    }
}

/// Wraps the editing widget and exposes the three entry points.
///
/// The widget is built by `initialize` and never replaced. Every mutation
/// of the widget or of the save state goes through this type.
pub struct EditorBridge<W: Widget> {
    factory: Box<dyn FnMut() -> W>,
    widget: Option<W>,
    save_enabled: bool,
    refresh: RefreshTrigger,
    channel: EventChannel,
}

impl<W: Widget> EditorBridge<W> {
    pub fn new(factory: impl FnMut() -> W + 'static, channel: EventChannel) -> Self {
        Self {
            factory: Box::new(factory),
            widget: None,
            save_enabled: false,
            refresh: RefreshTrigger::default(),
            channel,
        }
    }

    /// Build the widget. Returns `false` without side effects if it already
    /// exists.
    pub fn initialize(&mut self) -> bool {
        if self.widget.is_some() {
            debug!("initialize: widget already constructed");
            return false;
        }

        let mut widget = (self.factory)();
        widget.request_render();
        self.widget = Some(widget);
        info!(channel = self.channel.name(), "editor widget constructed");
        true
    }

    pub fn is_initialized(&self) -> bool {
        self.widget.is_some()
    }

    /// Replace the visible content. No-op before `initialize`.
    pub fn set_content(&mut self, text: &str) {
        let Some(widget) = self.widget.as_mut() else {
            debug!("setContent before initialize, ignored");
            return;
        };
        widget.set_text(text);
    }

    /// Lock saving until the next content change and force one menu render.
    pub fn disable_can_save(&mut self) {
        let Some(widget) = self.widget.as_mut() else {
            debug!("disableCanSave before initialize, ignored");
            return;
        };
        self.save_enabled = false;
        self.refresh.arm();
        widget.request_render();
    }

    /// Run a host-issued entry-point call.
    pub fn invoke(&mut self, call: &EntryCall) {
        match call {
            EntryCall::Initialize => {
                self.initialize();
            }
            EntryCall::SetContent(text) => self.set_content(text),
            EntryCall::DisableCanSave => self.disable_can_save(),
        }
    }

    /// Deliver user input to the widget and handle the callback it raises.
    pub fn user_input(&mut self, input: UserInput) {
        let Some(widget) = self.widget.as_mut() else {
            return;
        };
        if let Some(event) = widget.input(input) {
            self.on_widget_event(event);
        }
    }

    fn on_widget_event(&mut self, event: WidgetEvent) {
        match event {
            WidgetEvent::Changed => {
                self.channel.activate(Intent::ContentChanged.encode());
                self.save_enabled = true;
            }
            WidgetEvent::Clicked(button) => self.on_button(button),
        }
    }

    fn on_button(&mut self, button: ToolbarButton) {
        let Some(widget) = self.widget.as_mut() else {
            return;
        };

        let intent = match button {
            ToolbarButton::Open => Intent::OpenRequested,
            ToolbarButton::Save => Intent::SaveRequested(widget.content().serialize()),
            ToolbarButton::SaveAs => Intent::SaveAsRequested(widget.content().serialize()),
        };
        debug!(tag = %intent.tag(), "toolbar button clicked");

        self.channel.activate(intent.encode());
        widget.focus();
    }

    /// The widget's menu hook. Returns `None` before `initialize`.
    pub fn render_menu(&mut self) -> Option<RenderedMenu> {
        let widget = self.widget.as_mut()?;
        let refreshed = self.refresh.fire();
        let items = compose_menu(widget.default_menu(), widget.mode(), self.save_enabled);
        widget.present_menu(items.clone());
        Some(RenderedMenu { items, refreshed })
    }

    /// Whether the widget asked for a render pass since the last call.
    pub fn take_render_request(&mut self) -> bool {
        self.widget
            .as_mut()
            .is_some_and(|widget| widget.take_render_request())
    }

    pub fn save_enabled(&self) -> bool {
        self.save_enabled
    }

    pub fn widget(&self) -> Option<&W> {
        self.widget.as_ref()
    }

    pub fn channel(&self) -> &EventChannel {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut EventChannel {
        &mut self.channel
    }
}
