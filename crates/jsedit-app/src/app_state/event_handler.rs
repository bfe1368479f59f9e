//! `ApplicationHandler` implementation for the winit event loop.

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::WindowId;

use super::core::EditorApp;
use super::geometry::editor_bounds;
use super::types::UserEvent;

impl ApplicationHandler<UserEvent> for EditorApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.initialize_window(event_loop) {
            tracing::error!("{e}");
            event_loop.exit();
            return;
        }

        self.start_handshake();
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: UserEvent) {
        match event {
            UserEvent::Invoke { call, reply } => self.serve_invoke(call, reply),
            UserEvent::HandshakeFinished(state) => self.finish_handshake(state),
            UserEvent::Wake => self.poll_webview_events(),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Window close requested");
                self.shutdown();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    if let Some(editor) = &self.editor {
                        if let Err(e) = editor.set_bounds(editor_bounds(size)) {
                            tracing::warn!(error = %e, "Failed to resize editor");
                        }
                    }
                }
            }

            WindowEvent::Focused(true) => {
                if let Some(editor) = &self.editor {
                    let _ = editor.focus();
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.should_exit {
            event_loop.exit();
            return;
        }
        self.poll_webview_events();
        event_loop.set_control_flow(ControlFlow::Wait);
    }
}
