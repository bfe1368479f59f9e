//! Conversions between remembered geometry, winit and wry coordinates.

use winit::dpi::{LogicalPosition, LogicalSize, PhysicalPosition, PhysicalSize};
use winit::window::WindowAttributes;

use jsedit_config::{WindowGeometry, WindowState};

// =============================================================================
// RESTORE
// =============================================================================

/// Window attributes for the remembered geometry.
///
/// A window closed while minimized comes back in its normal state.
pub(super) fn window_attributes(geometry: &WindowGeometry, title: &str) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(title)
        .with_inner_size(LogicalSize::new(geometry.width, geometry.height))
        .with_position(LogicalPosition::new(geometry.left, geometry.top))
        .with_maximized(geometry.state == WindowState::Maximized)
}

// =============================================================================
// CAPTURE
// =============================================================================

/// What winit reports about the window when it closes.
#[derive(Debug, Clone, Copy)]
pub(super) struct WindowSnapshot {
    pub position: Option<PhysicalPosition<i32>>,
    pub size: PhysicalSize<u32>,
    pub scale_factor: f64,
    pub maximized: bool,
    pub minimized: bool,
}

/// Geometry to remember for the next start.
///
/// Bounds are only taken from a normal window; a maximized or minimized one
/// keeps the bounds it will restore to.
pub(super) fn capture(previous: &WindowGeometry, snapshot: WindowSnapshot) -> WindowGeometry {
    let state = if snapshot.maximized {
        WindowState::Maximized
    } else if snapshot.minimized {
        WindowState::Minimized
    } else {
        WindowState::Normal
    };

    if state != WindowState::Normal {
        return WindowGeometry { state, ..*previous };
    }

    let size: LogicalSize<u32> = snapshot.size.to_logical(snapshot.scale_factor);
    let (left, top) = match snapshot.position {
        Some(position) => {
            let position: LogicalPosition<i32> = position.to_logical(snapshot.scale_factor);
            (position.x, position.y)
        }
        None => (previous.left, previous.top),
    };

    WindowGeometry {
        top,
        left,
        width: size.width,
        height: size.height,
        state,
    }
    .sanitized()
}

// =============================================================================
// WEBVIEW BOUNDS
// =============================================================================

/// The editor fills the whole client area.
pub(super) fn editor_bounds(size: PhysicalSize<u32>) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::Position::Physical(wry::dpi::PhysicalPosition::new(0, 0)),
        size: wry::dpi::Size::Physical(wry::dpi::PhysicalSize::new(size.width, size.height)),
    }
}

// =============================================================================
// TESTS
// =============================================================================
