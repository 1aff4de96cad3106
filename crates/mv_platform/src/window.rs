use std::sync::Arc;
use winit::event_loop::ActiveEventLoop;
use winit::window::{CursorGrabMode, Window, WindowAttributes};

pub struct PlatformConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            title: "Mistvale Viewer".to_string(),
            width: 1200,
            height: 900,
        }
    }
}

pub fn create_window(event_loop: &ActiveEventLoop, config: &PlatformConfig) -> Arc<Window> {
    let attrs = WindowAttributes::default()
        .with_title(&config.title)
        .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height));

    let window = event_loop
        .create_window(attrs)
        .expect("Failed to create window");
    Arc::new(window)
}

/// Grab or release the cursor for mouse-look. Some platforms refuse
/// `Locked`, so fall back to `Confined` before giving up.
pub fn set_cursor_locked(window: &Window, locked: bool) {
    if locked {
        if let Err(err) = window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
        {
            log::warn!("Cursor grab unavailable: {err}");
        }
        window.set_cursor_visible(false);
    } else {
        if let Err(err) = window.set_cursor_grab(CursorGrabMode::None) {
            log::warn!("Cursor release failed: {err}");
        }
        window.set_cursor_visible(true);
    }
}
