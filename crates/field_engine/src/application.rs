//! Listener traits the engine loop calls back into
//!
//! Applications never subclass engine types. They implement these traits
//! and hand themselves to [`Engine::main_loop`](crate::Engine::main_loop),
//! receiving `&mut Engine` on every callback.

use crate::engine::{Engine, EngineError};

/// Timing information for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameEvent {
    /// Seconds since the previous frame
    pub time_since_last_frame: f32,
    /// Seconds since the loop started (or event times were last cleared)
    pub time_since_last_event: f32,
    /// 1-based frame number
    pub frame: u64,
}

/// Per-frame callback
pub trait FrameListener {
    /// Called once per frame, after the frame has been queued for rendering
    ///
    /// Return `Ok(false)` to end the main loop.
    fn frame_rendering_queued(&mut self, engine: &mut Engine, event: &FrameEvent) -> Result<bool, EngineError>;
}

/// Window notifications
///
/// Both methods default to doing nothing.
pub trait WindowEventListener {
    /// The window's client area changed size
    ///
    /// Viewports have already been resized when this is called.
    fn window_resized(&mut self, _engine: &mut Engine, _width: u32, _height: u32) {}

    /// The window was closed; the main loop ends after this returns
    fn window_closed(&mut self, _engine: &mut Engine) {}
}
