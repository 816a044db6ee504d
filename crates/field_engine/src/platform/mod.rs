//! Platform layer: the window and the input devices polled each frame
//!
//! The engine loop only talks to a [`Platform`], which is any type that is
//! both a [`WindowBackend`] and an [`InputDevice`]. [`HeadlessPlatform`] is
//! always available and drives scripted runs; `GlfwPlatform` opens a real
//! window when the `glfw` feature is enabled.

mod headless;
#[cfg(feature = "glfw")]
mod glfw;

use crate::input::InputDevice;

pub use headless::HeadlessPlatform;
#[cfg(feature = "glfw")]
pub use self::glfw::GlfwPlatform;

/// Window system notifications the engine reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    /// Client area changed size
    Resized {
        /// New width in pixels
        width: u32,
        /// New height in pixels
        height: u32,
    },
    /// The user asked for the window to close
    CloseRequested,
}

/// Backend-agnostic window operations used by the engine loop
pub trait WindowBackend {
    /// Whether the window has been closed
    fn is_closed(&self) -> bool;

    /// Close the window; the loop ends at the next check
    fn close(&mut self);

    /// Current client area size in pixels
    fn size(&self) -> (u32, u32);

    /// Window title
    fn title(&self) -> &str;

    /// Present the frame just produced
    fn update(&mut self);

    /// Process pending window system messages
    fn pump_messages(&mut self) -> Vec<WindowEvent>;
}

/// A window plus the input devices attached to it
pub trait Platform: WindowBackend + InputDevice {}

impl<T> Platform for T where T: WindowBackend + InputDevice {}
