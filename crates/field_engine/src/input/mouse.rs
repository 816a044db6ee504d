//! Mouse state
//!
//! Cursor position in window pixels, the window extents the cursor is
//! clamped to, and which buttons are held.

use super::MouseButton;

/// Mouse state for one captured frame
#[derive(Debug, Clone, PartialEq)]
pub struct MouseState {
    /// Screen-space X position (pixels from left)
    pub screen_x: f64,
    /// Screen-space Y position (pixels from top)
    pub screen_y: f64,
    /// Window width in pixels
    pub window_width: u32,
    /// Window height in pixels
    pub window_height: u32,
    left: bool,
    right: bool,
    middle: bool,
}

impl MouseState {
    /// Create a mouse state for a window of the given size, cursor at the top-left
    pub fn new(window_width: u32, window_height: u32) -> Self {
        Self {
            screen_x: 0.0,
            screen_y: 0.0,
            window_width,
            window_height,
            left: false,
            right: false,
            middle: false,
        }
    }

    /// Convert screen coordinates to Normalized Device Coordinates (NDC)
    ///
    /// NDC range: [-1, 1] where:
    /// - X: -1 = left, +1 = right
    /// - Y: -1 = top, +1 = bottom
    ///
    /// A zero-sized window maps everything to the centre.
    pub fn screen_to_ndc(&self) -> (f32, f32) {
        if self.window_width == 0 || self.window_height == 0 {
            return (0.0, 0.0);
        }
        let ndc_x = (self.screen_x / f64::from(self.window_width)) as f32 * 2.0 - 1.0;
        let ndc_y = (self.screen_y / f64::from(self.window_height)) as f32 * 2.0 - 1.0;
        (ndc_x, ndc_y)
    }

    /// Move the cursor, clamped to the window extents
    pub fn update_position(&mut self, x: f64, y: f64) {
        self.screen_x = x.clamp(0.0, f64::from(self.window_width));
        self.screen_y = y.clamp(0.0, f64::from(self.window_height));
    }

    /// Update window size (for clamping and NDC conversion)
    ///
    /// Call whenever the window is resized. The cursor is re-clamped to the
    /// new extents.
    pub fn update_window_size(&mut self, width: u32, height: u32) {
        self.window_width = width;
        self.window_height = height;
        self.update_position(self.screen_x, self.screen_y);
    }

    /// Record a button as held or released
    pub fn set_button(&mut self, button: MouseButton, down: bool) {
        match button {
            MouseButton::Left => self.left = down,
            MouseButton::Right => self.right = down,
            MouseButton::Middle => self.middle = down,
        }
    }

    /// Whether a button is held
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Right => self.right,
            MouseButton::Middle => self.middle,
        }
    }
}

impl Default for MouseState {
    fn default() -> Self {
        Self::new(800, 600)
    }
}
