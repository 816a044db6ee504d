//! Viewports: rectangles of the window a camera renders into

use serde::{Deserialize, Serialize};

/// Placement of a viewport, in fractions of the window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Left edge, 0.0 = window left
    pub left: f32,
    /// Top edge, 0.0 = window top
    pub top: f32,
    /// Width as a fraction of the window width
    pub width: f32,
    /// Height as a fraction of the window height
    pub height: f32,
    /// Stacking order; higher draws on top
    pub z_order: i32,
    /// Clear colour (RGBA)
    pub background: [f32; 4],
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width: 1.0,
            height: 1.0,
            z_order: 0,
            background: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

/// A camera bound to a region of the window
#[derive(Debug, Clone)]
pub struct Viewport {
    camera: String,
    config: ViewportConfig,
    actual_left: u32,
    actual_top: u32,
    actual_width: u32,
    actual_height: u32,
}

impl Viewport {
    /// Bind `camera` to a region of a `window_width` x `window_height` window
    pub fn new(camera: &str, config: ViewportConfig, window_width: u32, window_height: u32) -> Self {
        let mut viewport = Self {
            camera: camera.to_string(),
            config,
            actual_left: 0,
            actual_top: 0,
            actual_width: 0,
            actual_height: 0,
        };
        viewport.update_dimensions(window_width, window_height);
        viewport
    }

    /// Recompute pixel dimensions after a window resize
    pub fn update_dimensions(&mut self, window_width: u32, window_height: u32) {
        let scale = |fraction: f32, extent: u32| (fraction.clamp(0.0, 1.0) * extent as f32).round() as u32;
        self.actual_left = scale(self.config.left, window_width);
        self.actual_top = scale(self.config.top, window_height);
        self.actual_width = scale(self.config.width, window_width);
        self.actual_height = scale(self.config.height, window_height);
        log::trace!(
            "Viewport for '{}' now {}x{} at ({}, {})",
            self.camera,
            self.actual_width,
            self.actual_height,
            self.actual_left,
            self.actual_top
        );
    }

    /// Name of the camera rendering into this viewport
    pub fn camera(&self) -> &str {
        &self.camera
    }

    /// Fractional placement
    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    /// Pixel offset of the top-left corner
    pub fn actual_position(&self) -> (u32, u32) {
        (self.actual_left, self.actual_top)
    }

    /// Pixel width
    pub fn actual_width(&self) -> u32 {
        self.actual_width
    }

    /// Pixel height
    pub fn actual_height(&self) -> u32 {
        self.actual_height
    }

    /// Width over height, 1.0 for a degenerate viewport
    pub fn aspect_ratio(&self) -> f32 {
        if self.actual_height == 0 {
            1.0
        } else {
            self.actual_width as f32 / self.actual_height as f32
        }
    }
}
