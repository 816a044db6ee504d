//! Headless platform: no OS window, scripted input, optional frame limit

use std::collections::VecDeque;

use super::{WindowBackend, WindowEvent};
use crate::input::{InputDevice, InputSnapshot, ScriptedInput};

/// Window stand-in for batch runs and tests
///
/// Closes itself after `frame_limit` presented frames, if one is set.
/// Events queued with [`HeadlessPlatform::inject_event`] are delivered on
/// the next pump, as an OS would.
#[derive(Debug)]
pub struct HeadlessPlatform {
    title: String,
    width: u32,
    height: u32,
    closed: bool,
    frame_limit: Option<u64>,
    frames_presented: u64,
    input: ScriptedInput,
    pending: VecDeque<WindowEvent>,
}

impl HeadlessPlatform {
    /// Create a headless window of the given size
    pub fn new(title: &str, width: u32, height: u32) -> Self {
        let mut input = ScriptedInput::default();
        input.set_window_extents(width, height);
        log::info!("Headless window '{}' created ({}x{})", title, width, height);
        Self {
            title: title.to_string(),
            width,
            height,
            closed: false,
            frame_limit: None,
            frames_presented: 0,
            input,
            pending: VecDeque::new(),
        }
    }

    /// Close automatically after this many frames
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    /// Replace the input script
    pub fn with_input(mut self, mut input: ScriptedInput) -> Self {
        input.set_window_extents(self.width, self.height);
        self.input = input;
        self
    }

    /// Queue a window event for the next pump
    pub fn inject_event(&mut self, event: WindowEvent) {
        self.pending.push_back(event);
    }

    /// Frames presented so far
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }
}

impl WindowBackend for HeadlessPlatform {
    fn is_closed(&self) -> bool {
        self.closed
    }

    fn close(&mut self) {
        if !self.closed {
            log::debug!("Headless window '{}' closed after {} frames", self.title, self.frames_presented);
        }
        self.closed = true;
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn update(&mut self) {
        self.frames_presented += 1;
        if self.frame_limit.is_some_and(|limit| self.frames_presented >= limit) {
            self.pending.push_back(WindowEvent::CloseRequested);
        }
    }

    fn pump_messages(&mut self) -> Vec<WindowEvent> {
        let events: Vec<WindowEvent> = self.pending.drain(..).collect();
        for event in &events {
            match *event {
                WindowEvent::Resized { width, height } => {
                    self.width = width;
                    self.height = height;
                }
                WindowEvent::CloseRequested => self.close(),
            }
        }
        events
    }
}

impl InputDevice for HeadlessPlatform {
    fn capture(&mut self) -> InputSnapshot {
        self.input.capture()
    }

    fn set_window_extents(&mut self, width: u32, height: u32) {
        self.input.set_window_extents(width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyCode;

    #[test]
    fn test_frame_limit_closes_on_pump() {
        let mut platform = HeadlessPlatform::new("Demo", 800, 600).with_frame_limit(2);

        platform.update();
        assert!(platform.pump_messages().is_empty());
        platform.update();
        assert_eq!(platform.pump_messages(), vec![WindowEvent::CloseRequested]);
        assert!(platform.is_closed());
        assert_eq!(platform.frames_presented(), 2);
    }

    #[test]
    fn test_injected_resize_applies_on_pump() {
        let mut platform = HeadlessPlatform::new("Demo", 800, 600);
        platform.inject_event(WindowEvent::Resized { width: 1024, height: 768 });
        assert_eq!(platform.size(), (800, 600));

        platform.pump_messages();
        assert_eq!(platform.size(), (1024, 768));
    }

    #[test]
    fn test_scripted_input_passes_through() {
        let input = ScriptedInput::from_keys([vec![KeyCode::Escape]]);
        let mut platform = HeadlessPlatform::new("Demo", 800, 600).with_input(input);

        let snapshot = platform.capture();
        assert!(snapshot.is_key_down(KeyCode::Escape));
        assert_eq!(snapshot.mouse.window_width, 800);
    }
}
