//! Scripted input for headless runs and tests

use std::collections::VecDeque;

use super::{InputDevice, InputSnapshot, KeyCode, MouseState};

/// Plays back a fixed sequence of snapshots, one per capture
///
/// Once the script runs out every capture returns nothing held.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputSnapshot>,
    mouse: MouseState,
}

impl ScriptedInput {
    /// Script from explicit snapshots
    pub fn new(frames: impl IntoIterator<Item = InputSnapshot>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            mouse: MouseState::default(),
        }
    }

    /// Script where each frame is just a set of held keys
    pub fn from_keys<I>(frames: impl IntoIterator<Item = I>) -> Self
    where
        I: IntoIterator<Item = KeyCode>,
    {
        Self::new(frames.into_iter().map(InputSnapshot::with_keys))
    }

    /// Append a frame to the end of the script
    pub fn push(&mut self, snapshot: InputSnapshot) {
        self.frames.push_back(snapshot);
    }

    /// Frames left to play
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputDevice for ScriptedInput {
    fn capture(&mut self) -> InputSnapshot {
        let mut snapshot = self.frames.pop_front().unwrap_or_default();
        // Scripted cursors live in the current window extents
        snapshot
            .mouse
            .update_window_size(self.mouse.window_width, self.mouse.window_height);
        snapshot
    }

    fn set_window_extents(&mut self, width: u32, height: u32) {
        self.mouse.update_window_size(width, height);
    }
}
