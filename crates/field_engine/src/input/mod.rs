//! Input system
//!
//! Input is polled: once per frame the engine asks its [`InputDevice`] for
//! an [`InputSnapshot`] of every key and button currently held plus the
//! cursor. Edge detection is layered on top with [`KeyToggle`].

mod mouse;
mod scripted;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

pub use mouse::MouseState;
pub use scripted::ScriptedInput;

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// A key
    A,
    /// B key
    B,
    /// C key
    C,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// G key
    G,
    /// H key
    H,
    /// I key
    I,
    /// J key
    J,
    /// K key
    K,
    /// L key
    L,
    /// M key
    M,
    /// N key
    N,
    /// O key
    O,
    /// P key
    P,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// T key
    T,
    /// U key
    U,
    /// V key
    V,
    /// W key
    W,
    /// X key
    X,
    /// Y key
    Y,
    /// Z key
    Z,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Page Up
    PageUp,
    /// Page Down
    PageDown,
    /// Comma (`,`)
    Comma,
    /// Period (`.`)
    Period,
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

/// Everything held down at the moment of capture
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    keys: HashSet<KeyCode>,
    /// Cursor and mouse buttons
    pub mouse: MouseState,
}

impl InputSnapshot {
    /// Snapshot with nothing held and a default mouse
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot with the given keys held
    pub fn with_keys(keys: impl IntoIterator<Item = KeyCode>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Whether a key is held
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }

    /// Mark a key held or released
    pub fn set_key(&mut self, key: KeyCode, down: bool) {
        if down {
            self.keys.insert(key);
        } else {
            self.keys.remove(&key);
        }
    }

    /// Keys held, in no particular order
    pub fn keys_down(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.keys.iter().copied()
    }
}

/// Press/release edge detector for a single key
///
/// Fires once when the key is let go after having been seen held, so a
/// held key toggles exactly once no matter how many frames it stays down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyToggle {
    key: KeyCode,
    pressed: bool,
}

impl KeyToggle {
    /// Track `key`
    pub fn new(key: KeyCode) -> Self {
        Self { key, pressed: false }
    }

    /// Key being tracked
    pub fn key(&self) -> KeyCode {
        self.key
    }

    /// Feed this frame's snapshot; true on the release edge
    pub fn update(&mut self, snapshot: &InputSnapshot) -> bool {
        if snapshot.is_key_down(self.key) {
            self.pressed = true;
            false
        } else if self.pressed {
            self.pressed = false;
            true
        } else {
            false
        }
    }
}

/// A polled source of keyboard and mouse state
pub trait InputDevice {
    /// Capture the current state of every key and button
    fn capture(&mut self) -> InputSnapshot;

    /// Tell the device the new window extents (for cursor clamping)
    fn set_window_extents(&mut self, width: u32, height: u32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_fires_once_on_release() {
        let mut toggle = KeyToggle::new(KeyCode::Space);
        let held = InputSnapshot::with_keys([KeyCode::Space]);
        let released = InputSnapshot::new();

        assert!(!toggle.update(&held));
        assert!(!toggle.update(&held));
        assert!(toggle.update(&released));
        assert!(!toggle.update(&released));
    }

    #[test]
    fn test_toggle_ignores_other_keys() {
        let mut toggle = KeyToggle::new(KeyCode::Space);
        assert!(!toggle.update(&InputSnapshot::with_keys([KeyCode::V])));
        assert!(!toggle.update(&InputSnapshot::new()));
    }

    #[test]
    fn test_snapshot_keys() {
        let mut snapshot = InputSnapshot::with_keys([KeyCode::A, KeyCode::Up]);
        assert!(snapshot.is_key_down(KeyCode::A));
        snapshot.set_key(KeyCode::A, false);
        assert!(!snapshot.is_key_down(KeyCode::A));
        assert_eq!(snapshot.keys_down().collect::<Vec<_>>(), vec![KeyCode::Up]);
    }
}
