//! GLFW-backed window and input
//!
//! Opens a plain window with no client API. Keyboard and mouse are polled
//! directly from the window on every capture.

use glfw::Action;

use super::{WindowBackend, WindowEvent};
use crate::input::{InputDevice, InputSnapshot, KeyCode, MouseButton, MouseState};
use crate::EngineError;

const KEYS: [(KeyCode, glfw::Key); 37] = [
    (KeyCode::A, glfw::Key::A),
    (KeyCode::B, glfw::Key::B),
    (KeyCode::C, glfw::Key::C),
    (KeyCode::D, glfw::Key::D),
    (KeyCode::E, glfw::Key::E),
    (KeyCode::F, glfw::Key::F),
    (KeyCode::G, glfw::Key::G),
    (KeyCode::H, glfw::Key::H),
    (KeyCode::I, glfw::Key::I),
    (KeyCode::J, glfw::Key::J),
    (KeyCode::K, glfw::Key::K),
    (KeyCode::L, glfw::Key::L),
    (KeyCode::M, glfw::Key::M),
    (KeyCode::N, glfw::Key::N),
    (KeyCode::O, glfw::Key::O),
    (KeyCode::P, glfw::Key::P),
    (KeyCode::Q, glfw::Key::Q),
    (KeyCode::R, glfw::Key::R),
    (KeyCode::S, glfw::Key::S),
    (KeyCode::T, glfw::Key::T),
    (KeyCode::U, glfw::Key::U),
    (KeyCode::V, glfw::Key::V),
    (KeyCode::W, glfw::Key::W),
    (KeyCode::X, glfw::Key::X),
    (KeyCode::Y, glfw::Key::Y),
    (KeyCode::Z, glfw::Key::Z),
    (KeyCode::Space, glfw::Key::Space),
    (KeyCode::Enter, glfw::Key::Enter),
    (KeyCode::Escape, glfw::Key::Escape),
    (KeyCode::Up, glfw::Key::Up),
    (KeyCode::Down, glfw::Key::Down),
    (KeyCode::Left, glfw::Key::Left),
    (KeyCode::Right, glfw::Key::Right),
    (KeyCode::PageUp, glfw::Key::PageUp),
    (KeyCode::PageDown, glfw::Key::PageDown),
    (KeyCode::Comma, glfw::Key::Comma),
    (KeyCode::Period, glfw::Key::Period),
];

const BUTTONS: [(MouseButton, glfw::MouseButton); 3] = [
    (MouseButton::Left, glfw::MouseButton::Button1),
    (MouseButton::Right, glfw::MouseButton::Button2),
    (MouseButton::Middle, glfw::MouseButton::Button3),
];

/// Real OS window with polled keyboard and mouse
pub struct GlfwPlatform {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    title: String,
    mouse: MouseState,
    closed: bool,
}

impl GlfwPlatform {
    /// Initialize GLFW and open a resizable window
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, EngineError> {
        let mut glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|e| EngineError::Initialization(format!("GLFW initialization failed: {e:?}")))?;

        glfw.window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::NoApi));
        glfw.window_hint(glfw::WindowHint::Resizable(true));

        let (mut window, events) = glfw
            .create_window(width, height, title, glfw::WindowMode::Windowed)
            .ok_or_else(|| EngineError::Window(format!("could not create window '{title}'")))?;

        window.set_close_polling(true);
        window.set_size_polling(true);

        let (w, h) = window.get_size();
        log::info!("GLFW window '{}' created ({}x{})", title, w, h);
        Ok(Self {
            glfw,
            window,
            events,
            title: title.to_string(),
            mouse: MouseState::new(w.max(0) as u32, h.max(0) as u32),
            closed: false,
        })
    }
}

impl WindowBackend for GlfwPlatform {
    fn is_closed(&self) -> bool {
        self.closed || self.window.should_close()
    }

    fn close(&mut self) {
        self.window.set_should_close(true);
        self.closed = true;
    }

    fn size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_size();
        (width.max(0) as u32, height.max(0) as u32)
    }

    fn title(&self) -> &str {
        &self.title
    }

    // No client API, so there is no buffer to swap
    fn update(&mut self) {}

    fn pump_messages(&mut self) -> Vec<WindowEvent> {
        self.glfw.poll_events();
        let mut events = Vec::new();
        for (_, event) in glfw::flush_messages(&self.events) {
            match event {
                glfw::WindowEvent::Size(width, height) => events.push(WindowEvent::Resized {
                    width: width.max(0) as u32,
                    height: height.max(0) as u32,
                }),
                glfw::WindowEvent::Close => {
                    self.closed = true;
                    events.push(WindowEvent::CloseRequested);
                }
                _ => {}
            }
        }
        events
    }
}

impl InputDevice for GlfwPlatform {
    fn capture(&mut self) -> InputSnapshot {
        let mut snapshot = InputSnapshot::new();
        for (key, glfw_key) in KEYS {
            if self.window.get_key(glfw_key) != Action::Release {
                snapshot.set_key(key, true);
            }
        }

        let (x, y) = self.window.get_cursor_pos();
        self.mouse.update_position(x, y);
        for (button, glfw_button) in BUTTONS {
            self.mouse
                .set_button(button, self.window.get_mouse_button(glfw_button) != Action::Release);
        }
        snapshot.mouse = self.mouse.clone();
        snapshot
    }

    fn set_window_extents(&mut self, width: u32, height: u32) {
        self.mouse.update_window_size(width, height);
    }
}
