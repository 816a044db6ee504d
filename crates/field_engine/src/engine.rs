//! Core engine implementation

use thiserror::Error;

use crate::{
    application::{FrameEvent, FrameListener, WindowEventListener},
    config::ConfigError,
    foundation::time::Timer,
    input::InputSnapshot,
    platform::{Platform, WindowEvent},
    scene::{SceneManager, Viewport, ViewportConfig},
};

/// Main engine struct
///
/// Owns the platform (window + input), the scene and the viewports, and
/// drives the frame loop.
pub struct Engine {
    platform: Box<dyn Platform>,
    scene: SceneManager,
    viewports: Vec<Viewport>,
    timer: Timer,
    running: bool,
}

impl Engine {
    /// Create an engine on top of a platform
    pub fn new(platform: impl Platform + 'static) -> Self {
        let (width, height) = platform.size();
        log::info!("Initializing engine on '{}' ({}x{})", platform.title(), width, height);

        Self {
            platform: Box::new(platform),
            scene: SceneManager::new(),
            viewports: Vec::new(),
            timer: Timer::new(),
            running: false,
        }
    }

    /// The scene
    pub fn scene(&self) -> &SceneManager {
        &self.scene
    }

    /// Mutable access to the scene
    pub fn scene_mut(&mut self) -> &mut SceneManager {
        &mut self.scene
    }

    /// Bind a registered camera to a region of the window
    ///
    /// Viewports are kept sorted by z-order, lowest first.
    pub fn add_viewport(&mut self, camera: &str, config: &ViewportConfig) -> Result<&Viewport, EngineError> {
        self.scene.camera(camera)?;

        let (width, height) = self.platform.size();
        let viewport = Viewport::new(camera, config.clone(), width, height);
        log::debug!(
            "Added viewport for '{}' ({}x{}, z-order {})",
            camera,
            viewport.actual_width(),
            viewport.actual_height(),
            config.z_order
        );

        let index = self.viewports.partition_point(|v| v.config().z_order <= config.z_order);
        self.viewports.insert(index, viewport);
        Ok(&self.viewports[index])
    }

    /// Viewports in z-order
    pub fn viewports(&self) -> &[Viewport] {
        &self.viewports
    }

    /// Poll keyboard and mouse
    pub fn capture_input(&mut self) -> InputSnapshot {
        self.platform.capture()
    }

    /// Tell the input devices the window extents (for cursor clamping)
    pub fn set_input_extents(&mut self, width: u32, height: u32) {
        self.platform.set_window_extents(width, height);
    }

    /// Current window size in pixels
    pub fn window_size(&self) -> (u32, u32) {
        self.platform.size()
    }

    /// Whether the window is still open
    pub fn is_window_open(&self) -> bool {
        !self.platform.is_closed()
    }

    /// Frames rendered so far
    pub fn frame_count(&self) -> u64 {
        self.timer.frame_count()
    }

    /// Render a single frame
    ///
    /// Returns `Ok(false)` when the listener asked to stop or the window is
    /// closed.
    pub fn render_one_frame<L: FrameListener + ?Sized>(&mut self, listener: &mut L) -> Result<bool, EngineError> {
        if self.platform.is_closed() {
            return Ok(false);
        }

        self.timer.update();
        let event = FrameEvent {
            time_since_last_frame: self.timer.delta_time(),
            time_since_last_event: self.timer.total_time(),
            frame: self.timer.frame_count(),
        };
        log::trace!("Frame {} ({:.4}s)", event.frame, event.time_since_last_frame);

        let keep_going = listener.frame_rendering_queued(self, &event)?;
        if keep_going {
            self.platform.update();
        }
        Ok(keep_going)
    }

    /// Run frames until the window closes or the listener returns `false`
    pub fn main_loop<L>(&mut self, listener: &mut L) -> Result<(), EngineError>
    where
        L: FrameListener + WindowEventListener + ?Sized,
    {
        log::info!("Starting main loop...");
        self.timer.clear_event_times();
        self.running = true;

        while self.running {
            if !self.render_one_frame(listener)? {
                break;
            }
            self.dispatch_window_events(listener);
        }

        self.running = false;
        log::info!("Main loop ended after {} frames", self.timer.frame_count());
        Ok(())
    }

    fn dispatch_window_events<L: WindowEventListener + ?Sized>(&mut self, listener: &mut L) {
        for event in self.platform.pump_messages() {
            match event {
                WindowEvent::Resized { width, height } => {
                    log::debug!("Window resized to {}x{}", width, height);
                    for viewport in &mut self.viewports {
                        viewport.update_dimensions(width, height);
                    }
                    listener.window_resized(self, width, height);
                }
                WindowEvent::CloseRequested => {
                    listener.window_closed(self);
                    self.running = false;
                }
            }
        }
    }

    /// Close the window; a running main loop stops after the current frame
    pub fn shutdown(&mut self) {
        log::info!("Engine shutdown requested");
        self.platform.close();
        self.running = false;
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// A resource with this name already exists
    #[error("{kind} '{name}' already exists")]
    DuplicateResourceName {
        /// Resource kind ("mesh", "scene node", ...)
        kind: &'static str,
        /// Offending name
        name: String,
    },

    /// A triangle refers to a vertex that does not exist
    #[error("mesh '{mesh}': triangle {triangle} uses vertex {index}, but there are only {vertex_count} vertices")]
    InvalidTriangleIndex {
        /// Mesh being built
        mesh: String,
        /// Triangle position in the definition
        triangle: usize,
        /// Out-of-range index
        index: u32,
        /// Number of vertices supplied
        vertex_count: usize,
    },

    /// Mesh definition with no vertices or no triangles
    #[error("mesh '{0}' has no vertices or no triangles")]
    EmptyMesh(String),

    /// Lookup of an unknown resource
    #[error("{kind} '{name}' not found")]
    NotFound {
        /// Resource kind
        kind: &'static str,
        /// Name or handle that was looked up
        name: String,
    },

    /// Entity is already attached to a node
    #[error("entity '{0}' is already attached to a scene node")]
    AlreadyAttached(String),

    /// Window system failure
    #[error("Window error: {0}")]
    Window(String),

    /// Initialization error
    #[error("Engine initialization failed: {0}")]
    Initialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{KeyCode, ScriptedInput};
    use crate::platform::HeadlessPlatform;
    use crate::scene::Camera;

    #[derive(Default)]
    struct Recorder {
        frames: Vec<u64>,
        stop_at: Option<u64>,
        resized: Vec<(u32, u32, u32)>,
        closed: bool,
        keys_seen: usize,
    }

    impl FrameListener for Recorder {
        fn frame_rendering_queued(&mut self, engine: &mut Engine, event: &FrameEvent) -> Result<bool, EngineError> {
            self.frames.push(event.frame);
            if engine.capture_input().is_key_down(KeyCode::Escape) {
                self.keys_seen += 1;
            }
            Ok(self.stop_at != Some(event.frame))
        }
    }

    impl WindowEventListener for Recorder {
        fn window_resized(&mut self, engine: &mut Engine, width: u32, height: u32) {
            let viewport_width = engine.viewports()[0].actual_width();
            self.resized.push((width, height, viewport_width));
        }

        fn window_closed(&mut self, _engine: &mut Engine) {
            self.closed = true;
        }
    }

    #[test]
    fn test_main_loop_runs_until_frame_limit() {
        let mut engine = Engine::new(HeadlessPlatform::new("Demo", 800, 600).with_frame_limit(5));
        let mut recorder = Recorder::default();

        engine.main_loop(&mut recorder).unwrap();
        assert_eq!(recorder.frames, vec![1, 2, 3, 4, 5]);
        assert!(recorder.closed);
        assert!(!engine.is_window_open());
    }

    #[test]
    fn test_listener_can_stop_the_loop() {
        let mut engine = Engine::new(HeadlessPlatform::new("Demo", 800, 600).with_frame_limit(100));
        let mut recorder = Recorder {
            stop_at: Some(3),
            ..Default::default()
        };

        engine.main_loop(&mut recorder).unwrap();
        assert_eq!(recorder.frames.len(), 3);
        assert!(!recorder.closed);
    }

    #[test]
    fn test_viewports_resize_before_listener_is_told() {
        let mut platform = HeadlessPlatform::new("Demo", 800, 600).with_frame_limit(2);
        platform.inject_event(WindowEvent::Resized { width: 400, height: 300 });

        let mut engine = Engine::new(platform);
        engine.scene_mut().create_camera("PlayerCam", Camera::default()).unwrap();
        engine.add_viewport("PlayerCam", &ViewportConfig::default()).unwrap();

        let mut recorder = Recorder::default();
        engine.main_loop(&mut recorder).unwrap();
        assert_eq!(recorder.resized, vec![(400, 300, 400)]);
        assert_eq!(engine.window_size(), (400, 300));
    }

    #[test]
    fn test_viewport_needs_existing_camera() {
        let mut engine = Engine::new(HeadlessPlatform::new("Demo", 800, 600));
        assert!(matches!(
            engine.add_viewport("Missing", &ViewportConfig::default()),
            Err(EngineError::NotFound { kind: "camera", .. })
        ));
    }

    #[test]
    fn test_viewports_sorted_by_z_order() {
        let mut engine = Engine::new(HeadlessPlatform::new("Demo", 800, 600));
        engine.scene_mut().create_camera("PlayerCam", Camera::default()).unwrap();
        let front = ViewportConfig { z_order: 100, ..Default::default() };
        let back = ViewportConfig { z_order: -1, ..Default::default() };
        engine.add_viewport("PlayerCam", &front).unwrap();
        engine.add_viewport("PlayerCam", &back).unwrap();

        let orders: Vec<i32> = engine.viewports().iter().map(|v| v.config().z_order).collect();
        assert_eq!(orders, vec![-1, 100]);
    }

    #[test]
    fn test_input_reaches_listener_and_shutdown_stops() {
        let input = ScriptedInput::from_keys([vec![KeyCode::Escape], vec![]]);
        let mut engine = Engine::new(HeadlessPlatform::new("Demo", 800, 600).with_input(input).with_frame_limit(2));
        let mut recorder = Recorder::default();

        engine.main_loop(&mut recorder).unwrap();
        assert_eq!(recorder.keys_seen, 1);

        engine.shutdown();
        assert!(!engine.render_one_frame(&mut recorder).unwrap());
    }
}
