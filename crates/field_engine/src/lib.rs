//! # Field Engine
//!
//! A small scene-graph engine for 3D demos: procedural meshes, a node tree
//! with cameras and viewports, polled input, and a frame loop that calls
//! back into the application.
//!
//! ## Features
//!
//! - **Mesh registry**: validated, shared, immutable triangle-list meshes
//! - **Scene graph**: named nodes, entities, cameras and a render queue
//! - **Polled input**: keyboard/mouse snapshots with edge detection
//! - **Platforms**: headless (scripted) by default, GLFW with the `glfw` feature
//! - **Configuration**: TOML or RON settings files through serde
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use field_engine::prelude::*;
//!
//! struct MyApp;
//!
//! impl FrameListener for MyApp {
//!     fn frame_rendering_queued(&mut self, engine: &mut Engine, _event: &FrameEvent) -> Result<bool, EngineError> {
//!         Ok(!engine.capture_input().is_key_down(KeyCode::Escape))
//!     }
//! }
//!
//! impl WindowEventListener for MyApp {}
//!
//! fn main() -> Result<(), EngineError> {
//!     let mut engine = Engine::new(HeadlessPlatform::new("Demo", 800, 600).with_frame_limit(60));
//!     engine.main_loop(&mut MyApp)
//! }
//! ```

pub mod foundation;
pub mod config;
pub mod mesh;
pub mod scene;
pub mod input;
pub mod platform;

mod application;
mod engine;

pub use application::{FrameEvent, FrameListener, WindowEventListener};
pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, ConfigFormat},
        foundation::{
            math::{Mat4, Quat, Transform, Vec3},
            time::Timer,
        },
        input::{InputDevice, InputSnapshot, KeyCode, KeyToggle, MouseButton, MouseState, ScriptedInput},
        mesh::{MeshDefinition, MeshHandle, MeshRegistry, Vertex},
        platform::{HeadlessPlatform, Platform, WindowBackend, WindowEvent},
        scene::{Camera, EntityId, NodeId, Presentation, SceneManager, Viewport, ViewportConfig},
        Engine, EngineError, FrameEvent, FrameListener, WindowEventListener,
    };
}
