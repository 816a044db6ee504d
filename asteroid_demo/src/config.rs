//! Demo configuration
//!
//! Every tunable the demo uses lives here and is handed to
//! [`AsteroidDemo::init`](crate::app::AsteroidDemo::init). Files can be
//! TOML or RON; missing fields take the defaults below.

use field_engine::config::Config;
use field_engine::foundation::math::Vec3;
use field_engine::input::KeyCode;
use field_engine::scene::ViewportConfig;
use serde::{Deserialize, Serialize};

/// Demo configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Window settings
    pub window: WindowConfig,

    /// Placement of the main viewport
    pub viewport: ViewportConfig,

    /// Camera settings
    pub camera: CameraConfig,

    /// Asteroid field settings
    pub field: FieldConfig,

    /// Laser and target markers
    pub markers: MarkerConfig,

    /// Key bindings and flight steps
    pub controls: ControlsConfig,

    /// Headless run settings
    pub headless: HeadlessConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        let width = 0.95;
        let height = 0.95;
        Self {
            window: WindowConfig::default(),
            viewport: ViewportConfig {
                left: (1.0 - width) * 0.5,
                top: (1.0 - height) * 0.5,
                width,
                height,
                z_order: 100,
                background: [0.0, 0.0, 0.0, 1.0],
            },
            camera: CameraConfig::default(),
            field: FieldConfig::default(),
            markers: MarkerConfig::default(),
            controls: ControlsConfig::default(),
            headless: HeadlessConfig::default(),
        }
    }
}

impl Config for DemoConfig {}

/// Window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,

    /// Window width
    pub width: u32,

    /// Window height
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Demo".to_string(),
            width: 800,
            height: 600,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Scene name of the camera
    pub name: String,

    /// Starting position
    pub position: Vec3,

    /// Point the camera starts out looking at
    pub look_at: Vec3,

    /// Fixed yaw axis; also the up direction at start
    pub up: Vec3,

    /// Vertical field of view in degrees
    pub fov_degrees: f32,

    /// Near clip distance
    pub near_clip: f32,

    /// Far clip distance
    pub far_clip: f32,

    /// Where the reset key puts the camera
    pub reset_position: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            name: "MyCamera".to_string(),
            position: Vec3::new(0.0, -10.0, 800.0),
            look_at: Vec3::zeros(),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov_degrees: 45.0,
            near_clip: 0.1,
            far_clip: 5000.0,
            reset_position: Vec3::new(0.0, 0.0, 800.0),
        }
    }
}

/// Asteroid field configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Maximum number of bodies
    pub capacity: usize,

    /// Bodies spawned at start-up (clamped to `capacity`)
    pub count: usize,

    /// Seed for reproducible fields; entropy when unset
    pub seed: Option<u64>,

    /// Bodies spawn with x and y in `[-half_width, half_width)`
    pub half_width: f32,

    /// Bodies spawn with z in `[0, depth)`
    pub depth: f32,

    /// Largest per-axis spin per tick, as a fraction of pi
    pub max_spin: f32,

    /// Largest per-axis drift per tick
    pub max_drift: f32,

    /// Move bodies by their drift every tick
    pub apply_drift: bool,

    /// Renormalize orientations after every tick
    pub renormalize_orientation: bool,

    /// Hit radius of the laser
    pub laser_radius: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            capacity: 1500,
            count: 1500,
            seed: None,
            half_width: 300.0,
            depth: 600.0,
            max_spin: 0.005,
            max_drift: 0.2,
            apply_drift: false,
            renormalize_orientation: true,
            laser_radius: 1.0,
        }
    }
}

/// Laser beam and target marker configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    /// Scale of the laser beam cube
    pub laser_scale: Vec3,

    /// Scale of the target cube
    pub target_scale: Vec3,

    /// How far ahead of the laser the target floats
    pub target_distance: f32,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            laser_scale: Vec3::new(0.2, 0.2, 200.0),
            target_scale: Vec3::new(0.2, 0.2, 0.2),
            target_distance: 15.0,
        }
    }
}

/// Controls configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Pause/resume animation (on release)
    pub toggle_animation: KeyCode,
    /// Quit
    pub quit: KeyCode,
    /// Pitch up
    pub pitch_up: KeyCode,
    /// Pitch down
    pub pitch_down: KeyCode,
    /// Yaw left
    pub yaw_left: KeyCode,
    /// Yaw right
    pub yaw_right: KeyCode,
    /// Roll clockwise (negative roll)
    pub roll_clockwise: KeyCode,
    /// Roll counter-clockwise (positive roll)
    pub roll_counter_clockwise: KeyCode,
    /// Accelerate along the view direction
    pub thrust_forward: KeyCode,
    /// Accelerate against the view direction
    pub thrust_backward: KeyCode,
    /// Accelerate along the camera up vector
    pub thrust_up: KeyCode,
    /// Accelerate against the camera up vector
    pub thrust_down: KeyCode,
    /// Accelerate along the camera right vector
    pub thrust_right: KeyCode,
    /// Accelerate against the camera right vector
    pub thrust_left: KeyCode,
    /// Fire the laser while held
    pub fire: KeyCode,
    /// Reset the camera
    pub reset: KeyCode,
    /// Rotation per frame per held key, in degrees
    pub rotation_step_degrees: f32,
    /// Velocity change per frame per held key
    pub thrust_step: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            toggle_animation: KeyCode::Space,
            quit: KeyCode::Escape,
            pitch_up: KeyCode::Up,
            pitch_down: KeyCode::Down,
            yaw_left: KeyCode::Left,
            yaw_right: KeyCode::Right,
            roll_clockwise: KeyCode::S,
            roll_counter_clockwise: KeyCode::X,
            thrust_forward: KeyCode::A,
            thrust_backward: KeyCode::Z,
            thrust_up: KeyCode::PageUp,
            thrust_down: KeyCode::PageDown,
            thrust_right: KeyCode::Comma,
            thrust_left: KeyCode::Period,
            fire: KeyCode::V,
            reset: KeyCode::R,
            rotation_step_degrees: 1.0,
            thrust_step: 0.1,
        }
    }
}

/// Settings for runs without a real window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadlessConfig {
    /// Stop after this many frames; run until quit when unset
    pub frame_limit: Option<u64>,

    /// Keys held on each frame, in order; nothing is held afterwards
    pub script: Vec<Vec<KeyCode>>,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            frame_limit: Some(600),
            script: Vec::new(),
        }
    }
}
