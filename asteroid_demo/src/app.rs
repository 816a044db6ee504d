//! The demo application
//!
//! [`AsteroidDemo`] owns the engine and the per-frame controller. The
//! controller is the engine's frame and window listener: it spins the
//! asteroids, flies the camera from the keyboard, keeps the laser and
//! target markers in front of the camera, and fires the laser.

use field_engine::foundation::math::{utils, Quat, Vec3};
use field_engine::input::{InputSnapshot, KeyCode, KeyToggle, ScriptedInput};
use field_engine::mesh::MeshHandle;
use field_engine::platform::{HeadlessPlatform, Platform};
use field_engine::scene::{Camera, NodeId, Presentation, SceneManager};
use field_engine::{Engine, EngineError, FrameEvent, FrameListener, WindowEventListener};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::DemoConfig;
use crate::error::AppError;
use crate::field::{AsteroidField, Body, FieldError};
use crate::geometry::{self, CUBE_MESH, ICOSAHEDRON_MESH};

/// Prefix of asteroid entity and node names
pub const ASTEROID_PREFIX: &str = "Asteroid";

/// Laser beam entity; its node is `LaserNode`
pub const LASER_NAME: &str = "Laser";

/// Target marker entity; its node is `TargetNode`
pub const TARGET_NAME: &str = "Target";

/// Asteroid field demo
pub struct AsteroidDemo {
    engine: Engine,
    controller: FieldController,
}

/// Per-frame state, driven by the engine through the listener traits
struct FieldController {
    config: DemoConfig,
    field: AsteroidField,
    rng: StdRng,
    animating: bool,
    animation_toggle: KeyToggle,
    velocity: Vec3,
    laser: Option<NodeId>,
    target: Option<NodeId>,
}

/// Headless platform sized and scripted from the configuration
pub fn headless_platform(config: &DemoConfig) -> HeadlessPlatform {
    let script = ScriptedInput::from_keys(config.headless.script.iter().cloned());
    let platform = HeadlessPlatform::new(&config.window.title, config.window.width, config.window.height)
        .with_input(script);
    match config.headless.frame_limit {
        Some(frames) => platform.with_frame_limit(frames),
        None => platform,
    }
}

impl AsteroidDemo {
    /// Set up the engine, camera and viewport
    pub fn init(config: DemoConfig, platform: impl Platform + 'static) -> Result<Self, AppError> {
        log::info!("Initializing asteroid demo...");
        let mut engine = Engine::new(platform);

        let camera_config = &config.camera;
        let (width, height) = engine.window_size();
        let mut camera = Camera::perspective(
            camera_config.position,
            camera_config.fov_degrees,
            width as f32 / height.max(1) as f32,
            camera_config.near_clip,
            camera_config.far_clip,
        );
        camera.set_fixed_yaw_axis(Some(camera_config.up));
        camera.look_at(camera_config.look_at);
        engine.scene_mut().create_camera(&camera_config.name, camera)?;

        let aspect = engine.add_viewport(&camera_config.name, &config.viewport)?.aspect_ratio();
        engine.scene_mut().camera_mut(&camera_config.name)?.set_aspect_ratio(aspect);
        engine.set_input_extents(width, height);

        let rng = match config.field.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let controller = FieldController {
            field: AsteroidField::new(config.field.clone()),
            animation_toggle: KeyToggle::new(config.controls.toggle_animation),
            config,
            rng,
            animating: true,
            velocity: Vec3::zeros(),
            laser: None,
            target: None,
        };

        Ok(Self { engine, controller })
    }

    /// Build and register the cube mesh
    pub fn create_cube(&mut self) -> Result<MeshHandle, AppError> {
        let handle = self
            .engine
            .scene_mut()
            .meshes_mut()
            .build_mesh(CUBE_MESH, &geometry::cube())?;
        Ok(handle)
    }

    /// Build and register the icosahedron mesh
    pub fn create_icosahedron(&mut self) -> Result<MeshHandle, AppError> {
        let handle = self
            .engine
            .scene_mut()
            .meshes_mut()
            .build_mesh(ICOSAHEDRON_MESH, &geometry::icosahedron())?;
        Ok(handle)
    }

    /// Populate the field and give every body an entity and a node
    ///
    /// Needs both meshes. Also creates the laser and target markers. Returns
    /// the number of asteroids actually created (clamped to capacity).
    ///
    /// The field can be created once; later calls fail with
    /// [`FieldError::AlreadyCreated`] and leave field and scene untouched.
    pub fn create_asteroid_field(&mut self, count: usize) -> Result<usize, AppError> {
        let controller = &mut self.controller;
        if controller.laser.is_some() || !controller.field.is_empty() {
            return Err(FieldError::AlreadyCreated(controller.field.len()).into());
        }

        let scene = self.engine.scene_mut();
        for mesh in [ICOSAHEDRON_MESH, CUBE_MESH] {
            if !scene.meshes().contains(mesh) {
                return Err(EngineError::NotFound {
                    kind: "mesh",
                    name: mesh.to_string(),
                }
                .into());
            }
        }

        let created = controller.field.populate(count, &mut controller.rng);
        let root = scene.root();
        let ids: Vec<_> = controller.field.bodies().iter().map(Body::id).collect();
        for id in ids {
            let name = format!("{ASTEROID_PREFIX}{}", id.index());
            let entity = scene.create_entity(&name, ICOSAHEDRON_MESH)?;
            let node = scene.create_child_node(root, &name)?;
            scene.attach_object(node, entity)?;
            controller.field.bind_node(id, node)?;
        }
        controller.field.present(scene)?;

        let markers = &controller.config.markers;
        controller.laser = Some(spawn_marker(scene, LASER_NAME, "LaserNode", markers.laser_scale)?);
        controller.target = Some(spawn_marker(scene, TARGET_NAME, "TargetNode", markers.target_scale)?);
        controller.place_markers(scene)?;

        log::info!("Created asteroid field with {} asteroids", created);
        Ok(created)
    }

    /// Run until the window closes or the quit key is pressed
    pub fn main_loop(&mut self) -> Result<(), AppError> {
        self.engine.main_loop(&mut self.controller)?;
        Ok(())
    }

    /// The engine
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Mutable access to the engine
    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    /// The asteroid field
    pub fn field(&self) -> &AsteroidField {
        &self.controller.field
    }

    /// Whether asteroids (and the camera) are currently animated
    pub fn is_animating(&self) -> bool {
        self.controller.animating
    }

    /// Current camera velocity per frame
    pub fn velocity(&self) -> Vec3 {
        self.controller.velocity
    }

    /// The demo camera
    pub fn camera(&self) -> Result<&Camera, AppError> {
        Ok(self.engine.scene().camera(&self.controller.config.camera.name)?)
    }
}

fn spawn_marker(scene: &mut SceneManager, entity_name: &str, node_name: &str, scale: Vec3) -> Result<NodeId, EngineError> {
    let entity = scene.create_entity(entity_name, CUBE_MESH)?;
    let node = scene.create_child_node(scene.root(), node_name)?;
    scene.attach_object(node, entity)?;
    scene.set_scale(node, scale)?;
    Ok(node)
}

impl FieldController {
    /// Put the laser just below the camera and the target ahead of it
    fn place_markers(&self, scene: &mut SceneManager) -> Result<(), EngineError> {
        let camera = scene.camera(&self.config.camera.name)?;
        let base = camera.position - camera.up();
        let ahead = base + camera.direction() * self.config.markers.target_distance;
        let orientation = camera.orientation;

        if let Some(laser) = self.laser {
            scene.set_node_transform(laser, base, orientation)?;
        }
        if let Some(target) = self.target {
            scene.set_node_transform(target, ahead, orientation)?;
        }
        Ok(())
    }

    fn fly_camera(&mut self, camera: &mut Camera, input: &InputSnapshot) {
        let controls = &self.config.controls;
        let step = utils::deg_to_rad(controls.rotation_step_degrees);
        let down = |key: KeyCode| input.is_key_down(key);

        camera.position += self.velocity;

        if down(controls.pitch_up) {
            camera.pitch(step);
        }
        if down(controls.pitch_down) {
            camera.pitch(-step);
        }
        if down(controls.yaw_left) {
            camera.yaw(step);
        }
        if down(controls.yaw_right) {
            camera.yaw(-step);
        }
        if down(controls.roll_clockwise) {
            camera.roll(-step);
        }
        if down(controls.roll_counter_clockwise) {
            camera.roll(step);
        }

        let thrust = controls.thrust_step;
        if down(controls.thrust_forward) {
            self.velocity += camera.direction() * thrust;
        }
        if down(controls.thrust_backward) {
            self.velocity -= camera.direction() * thrust;
        }
        if down(controls.thrust_up) {
            self.velocity += camera.up() * thrust;
        }
        if down(controls.thrust_down) {
            self.velocity -= camera.up() * thrust;
        }
        if down(controls.thrust_right) {
            self.velocity += camera.right() * thrust;
        }
        if down(controls.thrust_left) {
            self.velocity -= camera.right() * thrust;
        }
    }

    fn fire_laser(&mut self, scene: &mut SceneManager) -> Result<(), EngineError> {
        let (origin, direction) = scene.camera(&self.config.camera.name)?.ray();
        for id in self.field.hit_test(origin, direction, self.config.field.laser_radius) {
            if let Some(node) = self.field.body(id).and_then(Body::node) {
                scene.detach_node(node)?;
            }
        }
        Ok(())
    }

    fn show_laser(&self, scene: &mut SceneManager, firing: bool) -> Result<(), EngineError> {
        if let Some(laser) = self.laser {
            scene.set_visible(laser, firing)?;
        }
        if let Some(target) = self.target {
            scene.set_visible(target, !firing)?;
        }
        Ok(())
    }
}

impl FrameListener for FieldController {
    fn frame_rendering_queued(&mut self, engine: &mut Engine, event: &FrameEvent) -> Result<bool, EngineError> {
        if self.animating {
            self.field.advance_tick();
            self.field.present(engine.scene_mut())?;
        }

        let input = engine.capture_input();
        if self.animation_toggle.update(&input) {
            self.animating = !self.animating;
            log::info!("Animation {} at frame {}", if self.animating { "resumed" } else { "paused" }, event.frame);
        }
        if input.is_key_down(self.config.controls.quit) {
            log::info!("Quit key pressed");
            engine.shutdown();
            return Ok(false);
        }

        // Paused: the camera is frozen along with the asteroids
        if !self.animating {
            return Ok(true);
        }

        let scene = engine.scene_mut();
        let mut camera = scene.camera(&self.config.camera.name)?.clone();
        self.fly_camera(&mut camera, &input);
        *scene.camera_mut(&self.config.camera.name)? = camera;

        self.place_markers(scene)?;

        let firing = input.is_key_down(self.config.controls.fire);
        if firing {
            self.fire_laser(scene)?;
        }
        self.show_laser(scene, firing)?;

        if input.is_key_down(self.config.controls.reset) {
            let camera = scene.camera_mut(&self.config.camera.name)?;
            camera.set_position(self.config.camera.reset_position);
            camera.set_orientation(Quat::identity());
            self.velocity = Vec3::zeros();
            log::debug!("Camera reset");
        }

        Ok(true)
    }
}

impl WindowEventListener for FieldController {
    fn window_resized(&mut self, engine: &mut Engine, width: u32, height: u32) {
        match engine.scene_mut().camera_mut(&self.config.camera.name) {
            Ok(camera) => camera.set_aspect_ratio(width as f32 / height.max(1) as f32),
            Err(err) => log::warn!("Cannot update aspect ratio: {}", err),
        }
        engine.set_input_extents(width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use field_engine::platform::WindowEvent;

    fn demo_config(count: usize, frame_limit: u64, script: Vec<Vec<KeyCode>>) -> DemoConfig {
        let mut config = DemoConfig::default();
        config.field.count = count;
        config.field.seed = Some(5);
        config.headless.frame_limit = Some(frame_limit);
        config.headless.script = script;
        config
    }

    fn demo(config: DemoConfig) -> AsteroidDemo {
        let platform = headless_platform(&config);
        let count = config.field.count;
        let mut demo = AsteroidDemo::init(config, platform).unwrap();
        demo.create_cube().unwrap();
        demo.create_icosahedron().unwrap();
        demo.create_asteroid_field(count).unwrap();
        demo
    }

    #[test]
    fn test_setup_builds_scene() {
        let demo = demo(demo_config(10, 1, Vec::new()));
        let scene = demo.engine().scene();

        assert_eq!(demo.field().len(), 10);
        assert!(scene.node_by_name("Asteroid9").is_some());
        assert!(scene.entity_by_name(LASER_NAME).is_some());
        // 10 asteroids plus laser and target
        assert_eq!(scene.render_queue().item_count(), 12);

        let camera = demo.camera().unwrap();
        assert_relative_eq!(camera.position, Vec3::new(0.0, -10.0, 800.0));
        assert_relative_eq!(camera.aspect, 760.0 / 570.0, epsilon = 1e-4);
    }

    #[test]
    fn test_field_clamps_to_capacity() {
        let mut config = demo_config(10, 1, Vec::new());
        config.field.capacity = 4;
        let demo = demo(config);
        assert_eq!(demo.field().len(), 4);
        assert!(demo.engine().scene().node_by_name("Asteroid4").is_none());
    }

    #[test]
    fn test_headless_loop_ticks_every_frame() {
        let mut demo = demo(demo_config(5, 5, Vec::new()));
        demo.main_loop().unwrap();

        assert_eq!(demo.field().tick_count(), 5);
        assert_eq!(demo.engine().frame_count(), 5);
        assert!(!demo.engine().is_window_open());

        // Nodes follow their bodies
        let scene = demo.engine().scene();
        for body in demo.field().bodies() {
            let node = scene.node(body.node().unwrap()).unwrap();
            assert_relative_eq!(node.orientation(), body.orientation(), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_quit_key_ends_loop() {
        let mut demo = demo(demo_config(5, 100, vec![vec![KeyCode::Escape]]));
        demo.main_loop().unwrap();

        assert_eq!(demo.engine().frame_count(), 1);
        assert!(!demo.engine().is_window_open());
    }

    #[test]
    fn test_pause_freezes_asteroids_and_camera() {
        let script = vec![vec![KeyCode::Space], vec![], vec![KeyCode::A], vec![KeyCode::Up]];
        let mut demo = demo(demo_config(5, 4, script));
        let start = demo.camera().unwrap().clone();
        demo.main_loop().unwrap();

        assert!(!demo.is_animating());
        // Ticks on frame 1 and on frame 2 before the release toggled the pause
        assert_eq!(demo.field().tick_count(), 2);
        assert_relative_eq!(demo.velocity(), Vec3::zeros());
        assert_eq!(demo.camera().unwrap(), &start);
    }

    #[test]
    fn test_thrust_accumulates_velocity() {
        let mut demo = demo(demo_config(0, 3, vec![vec![KeyCode::A]]));
        let start = demo.camera().unwrap().position;
        let direction = demo.camera().unwrap().direction();
        demo.main_loop().unwrap();

        let velocity = direction * 0.1;
        assert_relative_eq!(demo.velocity(), velocity, epsilon = 1e-6);
        assert_relative_eq!(demo.camera().unwrap().position, start + velocity * 2.0, epsilon = 1e-4);
    }

    #[test]
    fn test_rotation_keys_turn_camera() {
        let mut demo = demo(demo_config(0, 1, vec![vec![KeyCode::Left]]));
        let before = demo.camera().unwrap().direction();
        demo.main_loop().unwrap();

        let after = demo.camera().unwrap().direction();
        assert_relative_eq!(before.angle(&after), utils::deg_to_rad(1.0), epsilon = 1e-4);
    }

    #[test]
    fn test_firing_removes_asteroid_in_sights() {
        let mut demo = demo(demo_config(10, 1, vec![vec![KeyCode::V]]));
        let victim = demo.field().bodies()[3].clone();
        demo.engine_mut()
            .scene_mut()
            .camera_mut("MyCamera")
            .unwrap()
            .look_at(victim.position());
        demo.main_loop().unwrap();

        assert!(!demo.field().is_live(victim.id()));
        let scene = demo.engine().scene();
        assert!(!scene.is_node_rendered(victim.node().unwrap()));
        assert!(scene.node(scene.node_by_name("LaserNode").unwrap()).unwrap().is_visible());
        assert!(!scene.node(scene.node_by_name("TargetNode").unwrap()).unwrap().is_visible());
        // Removed, not deleted
        assert_eq!(demo.field().len(), 10);
    }

    #[test]
    fn test_markers_follow_camera() {
        let mut demo = demo(demo_config(0, 1, Vec::new()));
        demo.main_loop().unwrap();

        let camera = demo.camera().unwrap().clone();
        let scene = demo.engine().scene();
        let laser = scene.node(scene.node_by_name("LaserNode").unwrap()).unwrap();
        let target = scene.node(scene.node_by_name("TargetNode").unwrap()).unwrap();

        assert_relative_eq!(laser.position(), camera.position - camera.up(), epsilon = 1e-4);
        assert_relative_eq!(
            target.position(),
            camera.position - camera.up() + camera.direction() * 15.0,
            epsilon = 1e-3
        );
        assert!(!laser.is_visible());
        assert!(target.is_visible());
        assert_relative_eq!(laser.scale(), Vec3::new(0.2, 0.2, 200.0));
    }

    #[test]
    fn test_reset_key_restores_camera() {
        let script = vec![vec![KeyCode::Up, KeyCode::A], vec![KeyCode::R]];
        let mut demo = demo(demo_config(0, 2, script));
        demo.main_loop().unwrap();

        let camera = demo.camera().unwrap();
        assert_relative_eq!(camera.position, Vec3::new(0.0, 0.0, 800.0));
        assert_relative_eq!(camera.orientation, Quat::identity());
        assert_relative_eq!(demo.velocity(), Vec3::zeros());
    }

    #[test]
    fn test_resize_updates_camera_aspect() {
        let config = demo_config(0, 1, Vec::new());
        let mut platform = headless_platform(&config);
        platform.inject_event(WindowEvent::Resized { width: 400, height: 300 });
        let mut demo = AsteroidDemo::init(config, platform).unwrap();
        demo.main_loop().unwrap();

        assert_relative_eq!(demo.camera().unwrap().aspect, 400.0 / 300.0, epsilon = 1e-5);
    }

    #[test]
    fn test_field_needs_meshes() {
        let config = demo_config(3, 1, Vec::new());
        let platform = headless_platform(&config);
        let mut demo = AsteroidDemo::init(config, platform).unwrap();
        demo.create_icosahedron().unwrap();
        assert!(matches!(
            demo.create_asteroid_field(3),
            Err(AppError::Engine(EngineError::NotFound { kind: "mesh", .. }))
        ));
        assert!(demo.field().is_empty());
        assert!(demo.engine().scene().node_by_name("Asteroid0").is_none());

        // Succeeds once the missing mesh is there
        demo.create_cube().unwrap();
        assert_eq!(demo.create_asteroid_field(3).unwrap(), 3);
    }

    #[test]
    fn test_second_field_is_rejected_and_scene_stays_bound() {
        let mut demo = demo(demo_config(3, 1, vec![vec![KeyCode::V]]));
        let before = demo.field().bodies().to_vec();

        assert!(matches!(
            demo.create_asteroid_field(3),
            Err(AppError::Field(FieldError::AlreadyCreated(3)))
        ));
        assert_eq!(demo.field().bodies(), before.as_slice());

        let scene = demo.engine().scene();
        for body in demo.field().bodies() {
            let name = format!("{ASTEROID_PREFIX}{}", body.id().index());
            assert_eq!(body.node(), scene.node_by_name(&name));
        }

        // Firing still clears the asteroid on screen
        let victim = before[1].clone();
        demo.engine_mut()
            .scene_mut()
            .camera_mut("MyCamera")
            .unwrap()
            .look_at(victim.position());
        demo.main_loop().unwrap();
        assert!(!demo.field().is_live(victim.id()));
        assert!(!demo.engine().scene().is_node_rendered(victim.node().unwrap()));
    }

    #[test]
    fn test_empty_field_cannot_be_created_twice() {
        let mut demo = demo(demo_config(0, 1, Vec::new()));
        assert!(matches!(
            demo.create_asteroid_field(2),
            Err(AppError::Field(FieldError::AlreadyCreated(0)))
        ));
        assert!(demo.field().is_empty());
    }
}
