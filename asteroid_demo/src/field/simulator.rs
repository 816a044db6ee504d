//! The asteroid field itself

use nalgebra::{Quaternion, UnitQuaternion};
use rand::Rng;

use super::{hits_sphere, Body, BodyId, FieldError};
use crate::config::FieldConfig;
use field_engine::foundation::math::{constants::PI, Quat, Vec3};
use field_engine::scene::{NodeId, Presentation};
use field_engine::EngineError;

/// Fixed-capacity collection of asteroid bodies
///
/// Starts empty; [`AsteroidField::populate`] fills it. Body ids are slot
/// indices and stay valid until the next populate.
#[derive(Debug, Clone)]
pub struct AsteroidField {
    config: FieldConfig,
    bodies: Vec<Body>,
    ticks: u64,
}

impl AsteroidField {
    /// Create an empty field
    pub fn new(config: FieldConfig) -> Self {
        Self {
            bodies: Vec::with_capacity(config.capacity),
            config,
            ticks: 0,
        }
    }

    /// Settings the field runs with
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Replace all bodies with `count` random ones, clamped to capacity
    ///
    /// Positions are uniform in the spawn box, orientations and per-tick
    /// spins are random rotations built from `(1, x, y, z)` quaternions and
    /// normalized. Returns the number of bodies created.
    pub fn populate<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) -> usize {
        let count = if count > self.config.capacity {
            log::warn!(
                "Requested {} asteroids but capacity is {}; clamping",
                count,
                self.config.capacity
            );
            self.config.capacity
        } else {
            count
        };

        let FieldConfig {
            half_width,
            depth,
            max_spin,
            max_drift,
            ..
        } = self.config;

        self.bodies.clear();
        self.ticks = 0;
        for index in 0..count {
            let position = Vec3::new(
                -half_width + 2.0 * half_width * rng.gen::<f32>(),
                -half_width + 2.0 * half_width * rng.gen::<f32>(),
                depth * rng.gen::<f32>(),
            );
            let orientation = random_rotation(rng, PI);
            let angular_increment = random_rotation(rng, max_spin * PI);
            let drift = Vec3::new(
                max_drift * rng.gen::<f32>(),
                max_drift * rng.gen::<f32>(),
                max_drift * rng.gen::<f32>(),
            );
            self.bodies
                .push(Body::new(BodyId(index), position, orientation, angular_increment, drift));
        }

        log::info!("Populated asteroid field with {} bodies", count);
        count
    }

    /// Add one body with explicit state; `None` when the field is full
    pub fn add_body(&mut self, position: Vec3, orientation: Quat, angular_increment: Quat, drift: Vec3) -> Option<BodyId> {
        if self.bodies.len() >= self.config.capacity {
            log::warn!("Asteroid field is full ({} bodies)", self.config.capacity);
            return None;
        }
        let id = BodyId(self.bodies.len());
        self.bodies
            .push(Body::new(id, position, orientation, angular_increment, drift));
        Some(id)
    }

    /// Advance every body one step, removed ones included
    pub fn advance_tick(&mut self) {
        let renormalize = self.config.renormalize_orientation;
        let apply_drift = self.config.apply_drift;
        for body in &mut self.bodies {
            body.advance(renormalize, apply_drift);
        }
        self.ticks += 1;
    }

    /// Remove every live body the laser line passes through
    ///
    /// `direction` must be unit length. Bodies behind `origin` on the same
    /// line are hit as well. Returns the removed ids in ascending order.
    pub fn hit_test(&mut self, origin: Vec3, direction: Vec3, radius: f32) -> Vec<BodyId> {
        let mut hits = Vec::new();
        for body in self.bodies.iter_mut().filter(|b| b.live) {
            if hits_sphere(&origin, &direction, &body.position, radius) {
                body.live = false;
                hits.push(body.id);
            }
        }
        if !hits.is_empty() {
            log::debug!("Laser hit {} asteroid(s): {:?}", hits.len(), hits);
        }
        hits
    }

    /// Associate a body with the scene node presenting it
    pub fn bind_node(&mut self, id: BodyId, node: NodeId) -> Result<(), FieldError> {
        let body = self.bodies.get_mut(id.0).ok_or(FieldError::UnknownBody(id))?;
        body.node = Some(node);
        Ok(())
    }

    /// Push the position and orientation of every bound body
    ///
    /// Removed bodies are pushed too; their nodes have nothing attached.
    pub fn present<P: Presentation + ?Sized>(&self, presentation: &mut P) -> Result<(), EngineError> {
        for body in &self.bodies {
            if let Some(node) = body.node {
                presentation.set_node_transform(node, body.position, body.orientation)?;
            }
        }
        Ok(())
    }

    /// Number of bodies, live or removed
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether the field has no bodies
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Maximum number of bodies
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Number of bodies still in play
    pub fn live_count(&self) -> usize {
        self.bodies.iter().filter(|b| b.live).count()
    }

    /// Whether a body exists and is still in play
    pub fn is_live(&self, id: BodyId) -> bool {
        self.body(id).is_some_and(Body::is_live)
    }

    /// Look up a body
    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    /// All bodies in id order
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Ticks since the last populate
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }
}

/// Rotation from the quaternion `(1, a, b, c)` with each of a, b, c uniform in `[0, scale)`
fn random_rotation<R: Rng + ?Sized>(rng: &mut R, scale: f32) -> Quat {
    UnitQuaternion::from_quaternion(Quaternion::new(
        1.0,
        scale * rng.gen::<f32>(),
        scale * rng.gen::<f32>(),
        scale * rng.gen::<f32>(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use field_engine::scene::SceneManager;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn field_with_capacity(capacity: usize) -> AsteroidField {
        AsteroidField::new(FieldConfig {
            capacity,
            ..FieldConfig::default()
        })
    }

    fn still_body(field: &mut AsteroidField, position: Vec3) -> BodyId {
        field
            .add_body(position, Quat::identity(), Quat::identity(), Vec3::zeros())
            .unwrap()
    }

    #[test]
    fn test_populate_clamps_to_capacity() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut field = field_with_capacity(1500);

        assert_eq!(field.populate(2000, &mut rng), 1500);
        assert_eq!(field.len(), 1500);
        assert_eq!(field.live_count(), 1500);

        assert_eq!(field.populate(10, &mut rng), 10);
        assert_eq!(field.len(), 10);
    }

    #[test]
    fn test_populate_stays_in_spawn_box() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut field = field_with_capacity(500);
        field.populate(500, &mut rng);

        for body in field.bodies() {
            let p = body.position();
            assert!((-300.0..=300.0).contains(&p.x) && (-300.0..=300.0).contains(&p.y));
            assert!((0.0..=600.0).contains(&p.z));
            assert!(body.drift().iter().all(|d| (0.0..0.2).contains(d)));
            assert_relative_eq!(body.orientation().quaternion().norm(), 1.0, epsilon = 1e-5);
            // Spins are small: at most ~0.5% of pi per axis
            assert!(body.angular_increment().angle() < 0.1);
        }
    }

    #[test]
    fn test_same_seed_same_field() {
        let mut a = field_with_capacity(50);
        let mut b = field_with_capacity(50);
        a.populate(50, &mut StdRng::seed_from_u64(9));
        b.populate(50, &mut StdRng::seed_from_u64(9));
        assert_eq!(a.bodies(), b.bodies());
    }

    #[test]
    fn test_ticks_keep_count_and_unit_orientation() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut field = field_with_capacity(1500);
        field.populate(20, &mut rng);

        for _ in 0..10_000 {
            field.advance_tick();
        }
        assert_eq!(field.len(), 20);
        assert_eq!(field.tick_count(), 10_000);
        for body in field.bodies() {
            assert_relative_eq!(body.orientation().quaternion().norm(), 1.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_tick_composes_increment_on_the_left() {
        let mut field = field_with_capacity(4);
        let orientation = Quat::from_axis_angle(&Vec3::x_axis(), 0.3);
        let increment = Quat::from_axis_angle(&Vec3::y_axis(), 0.01);
        let id = field
            .add_body(Vec3::zeros(), orientation, increment, Vec3::zeros())
            .unwrap();

        field.advance_tick();
        let expected = increment * orientation;
        assert_relative_eq!(field.body(id).unwrap().orientation(), expected, epsilon = 1e-6);
    }

    #[test]
    fn test_renormalization_follows_config() {
        // Slightly off unit length, as after long accumulation
        let skewed = Quat::new_unchecked(Quaternion::new(1.1, 0.0, 0.0, 0.0));
        let tick_once = |renormalize_orientation: bool| {
            let mut field = AsteroidField::new(FieldConfig {
                capacity: 1,
                renormalize_orientation,
                ..FieldConfig::default()
            });
            let id = field
                .add_body(Vec3::zeros(), skewed, Quat::identity(), Vec3::zeros())
                .unwrap();
            field.advance_tick();
            field.body(id).unwrap().orientation().quaternion().norm()
        };

        assert_relative_eq!(tick_once(true), 1.0, epsilon = 1e-6);
        assert_relative_eq!(tick_once(false), 1.1, epsilon = 1e-6);
    }

    #[test]
    fn test_drift_only_when_enabled() {
        let drift = Vec3::new(0.1, 0.0, 0.05);
        let mut still = field_with_capacity(1);
        let id = still.add_body(Vec3::zeros(), Quat::identity(), Quat::identity(), drift).unwrap();
        still.advance_tick();
        assert_relative_eq!(still.body(id).unwrap().position(), Vec3::zeros());

        let mut drifting = AsteroidField::new(FieldConfig {
            capacity: 1,
            apply_drift: true,
            ..FieldConfig::default()
        });
        let id = drifting.add_body(Vec3::zeros(), Quat::identity(), Quat::identity(), drift).unwrap();
        drifting.advance_tick();
        drifting.advance_tick();
        assert_relative_eq!(drifting.body(id).unwrap().position(), drift * 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_hit_test_scenario() {
        let mut field = field_with_capacity(10);
        let on_axis = still_body(&mut field, Vec3::new(0.0, 0.0, 500.0));
        let off_axis = still_body(&mut field, Vec3::new(100.0, 0.0, 500.0));
        let behind = still_body(&mut field, Vec3::new(0.0, 0.0, 1500.0));

        let hits = field.hit_test(Vec3::new(0.0, 0.0, 1000.0), Vec3::new(0.0, 0.0, -1.0), 1.0);
        assert_eq!(hits, vec![on_axis, behind]);
        assert!(!field.is_live(on_axis));
        assert!(field.is_live(off_axis));
        assert_eq!(field.live_count(), 1);
        assert_eq!(field.len(), 3);
    }

    #[test]
    fn test_removed_bodies_are_not_hit_twice() {
        let mut field = field_with_capacity(10);
        still_body(&mut field, Vec3::new(0.0, 0.0, 500.0));
        let origin = Vec3::new(0.0, 0.0, 1000.0);
        let direction = Vec3::new(0.0, 0.0, -1.0);

        assert_eq!(field.hit_test(origin, direction, 1.0).len(), 1);
        assert!(field.hit_test(origin, direction, 1.0).is_empty());
    }

    #[test]
    fn test_add_body_respects_capacity() {
        let mut field = field_with_capacity(1);
        assert!(field.add_body(Vec3::zeros(), Quat::identity(), Quat::identity(), Vec3::zeros()).is_some());
        assert!(field.add_body(Vec3::zeros(), Quat::identity(), Quat::identity(), Vec3::zeros()).is_none());
    }

    #[test]
    fn test_bind_unknown_body_fails() {
        let mut scene = SceneManager::new();
        let node = scene.create_child_node(scene.root(), "Asteroid0").unwrap();
        let mut field = field_with_capacity(1);
        assert_eq!(field.bind_node(BodyId(0), node), Err(FieldError::UnknownBody(BodyId(0))));
    }

    #[test]
    fn test_removed_body_leaves_render_queue_but_keeps_spinning() {
        let mut scene = SceneManager::new();
        scene
            .meshes_mut()
            .build_mesh("Icosahedron", &crate::geometry::icosahedron())
            .unwrap();
        let mut field = field_with_capacity(4);
        let spin = Quat::from_axis_angle(&Vec3::z_axis(), 0.05);
        let id = field
            .add_body(Vec3::new(0.0, 0.0, 500.0), Quat::identity(), spin, Vec3::zeros())
            .unwrap();

        let root = scene.root();
        let node = scene.create_child_node(root, "Asteroid0").unwrap();
        let entity = scene.create_entity("Asteroid0", "Icosahedron").unwrap();
        scene.attach_object(node, entity).unwrap();
        field.bind_node(id, node).unwrap();
        field.present(&mut scene).unwrap();
        assert!(scene.render_queue().contains_node(node));

        for hit in field.hit_test(Vec3::new(0.0, 0.0, 1000.0), Vec3::new(0.0, 0.0, -1.0), 1.0) {
            let hit_node = field.body(hit).and_then(Body::node).unwrap();
            scene.detach_node(hit_node).unwrap();
        }

        let before = field.body(id).unwrap().orientation();
        field.advance_tick();
        field.present(&mut scene).unwrap();

        let after = field.body(id).unwrap().orientation();
        assert!(before.angle_to(&after) > 0.01);
        assert_relative_eq!(scene.node(node).unwrap().orientation(), after, epsilon = 1e-6);
        assert!(!scene.render_queue().contains_node(node));
        assert!(!scene.is_node_rendered(node));
    }
}
