//! Camera system for 3D rendering
//!
//! A free-flying perspective camera described by a position and an
//! orientation quaternion. The camera looks down its local -Z axis with +Y
//! up and +X right. Yaw can be locked to a fixed world axis so the horizon
//! stays level while pitching and yawing.

use crate::foundation::math::{utils, Mat4, Quat, Unit, Vec3};

/// Perspective camera
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,

    /// Camera orientation in world space
    pub orientation: Quat,

    /// World axis yaw rotates about, if locked
    pub fixed_yaw_axis: Option<Unit<Vec3>>,

    /// Vertical field of view in radians
    pub fov: f32,

    /// Aspect ratio (width / height) for projection calculations
    pub aspect: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,
}

impl Camera {
    /// Create a new perspective camera at `position` looking down -Z
    ///
    /// # Arguments
    /// * `position` - Camera position in world space
    /// * `fov_degrees` - Vertical field of view in degrees
    /// * `aspect` - Aspect ratio (width / height) of the viewport
    /// * `near` - Distance to near clipping plane (must be > 0)
    /// * `far` - Distance to far clipping plane (must be > near)
    pub fn perspective(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            orientation: Quat::identity(),
            fixed_yaw_axis: None,
            fov: utils::deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
        }
    }

    /// Update camera position in world space
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        log::trace!("Camera position updated to: {:?}", position);
    }

    /// Replace the camera orientation
    pub fn set_orientation(&mut self, orientation: Quat) {
        self.orientation = orientation;
    }

    /// Lock yaw to a world axis (or unlock with `None`)
    pub fn set_fixed_yaw_axis(&mut self, axis: Option<Vec3>) {
        self.fixed_yaw_axis = axis.map(Unit::new_normalize);
    }

    /// Turn the camera to face `target`
    ///
    /// Keeps the fixed yaw axis as up when one is set, otherwise the
    /// current up vector. Looking straight along the up axis is degenerate
    /// and leaves the orientation unchanged.
    pub fn look_at(&mut self, target: Vec3) {
        let direction = target - self.position;
        if direction.magnitude_squared() <= f32::EPSILON {
            return;
        }

        let up = self.fixed_yaw_axis.map_or_else(|| self.up(), |axis| axis.into_inner());
        if direction.normalize().cross(&up).magnitude_squared() <= f32::EPSILON {
            log::warn!("Camera look_at target lies along the up axis; orientation unchanged");
            return;
        }

        // Local +Z points away from the view direction
        self.orientation = Quat::face_towards(&-direction, &up);
        log::trace!("Camera look_at updated - target: {:?}, up: {:?}", target, up);
    }

    /// Forward (view) direction in world space
    pub fn direction(&self) -> Vec3 {
        self.orientation * -Vec3::z()
    }

    /// Right vector in world space
    pub fn right(&self) -> Vec3 {
        self.orientation * Vec3::x()
    }

    /// Up vector in world space
    pub fn up(&self) -> Vec3 {
        self.orientation * Vec3::y()
    }

    /// Rotate about the local X axis; positive angles look up
    pub fn pitch(&mut self, angle: f32) {
        self.rotate_local(&Vec3::x_axis(), angle);
    }

    /// Rotate about the fixed yaw axis (world space) or the local Y axis;
    /// positive angles turn left
    pub fn yaw(&mut self, angle: f32) {
        match self.fixed_yaw_axis {
            Some(axis) => {
                self.orientation = Quat::from_axis_angle(&axis, angle) * self.orientation;
                self.orientation.renormalize();
            }
            None => self.rotate_local(&Vec3::y_axis(), angle),
        }
    }

    /// Rotate about the local Z (view) axis
    pub fn roll(&mut self, angle: f32) {
        self.rotate_local(&Vec3::z_axis(), angle);
    }

    fn rotate_local(&mut self, axis: &Unit<Vec3>, angle: f32) {
        self.orientation *= Quat::from_axis_angle(axis, angle);
        self.orientation.renormalize();
    }

    /// Update camera aspect ratio for viewport changes
    ///
    /// Only logs aspect ratio changes when the difference is significant
    /// (> 0.01) to reduce log noise during window resize events.
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if (self.aspect - aspect).abs() > 0.01 {
            log::info!("Camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }

    /// World-to-camera transformation
    pub fn view_matrix(&self) -> Mat4 {
        self.orientation.inverse().to_homogeneous() * Mat4::new_translation(&-self.position)
    }

    /// Perspective projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        utils::perspective(self.fov, self.aspect, self.near, self.far)
    }

    /// Ray from the camera position along the view direction (unit length)
    pub fn ray(&self) -> (Vec3, Vec3) {
        (self.position, self.direction())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::perspective(Vec3::zeros(), 45.0, 4.0 / 3.0, 0.1, 1000.0)
    }
}
