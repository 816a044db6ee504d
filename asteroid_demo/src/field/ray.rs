//! Ray against sphere

use field_engine::foundation::math::Vec3;

/// Discriminant of the ray/sphere intersection
///
/// `(d·v)² − |v|² + r²` where `v = center − origin`. Positive means the
/// infinite line through `origin` along `direction` passes within `radius`
/// of `center`. `direction` must be unit length.
pub fn sphere_discriminant(origin: &Vec3, direction: &Vec3, center: &Vec3, radius: f32) -> f32 {
    let to_center = center - origin;
    let projection = direction.dot(&to_center);
    projection * projection - to_center.magnitude_squared() + radius * radius
}

/// Whether the line through the ray passes strictly within `radius` of `center`
///
/// There is no check that the sphere lies in front of `origin`: a sphere
/// directly behind the origin also counts.
pub fn hits_sphere(origin: &Vec3, direction: &Vec3, center: &Vec3, radius: f32) -> bool {
    sphere_discriminant(origin, direction, center, radius) > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sphere_on_axis_is_hit() {
        let origin = Vec3::new(0.0, 0.0, 1000.0);
        let direction = Vec3::new(0.0, 0.0, -1.0);
        let center = Vec3::new(0.0, 0.0, 500.0);

        assert_relative_eq!(sphere_discriminant(&origin, &direction, &center, 1.0), 1.0);
        assert!(hits_sphere(&origin, &direction, &center, 1.0));
    }

    #[test]
    fn test_sphere_off_axis_is_missed() {
        let origin = Vec3::new(0.0, 0.0, 1000.0);
        let direction = Vec3::new(0.0, 0.0, -1.0);
        let center = Vec3::new(100.0, 0.0, 500.0);

        assert!(sphere_discriminant(&origin, &direction, &center, 1.0) < 0.0);
        assert!(!hits_sphere(&origin, &direction, &center, 1.0));
    }

    #[test]
    fn test_sphere_behind_origin_still_counts() {
        let origin = Vec3::new(0.0, 0.0, 1000.0);
        let direction = Vec3::new(0.0, 0.0, -1.0);
        let behind = Vec3::new(0.0, 0.0, 1500.0);

        assert!(hits_sphere(&origin, &direction, &behind, 1.0));
    }

    #[test]
    fn test_grazing_sphere_is_not_a_hit() {
        let origin = Vec3::zeros();
        let direction = Vec3::new(1.0, 0.0, 0.0);
        let tangent = Vec3::new(10.0, 2.0, 0.0);

        assert_relative_eq!(sphere_discriminant(&origin, &direction, &tangent, 2.0), 0.0);
        assert!(!hits_sphere(&origin, &direction, &tangent, 2.0));
    }
}
