//! 3D ray for picking and gizmo hit testing.

use glam::{Mat4, Vec3};

/// A ray with an origin and a direction.
///
/// The constructor normalizes the direction. A zero-length direction is
/// kept as-is and reported by [`Ray::is_valid`]; intersection routines
/// treat such a ray as missing everything instead of producing NaNs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// Ray origin point
    pub origin: Vec3,
    /// Ray direction (normalized when valid)
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray, normalizing the direction if it has length.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        let len_sq = direction.length_squared();
        let direction = if len_sq > 1e-12 {
            direction / len_sq.sqrt()
        } else {
            direction
        };
        Self { origin, direction }
    }

    /// Create a ray through two points.
    #[inline]
    pub fn from_points(start: Vec3, end: Vec3) -> Self {
        Self::new(start, end - start)
    }

    /// Get the point at parametric distance `t` along the ray.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Get the component-wise inverse direction, used by the slab
    /// AABB test.
    #[inline]
    pub fn inverse_direction(&self) -> Vec3 {
        Vec3::new(
            1.0 / self.direction.x,
            1.0 / self.direction.y,
            1.0 / self.direction.z,
        )
    }

    /// Whether the direction is usable (finite and non-zero).
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.direction.is_finite() && self.direction.length_squared() > 1e-10
    }

    /// Transform the ray by a matrix; the origin as a point, the
    /// direction as a vector.
    pub fn transform(&self, matrix: &Mat4) -> Self {
        Self::new(
            matrix.transform_point3(self.origin),
            matrix.transform_vector3(self.direction),
        )
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            direction: Vec3::Z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_direction_normalized() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0));
        assert!((ray.direction.length() - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let point = ray.at(5.0);
        assert!((point.z - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_zero_direction_is_invalid_not_nan() {
        let ray = Ray::new(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO);
        assert!(!ray.is_valid());
        assert!(ray.direction.is_finite());
        assert_eq!(ray.direction, Vec3::ZERO);
    }

    #[test]
    fn test_ray_from_points() {
        let ray = Ray::from_points(Vec3::ZERO, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(ray.origin, Vec3::ZERO);
        assert!((ray.direction.z - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_ray_inverse_direction() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(2.0, 4.0, 8.0).normalize());
        let inv = ray.inverse_direction();
        assert!((ray.direction.x * inv.x - 1.0).abs() < 0.001);
        assert!((ray.direction.y * inv.y - 1.0).abs() < 0.001);
        assert!((ray.direction.z * inv.z - 1.0).abs() < 0.001);
    }
}
