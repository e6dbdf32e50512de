//! Camera contract for picking, plus a standalone orbit camera.

use glam::{Mat4, Vec2, Vec3};
use maquette_math::Ray;

/// The view/projection state the picking code needs from whatever
/// camera the shell drives.
///
/// Coordinates are normalized device coordinates in `[-1, 1]` with +y
/// up; the [`crate::PickingManager`] handles the pixel conversion.
pub trait ViewCamera {
    /// Ray through the given NDC point, from near plane into the scene.
    fn viewport_ray(&self, ndc: Vec2) -> Ray;

    /// Project a world position to NDC; `None` when it lies behind the
    /// camera.
    fn project(&self, world: Vec3) -> Option<Vec2>;
}

/// A perspective camera orbiting a focus point.
///
/// Yaw/pitch/distance around a focus, the usual editor viewport model.
/// Implements [`ViewCamera`] so the editing core is usable and testable
/// without a rendering backend.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    pub focus: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            focus: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.5,
            distance: 5.0,
            fov_y: 45.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Camera looking at `focus` from the given distance along +Z.
    pub fn looking_at(focus: Vec3, distance: f32) -> Self {
        Self {
            focus,
            distance,
            pitch: 0.0,
            ..Self::default()
        }
    }

    /// Eye position derived from yaw/pitch/distance.
    pub fn eye(&self) -> Vec3 {
        let dir = Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        );
        self.focus + dir * self.distance
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.focus, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

impl ViewCamera for OrbitCamera {
    fn viewport_ray(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection().inverse();
        // perspective_rh maps depth to [0, 1]; unproject a point on the
        // near plane and one further in to get the ray.
        let near_point = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
        let far_point = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 0.5));
        Ray::from_points(near_point, far_point)
    }

    fn project(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(ndc.x, ndc.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_ray_points_at_focus() {
        let camera = OrbitCamera::default();
        let ray = camera.viewport_ray(Vec2::ZERO);

        let to_focus = (camera.focus - camera.eye()).normalize();
        assert!((ray.direction - to_focus).length() < 1e-3);
        assert!((ray.origin - camera.eye()).length() < camera.near * 2.0 + 1e-2);
    }

    #[test]
    fn test_project_focus_lands_at_center() {
        let camera = OrbitCamera::default();
        let ndc = camera.project(camera.focus).unwrap();
        assert!(ndc.length() < 1e-4);
    }

    #[test]
    fn test_project_behind_camera_is_none() {
        let camera = OrbitCamera::looking_at(Vec3::ZERO, 5.0);
        // Eye is at +Z looking toward the origin; a point further out
        // behind the eye cannot be projected.
        let behind = camera.eye() + Vec3::Z * 10.0;
        assert!(camera.project(behind).is_none());
    }

    #[test]
    fn test_ray_and_project_round_trip() {
        let camera = OrbitCamera::default();
        let ndc = Vec2::new(0.3, -0.2);
        let ray = camera.viewport_ray(ndc);
        let sample = ray.at(4.0);
        let back = camera.project(sample).unwrap();
        assert!((back - ndc).length() < 1e-3);
    }
}
