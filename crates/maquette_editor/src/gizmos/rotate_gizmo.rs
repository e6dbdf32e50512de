//! Rotate gizmo: one ring per axis.

use glam::Vec3;
use maquette_math::{intersect, Ray};
use maquette_scene::{NodeId, Scene, SceneError};

use super::gizmo::{
    snap_value, Gizmo, GizmoAxis, GizmoKind, Handle, HandleShape, RING_RADIUS, RING_THICKNESS,
};

/// Rotates the selection around an axis by the angle swept in the
/// ring's plane.
pub struct RotateGizmo {
    start_angle: f32,
    emitted_angle: f32,
}

impl Default for RotateGizmo {
    fn default() -> Self {
        Self::new()
    }
}

impl RotateGizmo {
    const PROBE_ORDER: [GizmoAxis; 3] = [GizmoAxis::X, GizmoAxis::Y, GizmoAxis::Z];

    pub fn new() -> Self {
        Self {
            start_angle: 0.0,
            emitted_angle: 0.0,
        }
    }

    /// Angle of a point around the ring, measured in the ring's plane.
    fn ring_angle(axis: GizmoAxis, offset: Vec3) -> f32 {
        match axis {
            GizmoAxis::X => offset.y.atan2(offset.z),
            GizmoAxis::Y => offset.x.atan2(offset.z),
            GizmoAxis::Z => offset.x.atan2(offset.y),
            _ => 0.0,
        }
    }

    /// Wrap to (-PI, PI] so a drag crossing the seam stays continuous.
    fn wrap_angle(angle: f32) -> f32 {
        let wrapped = (angle + std::f32::consts::PI).rem_euclid(std::f32::consts::TAU);
        wrapped - std::f32::consts::PI
    }
}

impl Gizmo for RotateGizmo {
    fn kind(&self) -> GizmoKind {
        GizmoKind::Rotate
    }

    fn hit_axis(&self, origin: Vec3, ray: &Ray, scale: f32) -> Option<GizmoAxis> {
        Self::PROBE_ORDER.into_iter().find(|&axis| {
            let Some(normal) = axis.direction() else {
                return false;
            };
            intersect::ray_ring(
                ray,
                origin,
                normal,
                RING_RADIUS * scale,
                RING_THICKNESS * scale,
            )
            .is_some()
        })
    }

    fn begin_drag(&mut self, axis: GizmoAxis, origin: Vec3, ray: &Ray) {
        self.start_angle = 0.0;
        self.emitted_angle = 0.0;
        if let Some(normal) = axis.direction() {
            if let Some(t) = intersect::ray_plane(ray, origin, normal) {
                self.start_angle = Self::ring_angle(axis, ray.at(t) - origin);
            }
        }
    }

    fn drag_delta(
        &mut self,
        axis: GizmoAxis,
        origin: Vec3,
        ray: &Ray,
        snap: Option<f32>,
    ) -> Option<Vec3> {
        let normal = axis.direction()?;
        let t = intersect::ray_plane(ray, origin, normal)?;
        let current = Self::ring_angle(axis, ray.at(t) - origin);
        let raw = Self::wrap_angle(current - self.start_angle);

        // Snap values arrive in degrees.
        let snapped = match snap {
            Some(step) => snap_value(raw, step.to_radians()),
            None => raw,
        };

        let delta_angle = snapped - self.emitted_angle;
        self.emitted_angle = snapped;
        Some(normal * delta_angle)
    }

    fn apply_delta(
        &self,
        scene: &mut Scene,
        node: NodeId,
        delta: Vec3,
    ) -> Result<(), SceneError> {
        let rotation = scene
            .node(node)
            .ok_or(SceneError::NodeNotFound(node))?
            .rotation();
        scene.set_rotation(node, rotation + delta)
    }

    fn end_drag(&mut self) {
        self.start_angle = 0.0;
        self.emitted_angle = 0.0;
    }

    fn handles(&self, origin: Vec3, scale: f32) -> Vec<Handle> {
        Self::PROBE_ORDER
            .into_iter()
            .map(|axis| Handle {
                axis,
                shape: HandleShape::Ring {
                    center: origin,
                    normal: axis.direction().unwrap_or(Vec3::Y),
                    radius: RING_RADIUS * scale,
                },
            })
            .collect()
    }
}
