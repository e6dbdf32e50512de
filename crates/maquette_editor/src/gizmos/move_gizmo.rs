//! Move gizmo: axis arrows and plane handles.

use glam::Vec3;
use maquette_math::{intersect, Ray};
use maquette_scene::{NodeId, Scene, SceneError};

use super::gizmo::{
    drag_plane_normal, snap_value, Gizmo, GizmoAxis, GizmoKind, Handle, HandleShape,
    AXIS_HIT_RADIUS, AXIS_LENGTH, PLANE_HALF_SIZE, PLANE_OFFSET,
};

/// Translates the selection along an axis or within a plane.
pub struct MoveGizmo {
    drag_plane: Option<Vec3>,
    start_hit: Option<Vec3>,
    emitted: Vec3,
}

impl Default for MoveGizmo {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveGizmo {
    /// Probe order: single axes first, then the plane handles.
    const PROBE_ORDER: [GizmoAxis; 6] = [
        GizmoAxis::X,
        GizmoAxis::Y,
        GizmoAxis::Z,
        GizmoAxis::PlaneXy,
        GizmoAxis::PlaneXz,
        GizmoAxis::PlaneYz,
    ];

    pub fn new() -> Self {
        Self {
            drag_plane: None,
            start_hit: None,
            emitted: Vec3::ZERO,
        }
    }

    fn hit_handle(origin: Vec3, ray: &Ray, scale: f32, axis: GizmoAxis) -> bool {
        if let Some(direction) = axis.direction() {
            return intersect::ray_cylinder(
                ray,
                origin,
                direction,
                AXIS_HIT_RADIUS * scale,
                AXIS_LENGTH * scale,
            )
            .is_some();
        }

        if let Some(normal) = axis.plane_normal() {
            // Quad handle offset from the origin along both plane axes.
            let center = origin + (Vec3::ONE - normal) * PLANE_OFFSET * scale;
            if let Some(t) = intersect::ray_plane(ray, center, normal) {
                let offset = ray.at(t) - center;
                let bound = PLANE_HALF_SIZE * scale;
                let in_bounds = match axis {
                    GizmoAxis::PlaneXy => offset.x.abs() < bound && offset.y.abs() < bound,
                    GizmoAxis::PlaneXz => offset.x.abs() < bound && offset.z.abs() < bound,
                    GizmoAxis::PlaneYz => offset.y.abs() < bound && offset.z.abs() < bound,
                    _ => false,
                };
                return in_bounds;
            }
        }
        false
    }

    /// Constrain a free plane-space delta to the active handle.
    fn constrain(axis: GizmoAxis, raw: Vec3) -> Vec3 {
        match axis {
            GizmoAxis::X => Vec3::new(raw.x, 0.0, 0.0),
            GizmoAxis::Y => Vec3::new(0.0, raw.y, 0.0),
            GizmoAxis::Z => Vec3::new(0.0, 0.0, raw.z),
            GizmoAxis::PlaneXy => Vec3::new(raw.x, raw.y, 0.0),
            GizmoAxis::PlaneXz => Vec3::new(raw.x, 0.0, raw.z),
            GizmoAxis::PlaneYz => Vec3::new(0.0, raw.y, raw.z),
            _ => Vec3::ZERO,
        }
    }
}

impl Gizmo for MoveGizmo {
    fn kind(&self) -> GizmoKind {
        GizmoKind::Move
    }

    fn hit_axis(&self, origin: Vec3, ray: &Ray, scale: f32) -> Option<GizmoAxis> {
        Self::PROBE_ORDER
            .into_iter()
            .find(|&axis| Self::hit_handle(origin, ray, scale, axis))
    }

    fn begin_drag(&mut self, axis: GizmoAxis, origin: Vec3, ray: &Ray) {
        self.emitted = Vec3::ZERO;
        // The plane is fixed for the whole drag so the projection does
        // not wander as the ray tilts.
        self.drag_plane = drag_plane_normal(axis, ray.direction);
        self.start_hit = self
            .drag_plane
            .and_then(|normal| intersect::ray_plane(ray, origin, normal))
            .map(|t| ray.at(t));
    }

    fn drag_delta(
        &mut self,
        axis: GizmoAxis,
        origin: Vec3,
        ray: &Ray,
        snap: Option<f32>,
    ) -> Option<Vec3> {
        let normal = self.drag_plane?;
        let start = self.start_hit?;
        let t = intersect::ray_plane(ray, origin, normal)?;
        let raw = Self::constrain(axis, ray.at(t) - start);

        let snapped = match snap {
            Some(step) => Vec3::new(
                snap_value(raw.x, step),
                snap_value(raw.y, step),
                snap_value(raw.z, step),
            ),
            None => raw,
        };

        let delta = snapped - self.emitted;
        self.emitted = snapped;
        Some(delta)
    }

    fn apply_delta(
        &self,
        scene: &mut Scene,
        node: NodeId,
        delta: Vec3,
    ) -> Result<(), SceneError> {
        let position = scene
            .node(node)
            .ok_or(SceneError::NodeNotFound(node))?
            .position();
        scene.set_position(node, position + delta)
    }

    fn end_drag(&mut self) {
        self.drag_plane = None;
        self.start_hit = None;
        self.emitted = Vec3::ZERO;
    }

    fn handles(&self, origin: Vec3, scale: f32) -> Vec<Handle> {
        let mut handles = Vec::with_capacity(6);
        for axis in [GizmoAxis::X, GizmoAxis::Y, GizmoAxis::Z] {
            let direction = axis.direction().unwrap_or(Vec3::ZERO);
            handles.push(Handle {
                axis,
                shape: HandleShape::Segment {
                    start: origin,
                    end: origin + direction * AXIS_LENGTH * scale,
                },
            });
        }
        for axis in [GizmoAxis::PlaneXy, GizmoAxis::PlaneXz, GizmoAxis::PlaneYz] {
            let normal = axis.plane_normal().unwrap_or(Vec3::Y);
            handles.push(Handle {
                axis,
                shape: HandleShape::Quad {
                    center: origin + (Vec3::ONE - normal) * PLANE_OFFSET * scale,
                    normal,
                    half_size: PLANE_HALF_SIZE * scale,
                },
            });
        }
        handles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maquette_scene::Node;

    #[test]
    fn test_hit_x_arm() {
        let gizmo = MoveGizmo::new();
        let ray = Ray::new(Vec3::new(1.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(gizmo.hit_axis(Vec3::ZERO, &ray, 1.0), Some(GizmoAxis::X));
    }

    #[test]
    fn test_hit_respects_origin() {
        let gizmo = MoveGizmo::new();
        let origin = Vec3::new(10.0, 0.0, 0.0);
        let ray = Ray::new(Vec3::new(11.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(gizmo.hit_axis(origin, &ray, 1.0), Some(GizmoAxis::X));

        let miss = Ray::new(Vec3::new(1.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(gizmo.hit_axis(origin, &miss, 1.0), None);
    }

    #[test]
    fn test_hit_plane_handle() {
        let gizmo = MoveGizmo::new();
        let ray = Ray::new(Vec3::new(0.4, 0.4, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(
            gizmo.hit_axis(Vec3::ZERO, &ray, 1.0),
            Some(GizmoAxis::PlaneXy)
        );
    }

    #[test]
    fn test_drag_constrained_to_x() {
        let mut gizmo = MoveGizmo::new();
        let down = Vec3::new(0.0, -1.0, 0.0);
        gizmo.begin_drag(
            GizmoAxis::X,
            Vec3::ZERO,
            &Ray::new(Vec3::new(1.0, 5.0, 0.0), down),
        );

        // Mouse moved one unit along +x (and some off-axis noise in z).
        let delta = gizmo
            .drag_delta(
                GizmoAxis::X,
                Vec3::ZERO,
                &Ray::new(Vec3::new(2.0, 5.0, 0.3), down),
                None,
            )
            .unwrap();
        assert!((delta - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_drag_deltas_are_incremental() {
        let mut gizmo = MoveGizmo::new();
        let down = Vec3::new(0.0, -1.0, 0.0);
        gizmo.begin_drag(
            GizmoAxis::X,
            Vec3::ZERO,
            &Ray::new(Vec3::new(1.0, 5.0, 0.0), down),
        );

        let first = gizmo
            .drag_delta(
                GizmoAxis::X,
                Vec3::ZERO,
                &Ray::new(Vec3::new(1.5, 5.0, 0.0), down),
                None,
            )
            .unwrap();
        let second = gizmo
            .drag_delta(
                GizmoAxis::X,
                Vec3::ZERO,
                &Ray::new(Vec3::new(2.0, 5.0, 0.0), down),
                None,
            )
            .unwrap();
        assert!((first.x - 0.5).abs() < 1e-4);
        assert!((second.x - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_drag_snap_accumulates_on_boundaries() {
        let mut gizmo = MoveGizmo::new();
        let down = Vec3::new(0.0, -1.0, 0.0);
        gizmo.begin_drag(
            GizmoAxis::X,
            Vec3::ZERO,
            &Ray::new(Vec3::new(1.0, 5.0, 0.0), down),
        );

        // 0.2 of accumulated drag rounds to zero at snap 0.5.
        let small = gizmo
            .drag_delta(
                GizmoAxis::X,
                Vec3::ZERO,
                &Ray::new(Vec3::new(1.2, 5.0, 0.0), down),
                Some(0.5),
            )
            .unwrap();
        assert_eq!(small, Vec3::ZERO);

        // 0.4 accumulated rounds to 0.5; the increment is the full step.
        let step = gizmo
            .drag_delta(
                GizmoAxis::X,
                Vec3::ZERO,
                &Ray::new(Vec3::new(1.4, 5.0, 0.0), down),
                Some(0.5),
            )
            .unwrap();
        assert!((step.x - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_apply_delta_moves_node() {
        let mut scene = Scene::new("Test");
        let node = scene.add_node(Node::new("Cube"));
        let gizmo = MoveGizmo::new();
        gizmo
            .apply_delta(&mut scene, node, Vec3::new(1.0, 0.0, 0.0))
            .unwrap();
        gizmo
            .apply_delta(&mut scene, node, Vec3::new(0.5, 0.0, 0.0))
            .unwrap();
        assert_eq!(
            scene.node(node).unwrap().position(),
            Vec3::new(1.5, 0.0, 0.0)
        );
    }

    #[test]
    fn test_degenerate_ray_is_noop() {
        let mut gizmo = MoveGizmo::new();
        gizmo.begin_drag(
            GizmoAxis::X,
            Vec3::ZERO,
            &Ray::new(Vec3::new(1.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0)),
        );
        let degenerate = Ray::new(Vec3::ZERO, Vec3::ZERO);
        assert!(gizmo
            .drag_delta(GizmoAxis::X, Vec3::ZERO, &degenerate, None)
            .is_none());
    }
}
