//! Scale gizmo: axis handles plus a center handle for uniform scale.

use glam::Vec3;
use maquette_math::{intersect, Ray};
use maquette_scene::{NodeId, Scene, SceneError};

use super::gizmo::{
    drag_plane_normal, snap_value, Gizmo, GizmoAxis, GizmoKind, Handle, HandleShape,
    AXIS_HIT_RADIUS, AXIS_LENGTH, CENTER_RADIUS, SCALE_SENSITIVITY,
};

/// Smallest factor a drag can scale down to; prevents zero or negative
/// scale from a wild drag.
const MIN_FACTOR: f32 = 0.01;

/// Scales the selection along an axis, or uniformly from the center
/// handle.
pub struct ScaleGizmo {
    drag_plane: Option<Vec3>,
    start_hit: Option<Vec3>,
    emitted_factor: Vec3,
}

impl Default for ScaleGizmo {
    fn default() -> Self {
        Self::new()
    }
}

impl ScaleGizmo {
    const PROBE_ORDER: [GizmoAxis; 4] =
        [GizmoAxis::X, GizmoAxis::Y, GizmoAxis::Z, GizmoAxis::All];

    pub fn new() -> Self {
        Self {
            drag_plane: None,
            start_hit: None,
            emitted_factor: Vec3::ONE,
        }
    }

    /// Cumulative scale factor for the drag offset `d`.
    fn cumulative_factor(axis: GizmoAxis, d: Vec3, snap: Option<f32>) -> Option<Vec3> {
        let raw = match axis {
            GizmoAxis::X => 1.0 + d.x * SCALE_SENSITIVITY,
            GizmoAxis::Y => 1.0 + d.y * SCALE_SENSITIVITY,
            GizmoAxis::Z => 1.0 + d.z * SCALE_SENSITIVITY,
            GizmoAxis::All => {
                // Uniform handle: magnitude of the drag, signed by its
                // overall direction.
                let sign = if d.x + d.y + d.z >= 0.0 { 1.0 } else { -1.0 };
                1.0 + d.length() * SCALE_SENSITIVITY * sign
            }
            _ => return None,
        };

        let factor = match snap {
            Some(step) => snap_value(raw, step),
            None => raw,
        }
        .max(MIN_FACTOR);

        Some(match axis {
            GizmoAxis::X => Vec3::new(factor, 1.0, 1.0),
            GizmoAxis::Y => Vec3::new(1.0, factor, 1.0),
            GizmoAxis::Z => Vec3::new(1.0, 1.0, factor),
            _ => Vec3::splat(factor),
        })
    }
}

impl Gizmo for ScaleGizmo {
    fn kind(&self) -> GizmoKind {
        GizmoKind::Scale
    }

    fn hit_axis(&self, origin: Vec3, ray: &Ray, scale: f32) -> Option<GizmoAxis> {
        Self::PROBE_ORDER.into_iter().find(|&axis| match axis {
            GizmoAxis::All => {
                intersect::ray_sphere(ray, origin, CENTER_RADIUS * scale).is_some()
            }
            _ => axis.direction().is_some_and(|direction| {
                intersect::ray_cylinder(
                    ray,
                    origin,
                    direction,
                    AXIS_HIT_RADIUS * scale,
                    AXIS_LENGTH * scale,
                )
                .is_some()
            }),
        })
    }

    fn begin_drag(&mut self, axis: GizmoAxis, origin: Vec3, ray: &Ray) {
        self.emitted_factor = Vec3::ONE;
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
        let cumulative = Self::cumulative_factor(axis, ray.at(t) - start, snap)?;

        // The scene applies `scale * (1 + delta)` per move, so emit the
        // multiplicative step from the last emitted factor.
        let delta = cumulative / self.emitted_factor - Vec3::ONE;
        self.emitted_factor = cumulative;
        Some(delta)
    }

    fn apply_delta(
        &self,
        scene: &mut Scene,
        node: NodeId,
        delta: Vec3,
    ) -> Result<(), SceneError> {
        let scale = scene
            .node(node)
            .ok_or(SceneError::NodeNotFound(node))?
            .scale();
        scene.set_scale(node, scale * (Vec3::ONE + delta))
    }

    fn end_drag(&mut self) {
        self.drag_plane = None;
        self.start_hit = None;
        self.emitted_factor = Vec3::ONE;
    }

    fn handles(&self, origin: Vec3, scale: f32) -> Vec<Handle> {
        let mut handles = Vec::with_capacity(7);
        for axis in [GizmoAxis::X, GizmoAxis::Y, GizmoAxis::Z] {
            let direction = axis.direction().unwrap_or(Vec3::ZERO);
            let end = origin + direction * AXIS_LENGTH * scale;
            handles.push(Handle {
                axis,
                shape: HandleShape::Segment { start: origin, end },
            });
            handles.push(Handle {
                axis,
                shape: HandleShape::Cube {
                    center: end,
                    half_size: AXIS_HIT_RADIUS * scale,
                },
            });
        }
        handles.push(Handle {
            axis: GizmoAxis::All,
            shape: HandleShape::Sphere {
                center: origin,
                radius: CENTER_RADIUS * scale,
            },
        });
        handles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maquette_scene::Node;

    #[test]
    fn test_hit_axis_handle() {
        let gizmo = ScaleGizmo::new();
        let ray = Ray::new(Vec3::new(0.0, 5.0, 1.5), Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(gizmo.hit_axis(Vec3::ZERO, &ray, 1.0), Some(GizmoAxis::Z));
    }

    #[test]
    fn test_hit_center_sphere_offside_of_arms() {
        let gizmo = ScaleGizmo::new();
        // Passes within the center sphere but outside every arm's pick
        // radius.
        let ray = Ray::new(Vec3::new(0.12, 5.0, 0.12), Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(gizmo.hit_axis(Vec3::ZERO, &ray, 1.0), Some(GizmoAxis::All));
    }

    #[test]
    fn test_axis_drag_multiplies_only_that_axis() {
        let mut gizmo = ScaleGizmo::new();
        let down = Vec3::new(0.0, -1.0, 0.0);
        gizmo.begin_drag(
            GizmoAxis::X,
            Vec3::ZERO,
            &Ray::new(Vec3::new(2.0, 5.0, 0.0), down),
        );

        // One unit of drag along +x: factor 1.5.
        let delta = gizmo
            .drag_delta(
                GizmoAxis::X,
                Vec3::ZERO,
                &Ray::new(Vec3::new(3.0, 5.0, 0.0), down),
                None,
            )
            .unwrap();
        assert!((delta.x - 0.5).abs() < 1e-4);
        assert!(delta.y.abs() < 1e-6 && delta.z.abs() < 1e-6);
    }

    #[test]
    fn test_incremental_factors_compose_to_cumulative() {
        let mut gizmo = ScaleGizmo::new();
        let down = Vec3::new(0.0, -1.0, 0.0);
        gizmo.begin_drag(
            GizmoAxis::X,
            Vec3::ZERO,
            &Ray::new(Vec3::new(2.0, 5.0, 0.0), down),
        );

        let mut scale = 1.0_f32;
        for x in [2.5, 3.0, 4.0] {
            let delta = gizmo
                .drag_delta(
                    GizmoAxis::X,
                    Vec3::ZERO,
                    &Ray::new(Vec3::new(x, 5.0, 0.0), down),
                    None,
                )
                .unwrap();
            scale *= 1.0 + delta.x;
        }
        // Total drag of 2 units: cumulative factor 2.0 regardless of
        // how many moves it took.
        assert!((scale - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_uniform_drag_scales_all_axes() {
        let mut gizmo = ScaleGizmo::new();
        let down = Vec3::new(0.0, -1.0, 0.0);
        gizmo.begin_drag(
            GizmoAxis::All,
            Vec3::ZERO,
            &Ray::new(Vec3::new(0.0, 5.0, 0.0), down),
        );

        let delta = gizmo
            .drag_delta(
                GizmoAxis::All,
                Vec3::ZERO,
                &Ray::new(Vec3::new(1.0, 5.0, 0.0), down),
                None,
            )
            .unwrap();
        assert!((delta.x - 0.5).abs() < 1e-4);
        assert!((delta.x - delta.y).abs() < 1e-6);
        assert!((delta.x - delta.z).abs() < 1e-6);
    }

    #[test]
    fn test_shrink_clamps_above_zero() {
        let mut gizmo = ScaleGizmo::new();
        let down = Vec3::new(0.0, -1.0, 0.0);
        gizmo.begin_drag(
            GizmoAxis::X,
            Vec3::ZERO,
            &Ray::new(Vec3::new(2.0, 5.0, 0.0), down),
        );

        // Dragging far into the negative would flip the sign without
        // the clamp.
        let delta = gizmo
            .drag_delta(
                GizmoAxis::X,
                Vec3::ZERO,
                &Ray::new(Vec3::new(-8.0, 5.0, 0.0), down),
                None,
            )
            .unwrap();
        assert!(1.0 + delta.x >= MIN_FACTOR - 1e-6);
    }

    #[test]
    fn test_apply_delta_multiplies_scale() {
        let mut scene = Scene::new("Test");
        let node = scene.add_node(Node::new("Cube").with_scale(Vec3::splat(2.0)));
        let gizmo = ScaleGizmo::new();
        gizmo
            .apply_delta(&mut scene, node, Vec3::new(0.5, 0.0, 0.0))
            .unwrap();
        assert_eq!(
            scene.node(node).unwrap().scale(),
            Vec3::new(3.0, 2.0, 2.0)
        );
    }
}
