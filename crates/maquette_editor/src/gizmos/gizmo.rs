//! Gizmo trait and common types.

use glam::Vec3;
use maquette_math::Ray;
use maquette_scene::{NodeId, Scene, SceneError};

/// Which transform operation a gizmo performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GizmoKind {
    #[default]
    Move,
    Rotate,
    Scale,
}

/// Handle identity within a gizmo.
///
/// `All` is the uniform handle (the scale gizmo's center sphere).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GizmoAxis {
    #[default]
    None,
    X,
    Y,
    Z,
    PlaneXy,
    PlaneXz,
    PlaneYz,
    All,
}

impl GizmoAxis {
    /// World direction of a single-axis handle.
    pub fn direction(self) -> Option<Vec3> {
        match self {
            GizmoAxis::X => Some(Vec3::X),
            GizmoAxis::Y => Some(Vec3::Y),
            GizmoAxis::Z => Some(Vec3::Z),
            _ => None,
        }
    }

    /// Normal of a plane handle.
    pub fn plane_normal(self) -> Option<Vec3> {
        match self {
            GizmoAxis::PlaneXy => Some(Vec3::Z),
            GizmoAxis::PlaneXz => Some(Vec3::Y),
            GizmoAxis::PlaneYz => Some(Vec3::X),
            _ => None,
        }
    }

    pub fn is_single_axis(self) -> bool {
        matches!(self, GizmoAxis::X | GizmoAxis::Y | GizmoAxis::Z)
    }

    pub fn is_plane(self) -> bool {
        matches!(
            self,
            GizmoAxis::PlaneXy | GizmoAxis::PlaneXz | GizmoAxis::PlaneYz
        )
    }
}

/// Length of the axis arms, world units at gizmo scale 1.
pub const AXIS_LENGTH: f32 = 2.0;
/// Pick radius around the axis arms.
pub const AXIS_HIT_RADIUS: f32 = 0.1;
/// Rotation ring radius.
pub const RING_RADIUS: f32 = 1.0;
/// Rotation ring pick thickness.
pub const RING_THICKNESS: f32 = 0.05;
/// Offset of the plane handles from the origin along both plane axes.
pub const PLANE_OFFSET: f32 = 0.4;
/// Half-size of the plane handle quads.
pub const PLANE_HALF_SIZE: f32 = 0.3;
/// Radius of the uniform-scale center handle.
pub const CENTER_RADIUS: f32 = 0.2;
/// Projected drag distance to scale factor conversion.
pub const SCALE_SENSITIVITY: f32 = 0.5;

/// Renderable shape of a gizmo handle. The rendering backend draws
/// these; the editing core only lays them out and hit-tests them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HandleShape {
    Segment { start: Vec3, end: Vec3 },
    Quad { center: Vec3, normal: Vec3, half_size: f32 },
    Ring { center: Vec3, normal: Vec3, radius: f32 },
    Cube { center: Vec3, half_size: f32 },
    Sphere { center: Vec3, radius: f32 },
}

/// One interactive handle of a gizmo.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Handle {
    pub axis: GizmoAxis,
    pub shape: HandleShape,
}

/// A transform gizmo variant.
///
/// The three variants (move/rotate/scale) form a closed set; the
/// [`crate::GizmoController`] owns one of each and dispatches on the
/// current [`GizmoKind`]. All positions are world-space and `origin` is
/// the transform origin captured when the drag started.
pub trait Gizmo {
    fn kind(&self) -> GizmoKind;

    /// Probe the handles in this gizmo's fixed priority order and
    /// return the first one the ray hits.
    fn hit_axis(&self, origin: Vec3, ray: &Ray, scale: f32) -> Option<GizmoAxis>;

    /// Capture the drag references (start plane hit, start angle) for
    /// an armed handle.
    fn begin_drag(&mut self, axis: GizmoAxis, origin: Vec3, ray: &Ray);

    /// Delta to apply for the current mouse ray, constrained to the
    /// active handle. Deltas are incremental: each call reports the
    /// change since the previous one, with snapping applied to the
    /// accumulated drag so increments land on snap boundaries.
    fn drag_delta(
        &mut self,
        axis: GizmoAxis,
        origin: Vec3,
        ray: &Ray,
        snap: Option<f32>,
    ) -> Option<Vec3>;

    /// Apply one delta to one node through the scene's setters.
    fn apply_delta(&self, scene: &mut Scene, node: NodeId, delta: Vec3)
        -> Result<(), SceneError>;

    /// Drop any drag references.
    fn end_drag(&mut self);

    /// Handle layout centered on `origin`, for rendering and hover
    /// feedback.
    fn handles(&self, origin: Vec3, scale: f32) -> Vec<Handle>;
}

/// Round `value` to the nearest multiple of `snap` (no-op for
/// non-positive snap).
pub fn snap_value(value: f32, snap: f32) -> f32 {
    if snap > 0.0 {
        (value / snap).round() * snap
    } else {
        value
    }
}

/// Normal of the plane a drag is projected onto for the given handle.
///
/// Plane handles drag in their own plane. Single-axis handles use the
/// plane that contains the axis and faces the viewer, so the
/// projection stays well-conditioned from any camera angle; a ray
/// parallel to the axis has no such plane and yields `None` (the drag
/// is a no-op). The uniform handle drags in the view plane.
pub fn drag_plane_normal(axis: GizmoAxis, ray_direction: Vec3) -> Option<Vec3> {
    if let Some(direction) = axis.direction() {
        let normal = direction.cross(ray_direction).cross(direction);
        if normal.length_squared() < maquette_math::EPSILON {
            return None;
        }
        return Some(normal.normalize());
    }
    if let Some(normal) = axis.plane_normal() {
        return Some(normal);
    }
    match axis {
        GizmoAxis::All => {
            if ray_direction.length_squared() < maquette_math::EPSILON {
                None
            } else {
                Some(-ray_direction.normalize())
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_value() {
        assert_eq!(snap_value(0.3, 0.5), 0.5);
        assert_eq!(snap_value(0.2, 0.5), 0.0);
        assert_eq!(snap_value(-0.7, 0.5), -0.5);
        assert_eq!(snap_value(0.3, 0.0), 0.3);
    }

    #[test]
    fn test_drag_plane_contains_axis_and_faces_viewer() {
        // Camera level with the XZ plane, dragging x: the plane must
        // still be hittable.
        let view = Vec3::new(0.1, 0.0, -1.0).normalize();
        let normal = drag_plane_normal(GizmoAxis::X, view).unwrap();
        assert!(normal.dot(Vec3::X).abs() < 1e-6);
        assert!(normal.dot(view).abs() > 0.5);

        // A ray straight down the axis has no usable plane.
        assert!(drag_plane_normal(GizmoAxis::X, Vec3::X).is_none());

        // Plane handles keep their own plane.
        assert_eq!(
            drag_plane_normal(GizmoAxis::PlaneXz, view),
            Some(Vec3::Y)
        );
    }

    #[test]
    fn test_axis_classification() {
        assert!(GizmoAxis::X.is_single_axis());
        assert!(!GizmoAxis::PlaneXy.is_single_axis());
        assert!(GizmoAxis::PlaneXz.is_plane());
        assert_eq!(GizmoAxis::Y.direction(), Some(Vec3::Y));
        assert_eq!(GizmoAxis::PlaneYz.plane_normal(), Some(Vec3::X));
        assert_eq!(GizmoAxis::All.direction(), None);
    }
}
