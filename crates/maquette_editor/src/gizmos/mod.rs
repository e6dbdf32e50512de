//! Transform gizmos.
//!
//! A gizmo is an on-screen handle set that turns mouse drags into
//! transform deltas on the selected nodes. The three variants (move,
//! rotate, scale) share one interface and one interaction state
//! machine; see [`GizmoController`] for the press/move/release flow.

mod controller;
mod gizmo;
mod move_gizmo;
mod rotate_gizmo;
mod scale_gizmo;

pub use controller::{DragCapture, GizmoController, SnapSettings};
pub use gizmo::{snap_value, Gizmo, GizmoAxis, GizmoKind, Handle, HandleShape};
pub use move_gizmo::MoveGizmo;
pub use rotate_gizmo::RotateGizmo;
pub use scale_gizmo::ScaleGizmo;
