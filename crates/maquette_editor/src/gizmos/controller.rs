//! Gizmo interaction state machine.

use glam::Vec3;
use maquette_math::Ray;
use maquette_scene::{NodeId, Scene};

use super::gizmo::{Gizmo, GizmoAxis, GizmoKind, Handle};
use super::move_gizmo::MoveGizmo;
use super::rotate_gizmo::RotateGizmo;
use super::scale_gizmo::ScaleGizmo;
use crate::commands::TransformState;
use crate::config::EditorConfig;
use crate::selection::SelectionManager;

/// Snap increments for gizmo drags.
#[derive(Clone, Copy, Debug)]
pub struct SnapSettings {
    pub enabled: bool,
    /// Translation snap in world units.
    pub translate: f32,
    /// Rotation snap in degrees.
    pub rotate: f32,
    /// Scale snap as a factor step.
    pub scale: f32,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            translate: 0.5,
            rotate: 15.0,
            scale: 0.1,
        }
    }
}

/// Start-of-drag transforms, reported on release so the drag can be
/// turned into undoable commands.
#[derive(Clone, Debug)]
pub struct DragCapture {
    /// Each dragged node with its transform at drag start.
    pub nodes: Vec<(NodeId, TransformState)>,
}

/// Owns the three gizmo variants and the Idle/Dragging state machine.
///
/// One gizmo kind is current at a time. A press arms the first handle
/// the pick ray hits (probed in each gizmo's fixed priority order);
/// moves apply deltas to every selected node immediately; release
/// always returns to idle and hands back the captured start transforms.
pub struct GizmoController {
    kind: GizmoKind,
    /// Whether the gizmo is shown. Purely visual; interaction state is
    /// untouched when toggled.
    active: bool,
    pub snap: SnapSettings,
    pub gizmo_scale: f32,

    move_gizmo: MoveGizmo,
    rotate_gizmo: RotateGizmo,
    scale_gizmo: ScaleGizmo,

    dragging: bool,
    active_axis: GizmoAxis,
    transform_origin: Vec3,
    drag_start: Vec<(NodeId, TransformState)>,
    handles: Vec<Handle>,
}

impl Default for GizmoController {
    fn default() -> Self {
        Self::new()
    }
}

impl GizmoController {
    pub fn new() -> Self {
        Self {
            kind: GizmoKind::Move,
            active: true,
            snap: SnapSettings::default(),
            gizmo_scale: 1.0,
            move_gizmo: MoveGizmo::new(),
            rotate_gizmo: RotateGizmo::new(),
            scale_gizmo: ScaleGizmo::new(),
            dragging: false,
            active_axis: GizmoAxis::None,
            transform_origin: Vec3::ZERO,
            drag_start: Vec::new(),
            handles: Vec::new(),
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        let mut controller = Self::new();
        controller.gizmo_scale = config.gizmo_scale;
        controller.snap = SnapSettings {
            enabled: config.snap_enabled,
            translate: config.translate_snap,
            rotate: config.rotate_snap,
            scale: config.scale_snap,
        };
        controller
    }

    pub fn kind(&self) -> GizmoKind {
        self.kind
    }

    /// Switch the gizmo variant. Ignored while a drag is in progress.
    pub fn set_kind(&mut self, kind: GizmoKind) {
        if !self.dragging {
            self.kind = kind;
        }
    }

    /// Toggle the gizmo's visual presence without touching interaction
    /// state.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn active_axis(&self) -> GizmoAxis {
        self.active_axis
    }

    /// Current handle layout, re-centered by [`GizmoController::update`].
    pub fn handles(&self) -> &[Handle] {
        &self.handles
    }

    fn current(&self) -> &dyn Gizmo {
        match self.kind {
            GizmoKind::Move => &self.move_gizmo,
            GizmoKind::Rotate => &self.rotate_gizmo,
            GizmoKind::Scale => &self.scale_gizmo,
        }
    }

    fn current_mut(&mut self) -> &mut dyn Gizmo {
        match self.kind {
            GizmoKind::Move => &mut self.move_gizmo,
            GizmoKind::Rotate => &mut self.rotate_gizmo,
            GizmoKind::Scale => &mut self.scale_gizmo,
        }
    }

    /// Try to arm a handle under the pick ray. Requires a non-empty
    /// selection; the transform origin comes from the active node's
    /// position. Returns whether a handle was hit.
    pub fn on_mouse_press(
        &mut self,
        ray: &Ray,
        scene: &Scene,
        selection: &SelectionManager,
    ) -> bool {
        if selection.is_empty() {
            return false;
        }
        let Some(active_node) = selection.active().and_then(|id| scene.node(id)) else {
            return false;
        };
        self.transform_origin = active_node.position();

        let origin = self.transform_origin;
        let scale = self.gizmo_scale;
        let Some(axis) = self.current().hit_axis(origin, ray, scale) else {
            return false;
        };

        self.current_mut().begin_drag(axis, origin, ray);
        self.active_axis = axis;
        self.dragging = true;
        self.drag_start = selection
            .selected()
            .iter()
            .filter_map(|&id| scene.node(id).map(|node| (id, TransformState::of(node))))
            .collect();
        log::debug!("gizmo drag armed: {:?} on {:?}", self.kind, axis);
        true
    }

    /// Feed a drag. Applies the axis-constrained delta to every
    /// selected node immediately; a no-op unless dragging.
    pub fn on_mouse_move(
        &mut self,
        ray: &Ray,
        scene: &mut Scene,
        selection: &SelectionManager,
    ) -> bool {
        if !self.dragging || self.active_axis == GizmoAxis::None {
            return false;
        }

        let snap = if self.snap.enabled {
            Some(match self.kind {
                GizmoKind::Move => self.snap.translate,
                GizmoKind::Rotate => self.snap.rotate,
                GizmoKind::Scale => self.snap.scale,
            })
        } else {
            None
        };

        let axis = self.active_axis;
        let origin = self.transform_origin;
        let Some(delta) = self.current_mut().drag_delta(axis, origin, ray, snap) else {
            // Degenerate ray or parallel plane: leave the nodes alone.
            return true;
        };

        let gizmo = self.current();
        for &id in selection.selected() {
            if let Err(err) = gizmo.apply_delta(scene, id, delta) {
                log::warn!("gizmo drag skipped node {:?}: {}", id, err);
            }
        }
        true
    }

    /// End the drag. Always returns to idle and clears the active
    /// axis, whether or not a drag was running; a finished drag reports
    /// the captured start transforms.
    pub fn on_mouse_release(&mut self) -> Option<DragCapture> {
        let was_dragging = self.dragging;
        self.dragging = false;
        self.active_axis = GizmoAxis::None;
        self.current_mut().end_drag();

        let nodes = std::mem::take(&mut self.drag_start);
        if was_dragging && !nodes.is_empty() {
            Some(DragCapture { nodes })
        } else {
            None
        }
    }

    /// Re-center the handle layout on the active node, once per frame.
    pub fn update(&mut self, scene: &Scene, selection: &SelectionManager) {
        if let Some(node) = selection.active().and_then(|id| scene.node(id)) {
            self.transform_origin = node.position();
        }
        self.handles = if self.active && !selection.is_empty() {
            self.current().handles(self.transform_origin, self.gizmo_scale)
        } else {
            Vec::new()
        };
    }
}
