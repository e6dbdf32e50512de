//! The editor context: one object owning the whole editing core.

use maquette_scene::{NodeId, Scene};

use crate::commands::{
    CommandError, CommandManager, CreateNodeCommand, DeleteNodeCommand, TransformCommand,
    TransformState,
};
use crate::config::EditorConfig;
use crate::gizmos::{GizmoController, GizmoKind};
use crate::picking::{PickingManager, ViewCamera};
use crate::selection::SelectionManager;

/// Ties scene, selection, picking, gizmos and command history together
/// and enforces the editing rules:
///
/// - a mouse press goes to the gizmo first, then falls through to
///   picking and selection;
/// - drags mutate nodes directly for live feedback, and become
///   [`TransformCommand`]s when the mouse is released;
/// - node creation and deletion always run as commands;
/// - selection references are cleared before a node is deleted.
///
/// Per frame, all input handling happens before [`EditorContext::update`]
/// recomputes matrices, so the renderer reads a consistent scene.
pub struct EditorContext {
    pub scene: Scene,
    pub selection: SelectionManager,
    pub picking: PickingManager,
    pub gizmos: GizmoController,
    pub commands: CommandManager,
}

impl EditorContext {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            scene: Scene::new("Untitled"),
            selection: SelectionManager::new(),
            picking: PickingManager::new(config.screen_width, config.screen_height),
            gizmos: GizmoController::from_config(config),
            commands: CommandManager::with_capacity(config.max_undo_steps),
        }
    }

    /// Route a left mouse press at pixel coordinates. Returns whether
    /// a gizmo handle was armed or a node was picked; a press that hits
    /// nothing clears the selection and reports `false`.
    pub fn handle_mouse_press(&mut self, x: f32, y: f32, camera: &dyn ViewCamera) -> bool {
        let ray = self.picking.screen_to_ray(x, y, camera);

        if self.gizmos.on_mouse_press(&ray, &self.scene, &self.selection) {
            return true;
        }

        match self.picking.pick_with_ray(&self.scene, &ray) {
            Some(id) => {
                self.selection.select(id);
                true
            }
            None => {
                self.selection.deselect_all();
                false
            }
        }
    }

    /// Route a mouse move; only meaningful while a gizmo drag is in
    /// progress.
    pub fn handle_mouse_move(&mut self, x: f32, y: f32, camera: &dyn ViewCamera) -> bool {
        let ray = self.picking.screen_to_ray(x, y, camera);
        self.gizmos
            .on_mouse_move(&ray, &mut self.scene, &self.selection)
    }

    /// Route a mouse release. A finished gizmo drag becomes one
    /// transform command per dragged node so the whole drag undoes in
    /// the order it was applied.
    pub fn handle_mouse_release(&mut self) -> bool {
        let Some(capture) = self.gizmos.on_mouse_release() else {
            return false;
        };

        for (id, start) in capture.nodes {
            let Some(node) = self.scene.node(id) else {
                continue;
            };
            let end = TransformState::of(node);
            if end == start {
                continue;
            }
            // The node already holds `end`; executing re-applies it
            // (visually a no-op) and records the pair for undo.
            let cmd = TransformCommand::new(id, start, end);
            if let Err(err) = self.commands.execute(Box::new(cmd), &mut self.scene) {
                log::warn!("could not record drag on {:?}: {}", id, err);
            }
        }
        true
    }

    /// Per-frame update: re-center gizmo handles, then recompute dirty
    /// matrices.
    pub fn update(&mut self) {
        self.gizmos.update(&self.scene, &self.selection);
        self.scene.update();
    }

    /// Create a node through the command system and return its id.
    pub fn create_node(
        &mut self,
        parent: Option<NodeId>,
        name: impl Into<String>,
    ) -> Result<NodeId, CommandError> {
        let parent_id = parent.unwrap_or_else(|| self.scene.root());
        let cmd = CreateNodeCommand::new(parent, name);
        self.commands.execute(Box::new(cmd), &mut self.scene)?;

        // The command appends to the parent's child list, so the new
        // node is its last child.
        self.scene
            .node(parent_id)
            .and_then(|node| node.children().last().copied())
            .ok_or_else(|| CommandError::InvalidOperation("created node vanished".into()))
    }

    /// Delete a node through the command system, clearing any selection
    /// reference to it first.
    pub fn delete_node(&mut self, id: NodeId) -> Result<(), CommandError> {
        self.selection.deselect(id);
        let cmd = DeleteNodeCommand::new(&self.scene, id);
        self.commands.execute(Box::new(cmd), &mut self.scene)
    }

    /// Delete every selected node. Returns how many delete commands
    /// ran.
    pub fn delete_selected(&mut self) -> usize {
        let targets: Vec<NodeId> = self.selection.selected().to_vec();
        let mut deleted = 0;
        for id in targets {
            match self.delete_node(id) {
                Ok(()) => deleted += 1,
                Err(err) => log::warn!("delete of {:?} failed: {}", id, err),
            }
        }
        deleted
    }

    /// Apply an externally edited transform (e.g. from a properties
    /// panel) through the command system.
    pub fn set_node_transform(
        &mut self,
        id: NodeId,
        new: TransformState,
    ) -> Result<(), CommandError> {
        let cmd = TransformCommand::from_current(&self.scene, id, new)?;
        self.commands.execute(Box::new(cmd), &mut self.scene)
    }

    pub fn set_gizmo_kind(&mut self, kind: GizmoKind) {
        self.gizmos.set_kind(kind);
    }

    pub fn undo(&mut self) -> bool {
        match self.commands.undo(&mut self.scene) {
            Ok(()) => true,
            Err(err) => {
                log::debug!("undo unavailable: {}", err);
                false
            }
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.commands.redo(&mut self.scene) {
            Ok(()) => true,
            Err(err) => {
                log::debug!("redo unavailable: {}", err);
                false
            }
        }
    }

    /// Viewport resize hook for the shell.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.picking.set_screen_size(width, height);
    }

    /// Reset to an empty scene, dropping selection and history without
    /// running any command hooks.
    pub fn clear(&mut self) {
        self.scene = Scene::new("Untitled");
        self.selection.deselect_all();
        self.commands.clear();
    }
}

impl Default for EditorContext {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}
