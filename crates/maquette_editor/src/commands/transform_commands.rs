//! Transform manipulation command.

use glam::Vec3;
use maquette_scene::{Node, NodeId, Scene};

use super::{Command, CommandError};

/// A node's full transform triplet, captured at a point in time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformState {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl TransformState {
    pub fn new(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Snapshot a node's current transform.
    pub fn of(node: &Node) -> Self {
        Self {
            position: node.position(),
            rotation: node.rotation(),
            scale: node.scale(),
        }
    }

    fn apply(&self, node: NodeId, scene: &mut Scene) -> Result<(), CommandError> {
        scene.set_position(node, self.position)?;
        scene.set_rotation(node, self.rotation)?;
        scene.set_scale(node, self.scale)?;
        Ok(())
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

/// Set a node's transform, remembering the previous one.
///
/// Execute applies the new transform, undo the old one; both go through
/// the scene's setters so dirty flags propagate to descendants. This is
/// the command a finished gizmo drag or a properties-panel edit turns
/// into.
pub struct TransformCommand {
    node: NodeId,
    old: TransformState,
    new: TransformState,
}

impl TransformCommand {
    pub fn new(node: NodeId, old: TransformState, new: TransformState) -> Self {
        Self { node, old, new }
    }

    /// Capture the node's current transform as the old state.
    pub fn from_current(
        scene: &Scene,
        node: NodeId,
        new: TransformState,
    ) -> Result<Self, CommandError> {
        let current = scene
            .node(node)
            .map(TransformState::of)
            .ok_or(maquette_scene::SceneError::NodeNotFound(node))?;
        Ok(Self::new(node, current, new))
    }
}

impl Command for TransformCommand {
    fn name(&self) -> &str {
        "Transform"
    }

    fn execute(&mut self, scene: &mut Scene) -> Result<(), CommandError> {
        self.new.apply(self.node, scene)
    }

    fn undo(&mut self, scene: &mut Scene) -> Result<(), CommandError> {
        self.old.apply(self.node, scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CommandManager;

    #[test]
    fn test_transform_round_trip() {
        let mut scene = Scene::new("Test");
        let node = scene.add_node(Node::new("Cube"));
        let mut manager = CommandManager::new();

        let old = TransformState::of(scene.node(node).unwrap());
        let new = TransformState::new(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, Vec3::ONE);
        manager
            .execute(Box::new(TransformCommand::new(node, old, new)), &mut scene)
            .unwrap();
        assert_eq!(scene.node(node).unwrap().position(), Vec3::new(1.0, 2.0, 3.0));

        manager.undo(&mut scene).unwrap();
        assert_eq!(scene.node(node).unwrap().position(), Vec3::ZERO);

        manager.redo(&mut scene).unwrap();
        assert_eq!(scene.node(node).unwrap().position(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_transform_marks_descendants_dirty() {
        let mut scene = Scene::new("Test");
        let parent = scene.add_node(Node::new("Parent"));
        let child = scene.add_child(parent, Node::new("Child")).unwrap();
        scene.update();

        let old = TransformState::of(scene.node(parent).unwrap());
        let mut new = old;
        new.position = Vec3::new(0.0, 1.0, 0.0);
        let mut cmd = TransformCommand::new(parent, old, new);
        cmd.execute(&mut scene).unwrap();

        assert!(scene.node(child).unwrap().is_dirty());
    }

    #[test]
    fn test_transform_on_stale_node_fails() {
        let mut scene = Scene::new("Test");
        let node = scene.add_node(Node::new("Doomed"));
        let old = TransformState::of(scene.node(node).unwrap());
        scene.remove_node(node).unwrap();

        let mut cmd = TransformCommand::new(node, old, TransformState::default());
        assert!(cmd.execute(&mut scene).is_err());
    }
}
