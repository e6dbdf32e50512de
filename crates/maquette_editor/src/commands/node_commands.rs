//! Node creation and deletion commands.

use maquette_scene::{Node, NodeId, Scene};

use super::{Command, CommandError};

/// Create a named node under a parent (or the root).
///
/// Undo destroys the created node; a later redo builds a fresh node, so
/// the node's UUID is not preserved across an undo/redo cycle. Callers
/// that need to re-find the node after redo should look it up by name.
pub struct CreateNodeCommand {
    parent: Option<NodeId>,
    name: String,
    created: Option<NodeId>,
}

impl CreateNodeCommand {
    /// `parent: None` attaches under the scene root.
    pub fn new(parent: Option<NodeId>, name: impl Into<String>) -> Self {
        Self {
            parent,
            name: name.into(),
            created: None,
        }
    }

    /// The node created by the last execute, if any.
    pub fn created(&self) -> Option<NodeId> {
        self.created
    }
}

impl Command for CreateNodeCommand {
    fn name(&self) -> &str {
        "Create Node"
    }

    fn execute(&mut self, scene: &mut Scene) -> Result<(), CommandError> {
        let node = Node::new(self.name.clone());
        let id = match self.parent {
            Some(parent) => scene.add_child(parent, node)?,
            None => scene.add_node(node),
        };
        self.created = Some(id);
        Ok(())
    }

    fn undo(&mut self, scene: &mut Scene) -> Result<(), CommandError> {
        let id = self
            .created
            .take()
            .ok_or_else(|| CommandError::InvalidOperation("no node to remove".into()))?;
        scene.remove_node(id)?;
        Ok(())
    }
}

/// Delete a node (and its subtree) with the ability to restore it.
///
/// The parent and child index are captured at construction. Execute
/// detaches the subtree (ownership stays with the scene arena, nothing
/// is destroyed) and undo re-attaches it at the captured index, so
/// sibling order and all UUIDs survive a delete/undo round trip.
pub struct DeleteNodeCommand {
    node: NodeId,
    parent: NodeId,
    child_index: usize,
}

impl DeleteNodeCommand {
    pub fn new(scene: &Scene, node: NodeId) -> Self {
        let parent = scene
            .node(node)
            .and_then(|n| n.parent())
            .unwrap_or_else(|| scene.root());
        let child_index = scene.child_index(node).unwrap_or(0);
        Self {
            node,
            parent,
            child_index,
        }
    }
}

impl Command for DeleteNodeCommand {
    fn name(&self) -> &str {
        "Delete Node"
    }

    fn execute(&mut self, scene: &mut Scene) -> Result<(), CommandError> {
        // Refresh the index in case siblings moved since construction.
        self.child_index = scene.detach(self.node)?;
        Ok(())
    }

    fn undo(&mut self, scene: &mut Scene) -> Result<(), CommandError> {
        scene.attach(self.parent, self.node, Some(self.child_index))?;
        Ok(())
    }
}
