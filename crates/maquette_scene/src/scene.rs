//! The scene: arena storage plus the tree rooted at a permanent root node.

use glam::{Mat4, Vec3};
use slotmap::SlotMap;
use uuid::Uuid;

use crate::component::{Component, ComponentData};
use crate::error::SceneError;
use crate::node::{Node, NodeId};

/// A scene owns every node in its hierarchy.
///
/// The tree always has a root node named `"Root"`; it cannot be removed
/// or reparented. All mutating operations are hosted here because they
/// need arena access to keep the parent/child links and dirty flags
/// consistent.
pub struct Scene {
    name: String,
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
}

impl Scene {
    /// Create an empty scene containing only the root node.
    pub fn new(name: impl Into<String>) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new("Root"));
        Self {
            name: name.into(),
            nodes,
            root,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The permanent root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Total node count, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Mutable node access. Transform fields are deliberately not
    /// reachable this way; use the `set_*` operations so dirty flags
    /// propagate.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    // --- hierarchy -------------------------------------------------------

    /// Add a node under the root. Ownership moves into the scene.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let root = self.root;
        self.insert_child_of(root, node)
    }

    /// Add a node under an existing parent. Ownership moves into the
    /// scene.
    pub fn add_child(&mut self, parent: NodeId, node: Node) -> Result<NodeId, SceneError> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::NodeNotFound(parent));
        }
        Ok(self.insert_child_of(parent, node))
    }

    fn insert_child_of(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        node.parent = Some(parent);
        let id = self.nodes.insert(node);
        self.nodes[parent].children.push(id);
        log::debug!("added node {:?} under {:?}", id, parent);
        id
    }

    /// Destroy a node and its whole subtree. Every component in the
    /// subtree receives its shutdown hook before the nodes are dropped.
    /// The root is rejected.
    pub fn remove_node(&mut self, id: NodeId) -> Result<(), SceneError> {
        if id == self.root {
            return Err(SceneError::CannotMoveRoot);
        }
        if !self.nodes.contains_key(id) {
            return Err(SceneError::NodeNotFound(id));
        }

        let _ = self.unlink_from_parent(id);

        // Depth-first teardown; shutdown hooks run before the slots go.
        let mut stack = vec![id];
        let mut doomed = Vec::new();
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(current) {
                for component in &mut node.components {
                    component.shutdown();
                }
                stack.extend_from_slice(&node.children);
                doomed.push(current);
            }
        }
        for current in &doomed {
            self.nodes.remove(*current);
        }
        log::debug!("removed node {:?} ({} nodes destroyed)", id, doomed.len());
        Ok(())
    }

    /// Unlink a node from its parent without destroying it. The subtree
    /// stays alive in the arena (a detached root) so it can be
    /// re-attached later; this is what the delete command's undo relies
    /// on. Returns the child index the node occupied. Detaching the
    /// scene root is rejected; an already-detached node reports index 0.
    pub fn detach(&mut self, id: NodeId) -> Result<usize, SceneError> {
        if id == self.root {
            return Err(SceneError::CannotMoveRoot);
        }
        if !self.nodes.contains_key(id) {
            return Err(SceneError::NodeNotFound(id));
        }
        let index = self.unlink_from_parent(id).unwrap_or(0);
        self.mark_subtree_dirty(id);
        Ok(index)
    }

    /// Link a node under a parent at the given child index (clamped;
    /// `None` appends). A node that is still attached elsewhere is
    /// detached first. Attaching the root, or attaching a node beneath
    /// one of its own descendants, is rejected.
    pub fn attach(
        &mut self,
        parent: NodeId,
        id: NodeId,
        index: Option<usize>,
    ) -> Result<(), SceneError> {
        if id == self.root {
            return Err(SceneError::CannotMoveRoot);
        }
        if !self.nodes.contains_key(id) {
            return Err(SceneError::NodeNotFound(id));
        }
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::NodeNotFound(parent));
        }

        // Walk up from the target parent; finding `id` on the way to the
        // root means `id` is an ancestor of `parent`.
        let mut cursor = Some(parent);
        while let Some(current) = cursor {
            if current == id {
                return Err(SceneError::WouldCreateCycle);
            }
            cursor = self.nodes.get(current).and_then(|n| n.parent);
        }

        let _ = self.unlink_from_parent(id);

        let children = &mut self.nodes[parent].children;
        let at = index.unwrap_or(children.len()).min(children.len());
        children.insert(at, id);
        self.nodes[id].parent = Some(parent);
        self.mark_subtree_dirty(id);
        Ok(())
    }

    /// Remove `id` from its parent's child list, if it has one.
    /// Returns the index it occupied.
    fn unlink_from_parent(&mut self, id: NodeId) -> Option<usize> {
        let parent = self.nodes.get(id)?.parent?;
        let index = self.nodes[parent].children.iter().position(|&c| c == id)?;
        self.nodes[parent].children.remove(index);
        self.nodes[id].parent = None;
        Some(index)
    }

    /// Checked indexed child access.
    pub fn child_at(&self, parent: NodeId, index: usize) -> Result<NodeId, SceneError> {
        let node = self
            .nodes
            .get(parent)
            .ok_or(SceneError::NodeNotFound(parent))?;
        node.children
            .get(index)
            .copied()
            .ok_or(SceneError::ChildIndexOutOfRange {
                index,
                count: node.children.len(),
            })
    }

    /// The index of a node within its parent's child list.
    pub fn child_index(&self, id: NodeId) -> Option<usize> {
        let parent = self.nodes.get(id)?.parent?;
        self.nodes[parent].children.iter().position(|&c| c == id)
    }

    // --- transforms ------------------------------------------------------

    pub fn set_position(&mut self, id: NodeId, position: Vec3) -> Result<(), SceneError> {
        let node = self.nodes.get_mut(id).ok_or(SceneError::NodeNotFound(id))?;
        node.set_position(position);
        self.mark_subtree_dirty(id);
        Ok(())
    }

    pub fn set_rotation(&mut self, id: NodeId, rotation: Vec3) -> Result<(), SceneError> {
        let node = self.nodes.get_mut(id).ok_or(SceneError::NodeNotFound(id))?;
        node.set_rotation(rotation);
        self.mark_subtree_dirty(id);
        Ok(())
    }

    pub fn set_scale(&mut self, id: NodeId, scale: Vec3) -> Result<(), SceneError> {
        let node = self.nodes.get_mut(id).ok_or(SceneError::NodeNotFound(id))?;
        node.set_scale(scale);
        self.mark_subtree_dirty(id);
        Ok(())
    }

    fn mark_subtree_dirty(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(current) {
                node.mark_dirty();
                stack.extend_from_slice(&node.children);
            }
        }
    }

    /// Recompute every stale matrix, parents before children, and run
    /// the per-frame component hooks. Cheap when nothing is dirty.
    pub fn update(&mut self) {
        let root = self.root;
        self.update_subtree(root, None);
    }

    fn update_subtree(&mut self, id: NodeId, parent_world: Option<Mat4>) {
        let world;
        let child_count;
        {
            let Some(node) = self.nodes.get_mut(id) else {
                return;
            };
            if node.is_dirty() {
                node.recompute_matrices(parent_world);
            }
            for component in &mut node.components {
                component.update();
            }
            world = node.world_matrix();
            child_count = node.children.len();
        }
        for i in 0..child_count {
            let child = self.nodes[id].children[i];
            self.update_subtree(child, Some(world));
        }
    }

    // --- traversal and lookup -------------------------------------------

    /// Pre-order depth-first traversal from the root: a node is visited
    /// before its children. Detached subtrees are not reachable.
    pub fn traverse<F: FnMut(NodeId, &Node)>(&self, mut visitor: F) {
        self.visit(self.root, &mut visitor);
    }

    fn visit<F: FnMut(NodeId, &Node)>(&self, id: NodeId, visitor: &mut F) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        visitor(id, node);
        for &child in &node.children {
            self.visit(child, visitor);
        }
    }

    /// First node with the given name, pre-order depth-first. O(n);
    /// callers that look up frequently should keep their own index.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.find_from(self.root, &|node| node.name() == name)
    }

    /// First node with the given UUID, pre-order depth-first. O(n);
    /// callers that look up frequently should keep their own index.
    pub fn find_by_uuid(&self, uuid: &Uuid) -> Option<NodeId> {
        self.find_from(self.root, &|node| node.uuid() == uuid)
    }

    fn find_from(&self, id: NodeId, pred: &dyn Fn(&Node) -> bool) -> Option<NodeId> {
        let node = self.nodes.get(id)?;
        if pred(node) {
            return Some(id);
        }
        node.children
            .iter()
            .find_map(|&child| self.find_from(child, pred))
    }

    // --- components ------------------------------------------------------

    /// Attach a component; its initialize hook runs immediately.
    /// Returns the new component's id.
    pub fn add_component(
        &mut self,
        id: NodeId,
        data: ComponentData,
    ) -> Result<Uuid, SceneError> {
        let node = self.nodes.get_mut(id).ok_or(SceneError::NodeNotFound(id))?;
        let mut component = Component::new(id, data);
        component.initialize();
        let uuid = *component.uuid();
        node.components.push(component);
        Ok(uuid)
    }

    /// Detach a component by id; its shutdown hook runs before removal.
    pub fn remove_component(&mut self, id: NodeId, component: &Uuid) -> Result<(), SceneError> {
        let node = self.nodes.get_mut(id).ok_or(SceneError::NodeNotFound(id))?;
        let index = node
            .components
            .iter()
            .position(|c| c.uuid() == component)
            .ok_or(SceneError::ComponentNotFound)?;
        node.components[index].shutdown();
        node.components.remove(index);
        Ok(())
    }

    /// Checked indexed component access.
    pub fn component_at(&self, id: NodeId, index: usize) -> Result<&Component, SceneError> {
        let node = self.nodes.get(id).ok_or(SceneError::NodeNotFound(id))?;
        node.components
            .get(index)
            .ok_or(SceneError::ComponentIndexOutOfRange {
                index,
                count: node.components.len(),
            })
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new("Scene")
    }
}
