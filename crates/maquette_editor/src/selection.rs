//! Selection state over scene nodes.

use maquette_scene::NodeId;

/// Holds the current selection: an ordered, duplicate-free list of node
/// handles plus one active node.
///
/// The active node is the primary target within a multi-selection: the
/// gizmo anchors to it and a properties panel displays it. It is always
/// a member of the selection, or `None` when nothing is selected.
///
/// The selection never owns the nodes it references; handles to deleted
/// nodes must be removed by the caller (the editor context does this
/// before running a delete command).
#[derive(Clone, Debug, Default)]
pub struct SelectionManager {
    /// Selected nodes, in selection order.
    selected: Vec<NodeId>,
    /// The active node within the selection.
    active: Option<NodeId>,
    /// Whether the selection changed since last checked.
    dirty: bool,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// All selected nodes, in selection order.
    pub fn selected(&self) -> &[NodeId] {
        &self.selected
    }

    /// The active node.
    pub fn active(&self) -> Option<NodeId> {
        self.active
    }

    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_selected(&self, id: NodeId) -> bool {
        self.selected.contains(&id)
    }

    /// Check and clear the change flag.
    pub fn take_dirty(&mut self) -> bool {
        let was_dirty = self.dirty;
        self.dirty = false;
        was_dirty
    }

    /// Add a node to the selection and make it active. Selecting a node
    /// that is already selected is a no-op (it does not even become
    /// active).
    pub fn select(&mut self, id: NodeId) {
        if self.selected.contains(&id) {
            return;
        }
        self.selected.push(id);
        self.active = Some(id);
        self.dirty = true;
    }

    /// Replace the entire selection. The first element becomes active;
    /// duplicates are dropped.
    pub fn select_many(&mut self, ids: impl IntoIterator<Item = NodeId>) {
        self.selected.clear();
        for id in ids {
            if !self.selected.contains(&id) {
                self.selected.push(id);
            }
        }
        self.active = self.selected.first().copied();
        self.dirty = true;
    }

    /// Remove a node from the selection. If it was active, the first
    /// remaining node (if any) becomes active.
    pub fn deselect(&mut self, id: NodeId) {
        let len_before = self.selected.len();
        self.selected.retain(|&n| n != id);
        if self.selected.len() == len_before {
            return;
        }
        if self.active == Some(id) {
            self.active = self.selected.first().copied();
        }
        self.dirty = true;
    }

    /// Clear the selection and the active node.
    pub fn deselect_all(&mut self) {
        if !self.selected.is_empty() {
            self.selected.clear();
            self.active = None;
            self.dirty = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maquette_scene::{Node, Scene};

    fn three_nodes() -> (Scene, NodeId, NodeId, NodeId) {
        let mut scene = Scene::new("Test");
        let a = scene.add_node(Node::new("A"));
        let b = scene.add_node(Node::new("B"));
        let c = scene.add_node(Node::new("C"));
        (scene, a, b, c)
    }

    #[test]
    fn test_select_is_idempotent() {
        let (_scene, a, _, _) = three_nodes();
        let mut sel = SelectionManager::new();
        sel.select(a);
        sel.select(a);
        assert_eq!(sel.count(), 1);
        assert!(sel.is_selected(a));
        assert_eq!(sel.active(), Some(a));
    }

    #[test]
    fn test_select_appends_and_activates() {
        let (_scene, a, b, _) = three_nodes();
        let mut sel = SelectionManager::new();
        sel.select(a);
        sel.select(b);
        assert_eq!(sel.selected(), &[a, b]);
        assert_eq!(sel.active(), Some(b));
    }

    #[test]
    fn test_select_many_replaces() {
        let (_scene, a, b, c) = three_nodes();
        let mut sel = SelectionManager::new();
        sel.select(c);
        sel.select_many([a, b, a]);
        assert_eq!(sel.selected(), &[a, b]);
        assert_eq!(sel.active(), Some(a));
    }

    #[test]
    fn test_deselect_active_promotes_first_remaining() {
        let (_scene, a, b, c) = three_nodes();
        let mut sel = SelectionManager::new();
        sel.select(a);
        sel.select(b);
        sel.select(c);
        assert_eq!(sel.active(), Some(c));

        sel.deselect(c);
        assert_eq!(sel.active(), Some(a));

        sel.deselect(b);
        assert_eq!(sel.active(), Some(a));

        sel.deselect(a);
        assert_eq!(sel.active(), None);
        assert!(sel.is_empty());
    }

    #[test]
    fn test_deselect_all() {
        let (_scene, a, b, _) = three_nodes();
        let mut sel = SelectionManager::new();
        sel.select(a);
        sel.select(b);
        sel.deselect_all();
        assert!(sel.is_empty());
        assert_eq!(sel.active(), None);
    }

    #[test]
    fn test_take_dirty() {
        let (_scene, a, _, _) = three_nodes();
        let mut sel = SelectionManager::new();
        assert!(!sel.take_dirty());
        sel.select(a);
        assert!(sel.take_dirty());
        assert!(!sel.take_dirty());
        // No-op operations do not set the flag.
        sel.select(a);
        sel.deselect_all();
        assert!(sel.take_dirty());
        sel.deselect_all();
        assert!(!sel.take_dirty());
    }
}
