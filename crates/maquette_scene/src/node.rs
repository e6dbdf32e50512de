//! Scene node: a named transform in the hierarchy.

use glam::{Mat4, Vec3};
use slotmap::new_key_type;
use uuid::Uuid;

use crate::component::{Component, ComponentKind};

new_key_type! {
    /// Generational handle to a node in a scene's arena.
    ///
    /// Holding a `NodeId` never keeps the node alive; a key whose node
    /// was destroyed simply stops resolving.
    pub struct NodeId;
}

/// A positioned entity in the scene hierarchy.
///
/// A node owns its attached components and (through the scene arena) its
/// children. The transform is stored as position/rotation/scale plus
/// cached local and world matrices guarded by a dirty flag; the matrices
/// are only trustworthy after [`crate::Scene::update`] has run with no
/// intervening mutation.
#[derive(Clone, Debug)]
pub struct Node {
    uuid: Uuid,
    name: String,

    position: Vec3,
    rotation: Vec3,
    scale: Vec3,

    local_matrix: Mat4,
    world_matrix: Mat4,
    dirty: bool,

    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) components: Vec<Component>,
}

impl Node {
    /// Create a detached node with identity transform.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            local_matrix: Mat4::IDENTITY,
            world_matrix: Mat4::IDENTITY,
            dirty: true,
            parent: None,
            children: Vec::new(),
            components: Vec::new(),
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Stable identity, assigned at construction.
    pub fn uuid(&self) -> &Uuid {
        &self.uuid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Euler angles in radians. Tracked per node; not folded into the
    /// composed matrices (see [`Node::local_matrix`]).
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Cached local matrix, composed as `translation * scale`.
    pub fn local_matrix(&self) -> Mat4 {
        self.local_matrix
    }

    /// Cached world matrix: `parent.world * local`, or `local` for a
    /// parentless node.
    pub fn world_matrix(&self) -> Mat4 {
        self.world_matrix
    }

    /// Whether the cached matrices are stale.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Translation part of the cached world matrix.
    pub fn world_position(&self) -> Vec3 {
        self.world_matrix.w_axis.truncate()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// First component of the given kind, if any.
    pub fn component_of_kind(&self, kind: ComponentKind) -> Option<&Component> {
        self.components.iter().find(|c| c.kind() == kind)
    }

    /// All components of the given kind, in attach order.
    pub fn components_of_kind(
        &self,
        kind: ComponentKind,
    ) -> impl Iterator<Item = &Component> + '_ {
        self.components.iter().filter(move |c| c.kind() == kind)
    }

    pub(crate) fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.dirty = true;
    }

    pub(crate) fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
        self.dirty = true;
    }

    pub(crate) fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.dirty = true;
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Recompute the cached matrices from the authoritative fields and
    /// the parent's (already current) world matrix.
    pub(crate) fn recompute_matrices(&mut self, parent_world: Option<Mat4>) {
        self.local_matrix = Mat4::from_translation(self.position) * Mat4::from_scale(self.scale);
        self.world_matrix = match parent_world {
            Some(parent) => parent * self.local_matrix,
            None => self.local_matrix,
        };
        self.dirty = false;
    }
}
