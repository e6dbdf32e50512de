//! Scene error types.

use crate::node::NodeId;

/// Errors from scene-tree operations.
///
/// Nothing in the scene layer is fatal: a failed operation leaves the
/// tree unchanged and the caller decides whether to surface it.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SceneError {
    /// The node key is stale or was never part of this scene.
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Indexed child access past the end of the child list.
    #[error("child index {index} out of range ({count} children)")]
    ChildIndexOutOfRange { index: usize, count: usize },

    /// Indexed component access past the end of the component list.
    #[error("component index {index} out of range ({count} components)")]
    ComponentIndexOutOfRange { index: usize, count: usize },

    /// The component id does not match any component on the node.
    #[error("component not found on node")]
    ComponentNotFound,

    /// The root node cannot be removed, detached or reparented.
    #[error("the root node cannot be removed or reparented")]
    CannotMoveRoot,

    /// Attaching a node under one of its own descendants.
    #[error("attach would create a cycle")]
    WouldCreateCycle,
}
