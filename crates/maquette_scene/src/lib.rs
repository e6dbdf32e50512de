//! # maquette_scene - Scene graph
//!
//! The in-memory scene model of the Maquette editor: a strict tree of
//! transform [`Node`]s with lazily recomputed local/world matrices, typed
//! data [`Component`]s attached to nodes, and the owning [`Scene`] arena.
//!
//! ## Ownership
//!
//! Nodes live in a generational arena owned by the [`Scene`]; the tree's
//! forward links (`children`) are the ownership edges and the `parent`
//! link is a plain back-handle. Every external reference into the tree is
//! a [`NodeId`] key: once a node is destroyed the key goes stale and all
//! lookups return `None`/`Err` instead of dangling.
//!
//! ## Update model
//!
//! Mutating a node's transform marks it and all of its descendants dirty.
//! [`Scene::update`], called once per frame, recomputes dirty matrices
//! top-down (parents before children) and runs the per-frame component
//! hooks. Nothing here is thread-safe by design; the scene belongs to the
//! UI thread.

mod component;
mod error;
mod node;
mod scene;

pub use component::{Component, ComponentData, ComponentKind, LightType};
pub use error::SceneError;
pub use node::{Node, NodeId};
pub use scene::Scene;
