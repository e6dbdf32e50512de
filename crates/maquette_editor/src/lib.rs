//! # maquette_editor - Scene editing core
//!
//! The interaction layer of the Maquette editor: selection state, ray
//! picking, transform gizmos and command-based undo/redo over a
//! [`maquette_scene::Scene`].
//!
//! ## Architecture
//!
//! The editor follows a command-based architecture:
//!
//! ```text
//! input event -> picking -> selection -> gizmo drag -> command -> scene
//! ```
//!
//! A mouse press is first offered to the active gizmo; if no handle is
//! hit it falls through to picking, which updates the selection. Drag
//! events feed the gizmo, which mutates the selected nodes directly for
//! immediate feedback; on release the whole drag is captured as
//! transform commands so undo/redo stay consistent. Everything runs on
//! the UI thread; within a frame all input is applied before
//! [`maquette_scene::Scene::update`] recomputes matrices for the
//! renderer.
//!
//! The GUI shell, rendering backend and asset pipeline are external
//! collaborators; their contracts are the [`ViewCamera`] trait, scene
//! traversal, and the command types re-exported here.

pub mod commands;
pub mod config;
pub mod context;
pub mod gizmos;
pub mod picking;
pub mod selection;

pub use commands::{
    Command, CommandError, CommandManager, CreateNodeCommand, DeleteNodeCommand,
    TransformCommand, TransformState,
};
pub use config::{ConfigError, EditorConfig};
pub use context::EditorContext;
pub use gizmos::{
    DragCapture, GizmoAxis, GizmoController, GizmoKind, Handle, HandleShape, SnapSettings,
};
pub use picking::{OrbitCamera, PickingManager, ViewCamera};
pub use selection::SelectionManager;

/// Editor version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Editor name.
pub const NAME: &str = "Maquette Editor";
