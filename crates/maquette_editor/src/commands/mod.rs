//! Command system for undoable scene mutations.
//!
//! Every user-driven change to the scene tree goes through a
//! [`Command`] executed by the [`CommandManager`]; mutating nodes
//! directly from UI code bypasses the history and breaks undo/redo.

mod command;
mod manager;
mod node_commands;
mod transform_commands;

pub use command::{Command, CommandError};
pub use manager::CommandManager;
pub use node_commands::{CreateNodeCommand, DeleteNodeCommand};
pub use transform_commands::{TransformCommand, TransformState};
