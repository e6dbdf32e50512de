//! Command trait and error type.

use maquette_scene::{Scene, SceneError};

/// Errors from executing or undoing commands.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CommandError {
    /// The undo stack is empty.
    #[error("nothing to undo")]
    NothingToUndo,

    /// The redo stack is empty.
    #[error("nothing to redo")]
    NothingToRedo,

    /// A scene operation inside the command failed.
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// The command is not in a state where the operation makes sense,
    /// e.g. undoing a create that never executed.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}

/// A reversible unit of scene mutation.
///
/// A command captures enough state at construction or execution time to
/// reverse itself. On failure both hooks must leave the scene unchanged
/// (or report honestly what they did through the error); the manager
/// keeps a failed command where it was so the user can retry or clear
/// the history.
pub trait Command {
    /// Human-readable name for the undo/redo menu.
    fn name(&self) -> &str;

    /// Apply the command to the scene.
    fn execute(&mut self, scene: &mut Scene) -> Result<(), CommandError>;

    /// Reverse the command.
    fn undo(&mut self, scene: &mut Scene) -> Result<(), CommandError>;
}
