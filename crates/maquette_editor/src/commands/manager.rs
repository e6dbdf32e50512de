//! Undo/redo stacks.

use maquette_scene::Scene;

use super::{Command, CommandError};

/// Owns the undo and redo stacks and runs commands against the scene.
///
/// The undo stack is bounded: once it exceeds the configured size the
/// oldest entry is evicted. The redo stack is cleared whenever a fresh
/// command executes, since a new action invalidates any undone branch.
pub struct CommandManager {
    undo_stack: Vec<Box<dyn Command>>,
    redo_stack: Vec<Box<dyn Command>>,
    max_stack_size: usize,
}

impl CommandManager {
    /// Default maximum undo depth.
    pub const DEFAULT_MAX_SIZE: usize = 100;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_MAX_SIZE)
    }

    pub fn with_capacity(max_stack_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_stack_size,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Name of the command that would be undone next.
    pub fn undo_name(&self) -> Option<&str> {
        self.undo_stack.last().map(|c| c.name())
    }

    /// Name of the command that would be redone next.
    pub fn redo_name(&self) -> Option<&str> {
        self.redo_stack.last().map(|c| c.name())
    }

    /// Execute a command and push it onto the undo stack.
    ///
    /// On failure the stacks are untouched and the error is returned;
    /// the command is dropped.
    pub fn execute(
        &mut self,
        mut cmd: Box<dyn Command>,
        scene: &mut Scene,
    ) -> Result<(), CommandError> {
        cmd.execute(scene)?;
        log::debug!("executed command: {}", cmd.name());

        self.undo_stack.push(cmd);
        while self.undo_stack.len() > self.max_stack_size {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
        Ok(())
    }

    /// Undo the most recent command and move it to the redo stack.
    ///
    /// If the command's own undo fails it stays on the undo stack; the
    /// scene is in whatever state the failed undo left it.
    pub fn undo(&mut self, scene: &mut Scene) -> Result<(), CommandError> {
        let cmd = self
            .undo_stack
            .last_mut()
            .ok_or(CommandError::NothingToUndo)?;
        cmd.undo(scene)?;
        log::debug!("undid command: {}", cmd.name());

        if let Some(cmd) = self.undo_stack.pop() {
            self.redo_stack.push(cmd);
        }
        Ok(())
    }

    /// Re-execute the most recently undone command and move it back to
    /// the undo stack. A failed redo leaves the command on the redo
    /// stack.
    pub fn redo(&mut self, scene: &mut Scene) -> Result<(), CommandError> {
        let cmd = self
            .redo_stack
            .last_mut()
            .ok_or(CommandError::NothingToRedo)?;
        cmd.execute(scene)?;
        log::debug!("redid command: {}", cmd.name());

        if let Some(cmd) = self.redo_stack.pop() {
            self.undo_stack.push(cmd);
        }
        Ok(())
    }

    /// Drop both stacks without invoking any command, for scene
    /// teardown.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for CommandManager {
    fn default() -> Self {
        Self::new()
    }
}
