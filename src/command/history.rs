use super::{Command, CommandError, CommandResult, DrawableTarget};
use crate::document::Document;

/// Undo/redo stacks over executed commands.
#[derive(Debug, Default)]
pub struct CommandHistory {
    undo_stack: Vec<Command>,
    redo_stack: Vec<Command>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes `command` against the document and records it.
    pub fn execute(&mut self, command: Command, doc: &mut Document) -> CommandResult {
        command.execute(doc)?;
        self.undo_stack.push(command);
        self.redo_stack.clear();
        Ok(())
    }

    pub fn undo(&mut self, doc: &mut Document) -> CommandResult {
        let command = self.undo_stack.pop().ok_or(CommandError::NothingToUndo)?;
        if let Some(inverse) = command.inverse() {
            inverse.execute(doc)?;
        }
        self.redo_stack.push(command);
        Ok(())
    }

    pub fn redo(&mut self, doc: &mut Document) -> CommandResult {
        let command = self.redo_stack.pop().ok_or(CommandError::NothingToRedo)?;
        command.execute(doc)?;
        self.undo_stack.push(command);
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// True when the most recent edit is a fadable paint edit on `target`.
    pub fn can_fade(&self, target: DrawableTarget) -> bool {
        self.undo_stack
            .last()
            .is_some_and(|cmd| cmd.is_fadable() && cmd.target() == Some(target))
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
