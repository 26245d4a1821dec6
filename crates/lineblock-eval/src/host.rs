//! Host capabilities: command hooks and the text sink.
//!
//! Grid writes go through [`lineblock_types::Grid`]; everything else a
//! program can do to the outside world goes through [`Host`].

use std::collections::HashMap;

use lineblock_types::GridPos;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HookError {
    /// No command is bound at this cell.
    #[error("no command hook at {0}")]
    Missing(GridPos),

    /// The command ran and reported a failure.
    #[error("command at {pos} failed: {message}")]
    Failed { pos: GridPos, message: String },
}

pub trait Host {
    /// Run the command bound to the cell at `pos`.
    fn execute_command(&mut self, pos: GridPos) -> Result<(), HookError>;

    /// Deliver one line of program output.
    fn emit_text(&mut self, text: &str);
}

/// An in-memory host for tests and embedding: records output and command
/// executions, and runs only the hooks registered with it.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    /// `None` for a hook that succeeds, `Some(message)` for one that fails.
    hooks: HashMap<GridPos, Option<String>>,
    output: Vec<String>,
    executed: Vec<GridPos>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a succeeding command at `pos`.
    pub fn register_command(&mut self, pos: GridPos) -> &mut Self {
        self.hooks.insert(pos, None);
        self
    }

    /// Bind a command at `pos` that fails with `message`.
    pub fn register_failing_command(&mut self, pos: GridPos, message: impl Into<String>) -> &mut Self {
        self.hooks.insert(pos, Some(message.into()));
        self
    }

    /// Every line emitted so far, in order.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Cells whose commands ran successfully, in order.
    pub fn executed(&self) -> &[GridPos] {
        &self.executed
    }
}

impl Host for MemoryHost {
    fn execute_command(&mut self, pos: GridPos) -> Result<(), HookError> {
        match self.hooks.get(&pos) {
            None => Err(HookError::Missing(pos)),
            Some(Some(message)) => Err(HookError::Failed {
                pos,
                message: message.clone(),
            }),
            Some(None) => {
                self.executed.push(pos);
                Ok(())
            }
        }
    }

    fn emit_text(&mut self, text: &str) {
        self.output.push(text.to_string());
    }
}
