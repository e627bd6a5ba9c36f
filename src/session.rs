//! A running task session.
//!
//! The session owns the [`TaskList`] and its [`Storage`], so both are always
//! handed to commands together. Drivers (the interactive shell, `exec`, tests)
//! feed it raw lines and get back response text.

use std::path::Path;

use tracing::{debug, warn};

use crate::command::Command;
use crate::error::{Error, Result};
use crate::parser;
use crate::storage::Storage;
use crate::task_list::TaskList;

/// What one executed line produced
#[derive(Debug, Clone, serde::Serialize)]
pub struct Outcome {
    pub command: &'static str,
    pub message: String,
    pub continues: bool,
}

#[derive(Debug)]
pub struct Session {
    tasks: TaskList,
    storage: Storage,
}

impl Session {
    /// Open a session over `storage`, loading every stored task.
    ///
    /// A store that cannot be read is recreated empty and loaded once more.
    pub fn open(storage: Storage) -> Result<Self> {
        let loaded = match storage.load() {
            Err(Error::StorageUnavailable { source, .. }) => {
                warn!(error = %source, "task file unreadable at startup");
                storage.heal(&[])?;
                storage.load()?
            }
            other => other?,
        };
        let tasks = TaskList::from_tasks(loaded);
        debug!(path = %storage.path().display(), count = tasks.len(), "session opened");
        Ok(Self { tasks, storage })
    }

    /// Open a session over the default store under `base_dir`
    pub fn open_in(base_dir: &Path) -> Result<Self> {
        Self::open(Storage::in_dir(base_dir))
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Parse and execute one line
    pub fn execute_line(&mut self, line: &str) -> Result<Outcome> {
        let command = parser::parse(line)?;
        debug!(command = command.name(), "parsed command");
        self.execute(&command)
    }

    /// Execute an already parsed command.
    ///
    /// When the store fails mid-command the file is recreated from the list
    /// before the error is returned.
    pub fn execute(&mut self, command: &Command) -> Result<Outcome> {
        match command.execute(&mut self.tasks, &self.storage) {
            Ok(message) => Ok(Outcome {
                command: command.name(),
                message,
                continues: command.continues_session(),
            }),
            Err(err @ Error::StorageUnavailable { .. }) => {
                if let Err(heal_err) = self.storage.heal(self.tasks.as_slice()) {
                    warn!(error = %heal_err, "could not recreate task file");
                }
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Execute one line and render the result, errors included, as text.
    ///
    /// Returns the message and whether the session should keep going.
    pub fn respond(&mut self, line: &str) -> (String, bool) {
        match self.execute_line(line) {
            Ok(outcome) => (outcome.message, outcome.continues),
            Err(err) => (format!("{err}\n"), true),
        }
    }
}
