//! In-memory ordered task list.
//!
//! Positions are 0-based here and 1-based everywhere a user sees them. The
//! list is never mutated on its own in the command path: every change is
//! paired with the matching [`crate::storage::Storage`] call.

use crate::error::{Error, Result};
use crate::task::Task;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Remove and return the task at `index`
    pub fn remove_at(&mut self, index: usize) -> Result<Task> {
        self.check(index)?;
        Ok(self.tasks.remove(index))
    }

    /// Remove the first task equal to `task`
    pub fn remove(&mut self, task: &Task) -> Option<Task> {
        let index = self.index_of(task)?;
        Some(self.tasks.remove(index))
    }

    pub fn get(&self, index: usize) -> Result<&Task> {
        self.tasks.get(index).ok_or(Error::InvalidTaskNumber)
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Task> {
        self.tasks.get_mut(index).ok_or(Error::InvalidTaskNumber)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn index_of(&self, task: &Task) -> Option<usize> {
        self.tasks.iter().position(|entry| entry == task)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    /// Take every task out, leaving the list empty
    pub fn drain(&mut self) -> Vec<Task> {
        std::mem::take(&mut self.tasks)
    }

    /// Tasks matching `predicate`, in list order
    pub fn filter<P>(&self, predicate: P) -> Vec<&Task>
    where
        P: Fn(&Task) -> bool,
    {
        self.tasks.iter().filter(|task| predicate(*task)).collect()
    }

    /// Numbered listing of the tasks matching `predicate`.
    ///
    /// Numbers count the filtered subsequence, starting at 1.
    pub fn render_filtered<P>(&self, predicate: P) -> String
    where
        P: Fn(&Task) -> bool,
    {
        self.filter(predicate)
            .iter()
            .enumerate()
            .map(|(position, task)| format!("{}.{}", position + 1, task))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn check(&self, index: usize) -> Result<()> {
        if index < self.tasks.len() {
            Ok(())
        } else {
            Err(Error::InvalidTaskNumber)
        }
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
