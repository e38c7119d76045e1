//! Task domain model
//!
//! Pure domain logic for the ordered task list with no I/O operations.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Newtype wrapper for task IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(pub u32);

impl From<u32> for TaskId {
    fn from(id: u32) -> Self {
        TaskId(id)
    }
}

impl From<TaskId> for u32 {
    fn from(id: TaskId) -> Self {
        id.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single task
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
}

impl Task {
    /// Create a new, incomplete task
    pub fn new(id: TaskId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }

    /// Builder method to set completion status
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}

/// Ordered, in-memory task list
///
/// Order is significant: it drives the streak calculation and the display
/// order. Tasks carry stable ids so a caller can address them even after
/// the list has been reordered; positions are derived from list order.
///
/// This is a pure domain model; persistence is handled by storage
/// adapters in consuming crates.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<Task>,
    #[serde(default)]
    next_id: u32,
}

impl TaskStore {
    /// Create a new empty task store
    pub fn new() -> Self {
        TaskStore {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    /// Append a task, assigning it a fresh stable id.
    ///
    /// Whitespace-only text is a silent no-op and returns `None`.
    pub fn add(&mut self, text: impl AsRef<str>) -> Option<TaskId> {
        let text = text.as_ref().trim();
        if text.is_empty() {
            return None;
        }

        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(Task::new(id, text));
        Some(id)
    }

    /// Flip the completion status at `index`, returning the new value.
    ///
    /// Only a `false -> true` transition should trigger completion side
    /// effects in the caller.
    pub fn toggle(&mut self, index: usize) -> Result<bool> {
        let len = self.tasks.len();
        let task = self
            .tasks
            .get_mut(index)
            .ok_or(CoreError::IndexOutOfRange { index, len })?;

        task.completed = !task.completed;
        Ok(task.completed)
    }

    /// Remove and return the task at `index`, shifting later tasks down
    pub fn delete(&mut self, index: usize) -> Result<Task> {
        self.check_index(index)?;
        Ok(self.tasks.remove(index))
    }

    /// Move the task at `from` so it ends up at `to`.
    ///
    /// The insert position is interpreted against the list *after* the
    /// removal, so moving 0 -> 2 in `[A, B, C]` yields `[B, C, A]`.
    /// Both indices are validated before anything is moved; a failed
    /// reorder leaves the list unchanged.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<()> {
        self.check_index(from)?;
        self.check_index(to)?;

        let task = self.tasks.remove(from);
        self.tasks.insert(to, task);
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.tasks.len() {
            return Err(CoreError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            });
        }
        Ok(())
    }

    /// Get the task at `index`
    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Current position of the task with the given id
    pub fn position_of(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// All tasks in display order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Count total tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Count completed tasks
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// Repair the id counter after deserialization so future ids stay
    /// unique even when the persisted counter is missing or stale.
    pub fn normalize_ids(&mut self) {
        let max_id = self.tasks.iter().map(|t| t.id.0).max().unwrap_or(0);
        self.next_id = self.next_id.max(max_id + 1);
    }
}
