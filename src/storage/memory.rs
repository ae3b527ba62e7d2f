//! In-memory task storage

use std::sync::{Mutex, MutexGuard};

use crate::models::{NewTask, Task, TaskFilter, TaskPatch};

use super::{StoreError, TaskStore, check_patch, prepare_insert};

/// Task collection held in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    tasks: Mutex<Vec<Task>>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Task>>, StoreError> {
        self.tasks.lock().map_err(|_| StoreError::Unavailable("task lock poisoned".to_string()))
    }
}

impl TaskStore for MemoryStore {
    fn insert(&self, new: NewTask) -> Result<Task, StoreError> {
        let task = prepare_insert(new)?;
        self.lock()?.push(task.clone());
        Ok(task)
    }

    fn find(&self, filter: &TaskFilter) -> Result<Vec<Task>, StoreError> {
        Ok(self.lock()?.iter().filter(|t| filter.matches(t)).cloned().collect())
    }

    fn find_and_update_by_id(
        &self,
        id: &str,
        patch: TaskPatch,
    ) -> Result<Option<Task>, StoreError> {
        let mut tasks = self.lock()?;
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };

        check_patch(&patch)?;
        task.apply(patch);
        Ok(Some(task.clone()))
    }

    fn find_and_delete_by_id(&self, id: &str) -> Result<Option<Task>, StoreError> {
        let mut tasks = self.lock()?;
        Ok(tasks.iter().position(|t| t.id == id).map(|i| tasks.remove(i)))
    }
}
