//! JSON document storage
//!
//! The whole collection lives in one JSON file: `{"tasks": [...]}`.
//! It is loaded once at open and rewritten after every mutation.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::models::{NewTask, Task, TaskFilter, TaskPatch};

use super::{StoreError, TaskStore, check_patch, prepare_insert};

/// On-disk document layout
#[derive(Debug, Deserialize)]
struct Collection {
    #[serde(default)]
    tasks: Vec<Task>,
}

#[derive(Serialize)]
struct CollectionRef<'a> {
    tasks: &'a [Task],
}

/// Task collection persisted as a JSON file
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    tasks: Mutex<Vec<Task>>,
}

impl JsonFileStore {
    /// Open (or create) the collection file at `path`
    ///
    /// A missing file starts an empty collection; a file that is not a valid
    /// collection document is an error.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let tasks = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str::<Collection>(&content)?.tasks
            }
        } else {
            // Ensure directory exists
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            Vec::new()
        };

        log::debug!("Loaded {} task(s) from {}", tasks.len(), path.display());

        Ok(Self {
            path,
            tasks: Mutex::new(tasks),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Task>>, StoreError> {
        self.tasks.lock().map_err(|_| StoreError::Unavailable("task lock poisoned".to_string()))
    }

    /// Write the collection next to the target and rename it into place
    fn persist(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(&CollectionRef { tasks })?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl TaskStore for JsonFileStore {
    fn insert(&self, new: NewTask) -> Result<Task, StoreError> {
        let task = prepare_insert(new)?;
        let mut tasks = self.lock()?;

        let mut next = tasks.clone();
        next.push(task.clone());
        self.persist(&next)?;
        *tasks = next;

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

        let Some(index) = tasks.iter().position(|t| t.id == id) else {
            return Ok(None);
        };
        check_patch(&patch)?;

        let mut next = tasks.clone();
        next[index].apply(patch);
        let updated = next[index].clone();
        self.persist(&next)?;
        *tasks = next;

        Ok(Some(updated))
    }

    fn find_and_delete_by_id(&self, id: &str) -> Result<Option<Task>, StoreError> {
        let mut tasks = self.lock()?;

        let Some(index) = tasks.iter().position(|t| t.id == id) else {
            return Ok(None);
        };

        let mut next = tasks.clone();
        let removed = next.remove(index);
        self.persist(&next)?;
        *tasks = next;

        Ok(Some(removed))
    }
}
