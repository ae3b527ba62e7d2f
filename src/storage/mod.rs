//! Storage abstraction for tasks
//!
//! Provides pluggable backends selected by a store URL:
//! - `memory:` / `memory://`: in-process collection (lost on exit)
//! - `file://<path>` or a bare path: JSON document on disk

pub mod file;
pub mod id;
pub mod memory;

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::models::{NewTask, Task, TaskFilter, TaskPatch};

/// Errors raised by a task store
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required field was missing or blank
    #[error("validation failed: {0}")]
    Validation(String),

    /// The store URL names a backend this build does not provide
    #[error("unsupported store scheme: {0}")]
    UnsupportedScheme(String),

    /// The store cannot serve requests (poisoned lock etc.)
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Filesystem failure
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored document could not be (de)serialized
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Persistence boundary for the task collection
///
/// Every method is a single atomic store operation. Implementations apply
/// the insert-time rules: `text` is required and `completed` defaults to
/// `false`.
pub trait TaskStore: Send + Sync + std::fmt::Debug {
    /// Insert a new task, returning it with its generated id
    fn insert(&self, new: NewTask) -> Result<Task, StoreError>;

    /// Find every task matching the predicate
    fn find(&self, filter: &TaskFilter) -> Result<Vec<Task>, StoreError>;

    /// Merge `patch` into the task with `id`
    ///
    /// Returns `Ok(None)` when no task has that id, before the patch is
    /// validated; nothing is modified then.
    fn find_and_update_by_id(&self, id: &str, patch: TaskPatch)
    -> Result<Option<Task>, StoreError>;

    /// Remove the task with `id`, returning what was removed
    fn find_and_delete_by_id(&self, id: &str) -> Result<Option<Task>, StoreError>;
}

/// Storage backend selected by a store URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    /// In-memory collection
    Memory,
    /// JSON document at the given path
    File(PathBuf),
}

impl std::str::FromStr for Backend {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "memory:" || s.starts_with("memory://") {
            return Ok(Self::Memory);
        }
        if let Some(path) = s.strip_prefix("file://") {
            if path.is_empty() {
                return Err(StoreError::Validation("file store URL has no path".to_string()));
            }
            return Ok(Self::File(PathBuf::from(path)));
        }
        if let Some((scheme, _)) = s.split_once("://") {
            return Err(StoreError::UnsupportedScheme(scheme.to_string()));
        }
        if s.is_empty() {
            return Err(StoreError::Validation("store URL is empty".to_string()));
        }
        Ok(Self::File(PathBuf::from(s)))
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory => write!(f, "memory://"),
            Self::File(path) => write!(f, "file://{}", path.display()),
        }
    }
}

impl Backend {
    /// Open a store for this backend
    pub fn open(&self) -> Result<Arc<dyn TaskStore>, StoreError> {
        match self {
            Self::Memory => Ok(Arc::new(MemoryStore::new())),
            Self::File(path) => Ok(Arc::new(JsonFileStore::open(path)?)),
        }
    }
}

/// Parse a store URL and open the store it names
pub fn open(url: &str) -> Result<Arc<dyn TaskStore>, StoreError> {
    let backend: Backend = url.parse()?;
    log::debug!("Opening task store at {backend}");
    backend.open()
}

/// Turn insert input into a task, enforcing the required-field rule
pub(crate) fn prepare_insert(new: NewTask) -> Result<Task, StoreError> {
    let text = match new.text {
        Some(text) if !text.trim().is_empty() => text,
        Some(_) => return Err(StoreError::Validation("`text` cannot be empty".to_string())),
        None => return Err(StoreError::Validation("`text` is required".to_string())),
    };
    Ok(Task::new(id::generate(), text, new.completed.unwrap_or(false)))
}

/// Reject patches that would blank out the required text
pub(crate) fn check_patch(patch: &TaskPatch) -> Result<(), StoreError> {
    match &patch.text {
        Some(text) if text.trim().is_empty() => {
            Err(StoreError::Validation("`text` cannot be empty".to_string()))
        },
        _ => Ok(()),
    }
}

pub use file::JsonFileStore;
pub use memory::MemoryStore;
