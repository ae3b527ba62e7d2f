//! Pure API handlers
//!
//! These handlers are HTTP-agnostic. Each one makes exactly one store call
//! and returns `Result<T, ApiError>`.

use crate::models::{StatusFilter, Task, TaskFilter};
use crate::storage::{StoreError, TaskStore};

use super::error::ApiError;
use super::types::{CreateTaskRequest, ListQuery, UpdateTaskRequest};

// =============================================================================
// TASKS
// =============================================================================

/// Create a new task
///
/// A missing `text` is passed through; the store rejects it.
pub fn create_task(store: &dyn TaskStore, req: &CreateTaskRequest) -> Result<Task, ApiError> {
    let task = store.insert(req.into()).map_err(|e| store_failure("create task", &e))?;
    log::debug!("Created task {}", task.id);
    Ok(task)
}

/// List tasks, optionally narrowed by `status`
pub fn list_tasks(store: &dyn TaskStore, query: &ListQuery) -> Result<Vec<Task>, ApiError> {
    find_by_status(store, query)
}

/// List tasks through the `/filter` route
///
/// Same predicate and response as [`list_tasks`].
pub fn filter_tasks(store: &dyn TaskStore, query: &ListQuery) -> Result<Vec<Task>, ApiError> {
    find_by_status(store, query)
}

/// Merge the request into the task with `id`
pub fn update_task(
    store: &dyn TaskStore,
    id: &str,
    req: &UpdateTaskRequest,
) -> Result<Task, ApiError> {
    match store.find_and_update_by_id(id, req.into()) {
        Ok(Some(task)) => Ok(task),
        Ok(None) => Err(ApiError::NotFound(format!("Task '{id}' not found"))),
        Err(e) => Err(store_failure("update task", &e)),
    }
}

/// Delete the task with `id`, returning the removed task
pub fn delete_task(store: &dyn TaskStore, id: &str) -> Result<Task, ApiError> {
    match store.find_and_delete_by_id(id) {
        Ok(Some(task)) => Ok(task),
        Ok(None) => Err(ApiError::NotFound(format!("Task '{id}' not found"))),
        Err(e) => Err(store_failure("delete task", &e)),
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn find_by_status(store: &dyn TaskStore, query: &ListQuery) -> Result<Vec<Task>, ApiError> {
    let status = StatusFilter::from_query(query.status.as_deref());
    log::debug!("Listing {status} tasks");
    let filter = TaskFilter::from(status);
    store.find(&filter).map_err(|e| store_failure("list tasks", &e))
}

/// Log the cause and hide it behind a generic message
fn store_failure(action: &str, err: &StoreError) -> ApiError {
    log::error!("Failed to {action}: {err}");
    ApiError::Internal(format!("Failed to {action}"))
}
