//! HTTP-agnostic API layer
//!
//! This module provides typed request structures and the task handlers used
//! by the HTTP router. Handlers can also be called directly (tests, other
//! front ends).
//!
//! ## Design
//!
//! - **Handlers are plain functions**: Take a store and typed input, return `Result<T, ApiError>`
//! - **Types are framework-agnostic**: No HTTP types leak into this module
//! - **Errors carry HTTP semantics**: each `ApiError` variant maps to one status code

mod error;
mod handlers;
mod types;

pub use error::{ApiError, ErrorBody};
pub use handlers::{create_task, delete_task, filter_tasks, list_tasks, update_task};
pub use types::{CreateTaskRequest, ListQuery, UpdateTaskRequest};
