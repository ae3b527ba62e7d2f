//! Data models for todos
//!
//! Core abstractions:
//! - Task: "What needs to be done" (text plus a completion flag)
//! - `TaskFilter`: predicate over the collection, built from a `StatusFilter`

pub mod filter;
pub mod task;

pub use filter::{StatusFilter, TaskFilter};
pub use task::{NewTask, Task, TaskPatch};
