//! Status filter and task predicate
//!
//! Both list routes parse the `status` query value into a [`StatusFilter`]
//! and turn it into a [`TaskFilter`] through the same conversion.

use serde::Serialize;

use super::Task;

/// Completion status requested by a caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// Tasks not yet completed
    Active,
    /// Completed tasks
    Completed,
    /// Every task
    #[default]
    All,
}

impl StatusFilter {
    /// Parse an optional `status` query value
    ///
    /// Only the exact values `active` and `completed` narrow the result;
    /// anything else, including an absent value, matches every task.
    #[must_use]
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("active") => Self::Active,
            Some("completed") => Self::Completed,
            _ => Self::All,
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Completed => write!(f, "completed"),
            Self::All => write!(f, "all"),
        }
    }
}

/// Predicate applied to the task collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskFilter {
    /// Required value of `completed`, or `None` to match everything
    pub completed: Option<bool>,
}

impl TaskFilter {
    /// A predicate matching every task
    #[must_use]
    pub const fn all() -> Self {
        Self { completed: None }
    }

    /// Check whether a task satisfies the predicate
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.completed.is_none_or(|c| task.completed == c)
    }
}

impl From<StatusFilter> for TaskFilter {
    fn from(status: StatusFilter) -> Self {
        match status {
            StatusFilter::Active => Self {
                completed: Some(false),
            },
            StatusFilter::Completed => Self {
                completed: Some(true),
            },
            StatusFilter::All => Self::all(),
        }
    }
}
