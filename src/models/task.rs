//! Task model
//!
//! A task is a single to-do item. The store assigns its id; the text is
//! required and the completion flag defaults to `false`.

use serde::{Deserialize, Serialize};

/// A task - one to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-generated identifier, immutable once assigned
    pub id: String,

    /// What needs to be done
    pub text: String,

    /// Whether the task is done
    #[serde(default)]
    pub completed: bool,
}

/// Input for inserting a task
///
/// Fields are optional because presence is enforced by the store, not by
/// deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    /// Task text (required by the store)
    #[serde(default)]
    pub text: Option<String>,

    /// Initial completion flag (defaults to `false`)
    #[serde(default)]
    pub completed: Option<bool>,
}

/// Merge update for a task
///
/// `None` fields leave the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    /// Replacement text
    #[serde(default)]
    pub text: Option<String>,

    /// Replacement completion flag
    #[serde(default)]
    pub completed: Option<bool>,
}

impl Task {
    /// Create a task from already-validated parts
    #[must_use]
    pub const fn new(id: String, text: String, completed: bool) -> Self {
        Self {
            id,
            text,
            completed,
        }
    }

    /// Apply a merge update in place
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(text) = patch.text {
            self.text = text;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }
}
