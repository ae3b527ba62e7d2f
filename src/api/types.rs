//! API request types
//!
//! Successful responses are the bare task (or task array); see
//! [`ErrorBody`](super::ErrorBody) for the failure shape.

use serde::Deserialize;

use crate::models::{NewTask, TaskPatch};

/// Request body for creating a task
///
/// `text` is optional here on purpose: a missing value is rejected by the
/// store's insert path, not by deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTaskRequest {
    /// Task text
    #[serde(default)]
    pub text: Option<String>,
}

impl From<&CreateTaskRequest> for NewTask {
    fn from(req: &CreateTaskRequest) -> Self {
        Self {
            text: req.text.clone(),
            completed: None,
        }
    }
}

/// Request body for updating a task
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTaskRequest {
    /// New text (unchanged when omitted)
    #[serde(default)]
    pub text: Option<String>,
    /// New completion flag (unchanged when omitted)
    #[serde(default)]
    pub completed: Option<bool>,
}

impl From<&UpdateTaskRequest> for TaskPatch {
    fn from(req: &UpdateTaskRequest) -> Self {
        Self {
            text: req.text.clone(),
            completed: req.completed,
        }
    }
}

/// Query parameters accepted by the list routes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Raw `status` value, if present
    pub status: Option<String>,
}
