//! Handler failures and their HTTP translation

use serde::Serialize;
use thiserror::Error;

/// Failure returned by an API handler
///
/// The message is what the caller sees. Underlying causes are logged where
/// the error is created and never carried here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No route or no task matched (404)
    #[error("{0}")]
    NotFound(String),

    /// The request could not be read or parsed (400)
    #[error("{0}")]
    BadRequest(String),

    /// The store failed or rejected the operation (500)
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this failure
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::BadRequest(_) => 400,
            Self::Internal(_) => 500,
        }
    }
}

/// JSON error payload: `{"error": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// Caller-facing message
    pub error: String,
}

impl From<&ApiError> for ErrorBody {
    fn from(err: &ApiError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}
